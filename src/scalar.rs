//! The scalar sampler (`randFieldElement`) and the minimal big-endian byte
//! encoding shared by the hash transcripts and the textual codec.

use crypto_bigint::{Encoding, NonZero, U256, U320};
use elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// `N - 1`, zero-extended to 320 bits so it shares a width with the 40-byte
/// buffer `random_field_element` reduces. Kept as a literal constant rather
/// than computed from [`crate::hazmat::ORDER`] at runtime, since both values
/// are fixed by the choice of curve.
const ORDER_MINUS_ONE_WIDE: U320 = U320::from_be_hex(
    "0000000000000000FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140",
);

/// Draws a uniform scalar in `[1, N-1]` from `rng`.
///
/// Reads `ceil(bitlen(N)/8) + 8 == 40` bytes (the extra 64 bits push
/// modulo bias below `2^-64`, per [NSA] A.2.1), interprets them as a
/// big-endian integer `b`, and returns `(b mod (N-1)) + 1`.
pub(crate) fn random_field_element<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar> {
    let mut buf = [0u8; 40];
    rng.try_fill_bytes(&mut buf)
        .map_err(|_| Error::RandomnessFailure)?;

    let b = U320::from_be_slice(&buf);
    let modulus = NonZero::new(ORDER_MINUS_ONE_WIDE).unwrap();
    let (_, remainder) = b.div_rem(&modulus);

    let wide_bytes = remainder.to_be_bytes();
    let mut narrow_bytes = [0u8; 32];
    narrow_bytes.copy_from_slice(&wide_bytes[8..]);

    let value = U256::from_be_bytes(narrow_bytes).wrapping_add(&U256::ONE);
    let repr = FieldBytes::clone_from_slice(&value.to_be_bytes());

    Option::from(Scalar::from_repr(repr)).ok_or(Error::RandomnessFailure)
}

/// The shortest big-endian byte sequence representing a non-negative
/// integer, matching Go's `big.Int.Bytes()`: no leading zero byte, and the
/// empty slice represents zero. Hash transcripts and the Base58 codec both
/// depend on this exact shape (see `SPEC_FULL.md` §9).
pub(crate) fn minimal_be_bytes(fixed_width: &[u8]) -> Vec<u8> {
    let first_nonzero = fixed_width.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(idx) => fixed_width[idx..].to_vec(),
        None => Vec::new(),
    }
}

/// Converts a scalar to its minimal big-endian byte representation.
pub(crate) fn scalar_minimal_bytes(s: &Scalar) -> Vec<u8> {
    minimal_be_bytes(&s.to_repr())
}

/// Parses minimal big-endian bytes as a scalar, rejecting anything `>= N`
/// (including anything that can't even fit in 32 bytes).
pub(crate) fn scalar_from_minimal_bytes(bytes: &[u8]) -> Option<Scalar> {
    if bytes.len() > 32 {
        return None;
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Option::from(Scalar::from_repr(padded.into()))
}
