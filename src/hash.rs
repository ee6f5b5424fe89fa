//! `hashG` and `hashAllq`: the two hash functions the ring signature
//! protocol is built from (SPEC_FULL.md §4.3).

use crypto_bigint::U256;
use elliptic_curve::ops::Reduce;
use k256::{ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};

use crate::hazmat;
use crate::scalar::minimal_be_bytes;

/// `hashG(bytes) = SHA256(bytes) · G`.
///
/// This is *not* a proper hash-to-curve: the discrete log of the result to
/// base `G` is the hash digest itself, known to anyone who knows `bytes`.
/// The protocol tolerates this (see `SPEC_FULL.md` §9) — both signer and
/// verifier rely on the same convention, and the resulting tag point is
/// still a one-way function of the signer's private scalar.
pub(crate) fn hash_to_group(bytes: &[u8]) -> ProjectivePoint {
    let digest = Sha256::digest(bytes);
    let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&digest);
    hazmat::scalar_base_mult(&scalar)
}

/// Accumulates the minimal big-endian bytes of a fixed-width byte array
/// (scalar/coordinate representation) into a running hash.
fn absorb(hasher: &mut Sha256, fixed_width: &[u8]) {
    hasher.update(minimal_be_bytes(fixed_width));
}

/// The six coordinates of one ring index's `(a, b, b')` triple, as minimal
/// big-endian bytes, ready to feed to [`hash_all_q`].
pub(crate) struct ShareBytes {
    pub ax: Vec<u8>,
    pub ay: Vec<u8>,
    pub bx: Vec<u8>,
    pub by: Vec<u8>,
    pub bpx: Vec<u8>,
    pub bpy: Vec<u8>,
}

/// `hashAllq(mvR, τ1, τ2, a[], b[], b'[]) → Scalar`.
///
/// SHA-256 over `mvR` followed by `τ1` and `τ2`'s coordinates and, for each
/// ring index, the six coordinates of `(a, b, b')` at that index — all as
/// minimal big-endian bytes, in exactly this order. The digest is returned
/// already reduced mod `N` (see `SPEC_FULL.md` §4.3's addendum): every
/// caller needs the value mod `N` immediately, so there is no observable
/// difference between "return the raw digest" and "return it pre-reduced".
pub(crate) fn hash_all_q(
    mv_r: &[u8],
    tau1: (&[u8], &[u8]),
    tau2: (&[u8], &[u8]),
    shares: &[ShareBytes],
) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(mv_r);
    absorb(&mut hasher, tau1.0);
    absorb(&mut hasher, tau1.1);
    absorb(&mut hasher, tau2.0);
    absorb(&mut hasher, tau2.1);
    for share in shares {
        hasher.update(&share.ax);
        hasher.update(&share.ay);
        hasher.update(&share.bx);
        hasher.update(&share.by);
        hasher.update(&share.bpx);
        hasher.update(&share.bpy);
    }
    let digest = hasher.finalize();
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_to_group_is_deterministic() {
        let p1 = hash_to_group(b"hello");
        let p2 = hash_to_group(b"hello");
        assert_eq!(p1, p2);
    }

    #[test]
    fn hash_to_group_differs_on_different_input() {
        assert_ne!(hash_to_group(b"hello"), hash_to_group(b"world"));
    }
}
