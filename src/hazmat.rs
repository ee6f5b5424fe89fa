//! ⚠️ Warning: Hazmat!
//!
//! Low-level secp256k1 curve primitives the rest of this crate is built
//! from: scalar-by-base and scalar-by-point multiplication, point addition,
//! the group order, and the affine/bytes conversions the hash transcripts
//! and the textual codec both depend on.
//!
//! These are thin wrappers over [`k256`]. Everything here operates on
//! already-decoded curve types; it performs no range checks of its own
//! (those live in [`crate::signature`] and [`crate::scalar`], which are the
//! only callers that see untrusted input).

use crypto_bigint::U256;
use elliptic_curve::{
    sec1::{FromEncodedPoint, ToEncodedPoint},
    Curve,
};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, Secp256k1};

/// The secp256k1 group order `N`, as a fixed-width integer for comparisons
/// that aren't naturally scalar arithmetic (the coordinate range checks in
/// [`crate::signature::verify`], which compare field elements against `N`
/// rather than the base field prime — see `SPEC_FULL.md` §4.6).
pub(crate) const ORDER: U256 = Secp256k1::ORDER;

/// `g · k`: scalar multiplication of the base point.
pub(crate) fn scalar_base_mult(k: &Scalar) -> ProjectivePoint {
    ProjectivePoint::GENERATOR * k
}

/// `P · k`: scalar multiplication of an arbitrary point.
pub(crate) fn scalar_mult(p: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    p * k
}

/// `P1 + P2`.
pub(crate) fn add(p1: &ProjectivePoint, p2: &ProjectivePoint) -> ProjectivePoint {
    p1 + p2
}

/// Builds a curve point from raw big-endian coordinate bytes, rejecting
/// anything off-curve (which, for secp256k1, also covers the point at
/// infinity: there is no uncompressed SEC1 encoding of it).
pub(crate) fn affine_from_coordinates(x: &FieldBytes, y: &FieldBytes) -> Option<AffinePoint> {
    let encoded = EncodedPoint::from_affine_coordinates(x, y, false);
    Option::from(AffinePoint::from_encoded_point(&encoded))
}

/// Big-endian `(x, y)` coordinate bytes of an affine point, fixed-width
/// (32 bytes each, zero-padded). Minimal-byte stripping for hashing and the
/// textual codec happens one layer up, in [`crate::scalar`].
pub(crate) fn affine_coordinates(p: &AffinePoint) -> (FieldBytes, FieldBytes) {
    let encoded = p.to_encoded_point(false);
    (
        *encoded.x().expect("uncompressed point always has x"),
        *encoded.y().expect("uncompressed point always has y"),
    )
}

/// Left-pads minimal big-endian bytes to 32 bytes, rejecting anything that
/// can't possibly fit (which also can't possibly be `< N` or `< p`).
pub(crate) fn pad_to_field_bytes(bytes: &[u8]) -> Option<FieldBytes> {
    if bytes.len() > 32 {
        return None;
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Some(FieldBytes::clone_from_slice(&padded))
}

/// Interprets big-endian bytes as an integer, rejecting anything `>= N`.
///
/// This compares against the *scalar field order* `N`, not secp256k1's base
/// field prime `p` (`p > N`), even when called on point coordinates (which
/// live in `Z_p`, not `Z_N`). That is an intentional quirk carried over
/// unchanged from the reference implementation (`SPEC_FULL.md` §4.6/§9):
/// tag-point range checks are stricter than necessary, but changing them
/// would accept signatures the reference implementation rejects.
pub(crate) fn coordinate_lt_order(bytes: &[u8]) -> bool {
    match pad_to_field_bytes(bytes) {
        Some(fb) => U256::from_be_slice(fb.as_slice()) < ORDER,
        None => false,
    }
}
