//! Public and private key types (`SPEC_FULL.md` §3).

use elliptic_curve::group::prime::PrimeCurveAffine;
use k256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};
use crate::hazmat;
use crate::scalar::random_field_element;

/// A public key: a non-identity point on secp256k1.
///
/// Ordered by `(X, Y)` as fixed-width big-endian bytes, which gives the
/// total order [`crate::ring::PublicKeyRing::sort`] canonicalizes the ring
/// with (`SPEC_FULL.md` §3: "signed big-integer comparison" — for
/// non-negative, same-length representations this coincides with byte-wise
/// lexicographic order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PublicKey {
    point: AffineOrd,
}

/// Wraps `AffinePoint` with an `Ord` impl over its fixed-width coordinates.
/// `AffinePoint` itself has no total order; ring canonicalization needs one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AffineOrd(AffinePoint);

impl PartialOrd for AffineOrd {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AffineOrd {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        let (x1, y1) = hazmat::affine_coordinates(&self.0);
        let (x2, y2) = hazmat::affine_coordinates(&other.0);
        (x1.as_slice(), y1.as_slice()).cmp(&(x2.as_slice(), y2.as_slice()))
    }
}

impl PublicKey {
    /// Builds a public key from an affine point, rejecting the identity.
    pub(crate) fn from_projective(p: ProjectivePoint) -> Result<Self> {
        let affine = p.to_affine();
        if bool::from(affine.is_identity()) {
            return Err(Error::InvalidPoint);
        }
        Ok(PublicKey {
            point: AffineOrd(affine),
        })
    }

    /// Builds a public key from raw big-endian `(X, Y)` coordinates,
    /// rejecting anything off-curve or equal to the point at infinity.
    pub fn from_affine_coordinates(x: &FieldBytes, y: &FieldBytes) -> Result<Self> {
        let affine = hazmat::affine_from_coordinates(x, y).ok_or(Error::InvalidPoint)?;
        if bool::from(affine.is_identity()) {
            return Err(Error::InvalidPoint);
        }
        Ok(PublicKey {
            point: AffineOrd(affine),
        })
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        &self.point.0
    }

    pub(crate) fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint::from(self.point.0)
    }

    /// Fixed-width big-endian `(X, Y)` coordinates.
    pub(crate) fn coordinates(&self) -> (FieldBytes, FieldBytes) {
        hazmat::affine_coordinates(&self.point.0)
    }
}

/// A private scalar `d` and its associated public point `d · G`.
///
/// `d` is a [`NonZeroScalar`], so a zero private key (which would make the
/// derived public key the point at infinity) is unrepresentable rather than
/// merely checked for. Zeroized on drop; the scalar never leaves this type
/// except through [`PrivateKey::scalar`], which callers in this crate use
/// only for the duration of a single `sign` call.
#[derive(Clone, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    public: PublicKey,
    scalar: NonZeroScalar,
}

impl PrivateKey {
    /// Draws a fresh private key using [`crate::scalar::random_field_element`].
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let scalar = random_field_element(rng)?;
        Self::from_scalar(scalar)
    }

    /// Builds a private key from an existing scalar. Fails only if `d == 0`,
    /// which would make the derived public key the point at infinity.
    pub fn from_scalar(scalar: Scalar) -> Result<Self> {
        let scalar: NonZeroScalar =
            Option::from(NonZeroScalar::new(scalar)).ok_or(Error::InvalidPoint)?;
        let public = PublicKey::from_projective(hazmat::scalar_base_mult(&scalar))?;
        Ok(PrivateKey { public, scalar })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
