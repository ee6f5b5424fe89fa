//! Error types returned by this crate's signing and construction APIs.
//!
//! [`Verify`][crate::signature::verify] never returns an error: per the
//! protocol's failure semantics, verification collapses every possible
//! failure into `false`.

/// The result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while signing or constructing key/ring material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// The signer's own public key was not found in the ring after sorting.
    #[cfg_attr(feature = "std", error("signer's public key is not present in the ring"))]
    SignerNotInRing,

    /// The injected randomness source returned fewer bytes than requested.
    #[cfg_attr(feature = "std", error("short read from randomness source"))]
    RandomnessFailure,

    /// A `RingSign` failed to parse: wrong field count, an empty numeric
    /// field, or a version-byte mismatch.
    #[cfg_attr(feature = "std", error("malformed ring signature encoding"))]
    MalformedSignature,

    /// `sign` or `verify` was called with a ring of size zero.
    #[cfg_attr(feature = "std", error("public key ring is empty"))]
    EmptyRing,

    /// A caller-supplied `(X, Y)` pair is not a valid, non-identity point on
    /// the curve.
    #[cfg_attr(feature = "std", error("coordinates do not describe a valid curve point"))]
    InvalidPoint,
}

#[cfg(not(feature = "std"))]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::SignerNotInRing => "signer's public key is not present in the ring",
            Error::RandomnessFailure => "short read from randomness source",
            Error::MalformedSignature => "malformed ring signature encoding",
            Error::EmptyRing => "public key ring is empty",
            Error::InvalidPoint => "coordinates do not describe a valid curve point",
        };
        f.write_str(msg)
    }
}
