#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, rust_2018_idioms)]
#![doc(
    html_root_url = "https://docs.rs/urs/0.1.0-pre.0"
)]

//! Unique ring signatures over secp256k1.
//!
//! A unique (linkable) ring signature lets any member of a set of public
//! keys (a "ring") sign a message on the set's behalf without revealing
//! which member signed, while guaranteeing that the same signer producing
//! two signatures over the same `(ring, message-binding value)` pair yields
//! a publicly detectable collision in the signature's tag points — without
//! revealing which ring member caused it.
//!
//! ```
//! use rand_chacha::ChaCha20Rng;
//! use rand_core::SeedableRng;
//! use urs::{sign, verify, PrivateKey, PublicKeyRing};
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//! let signer = PrivateKey::random(&mut rng).unwrap();
//! let mut ring = PublicKeyRing::new(1);
//! ring.add(*signer.public_key());
//!
//! let rs = sign(&mut rng, &signer, &mut ring, b"ballot", b"candidate-7").unwrap();
//! assert!(verify(&mut ring, b"ballot", b"candidate-7", &rs));
//! ```

pub(crate) mod hazmat;

mod codec;
#[cfg(test)]
mod dev;
mod error;
mod hash;
mod key;
mod ring;
mod scalar;
mod signature;

pub use error::{Error, Result};
pub use key::{PrivateKey, PublicKey};
pub use ring::PublicKeyRing;
pub use signature::{sign, sign_checked, verify, RingSign};
