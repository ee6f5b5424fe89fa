//! Deterministic, test-only key generation.
//!
//! Mirrors `ecdsa`'s `dev` convention of keeping reproducible test fixtures
//! out of the main API surface: nothing here is part of the public crate
//! interface, and none of it ships outside `#[cfg(test)]`/doctest builds.

use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use crate::key::PrivateKey;
use crate::ring::PublicKeyRing;

/// A deterministic `(ring, signer private keys)` fixture seeded from `seed`,
/// for tests that need a fixed, reproducible ring (e.g. the "same seed
/// signs the same thing twice" scenario).
pub(crate) fn fixed_ring(seed: u64, size: usize) -> (PublicKeyRing, Vec<PrivateKey>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut ring = PublicKeyRing::new(size);
    let mut keys = Vec::with_capacity(size);
    for _ in 0..size {
        let key = PrivateKey::random(&mut rng).expect("ChaCha20Rng never runs dry");
        ring.add(*key.public_key());
        keys.push(key);
    }
    (ring, keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_ring() {
        let (ring_a, _) = fixed_ring(99, 4);
        let (ring_b, _) = fixed_ring(99, 4);
        assert_eq!(ring_a.bytes(), ring_b.bytes());
    }
}
