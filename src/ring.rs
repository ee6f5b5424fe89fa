//! `PublicKeyRing` (`SPEC_FULL.md` §4.4): an ordered, sortable collection of
//! public keys.

use crate::key::PublicKey;
use crate::scalar::minimal_be_bytes;

/// An ordered sequence of public keys, canonicalized by [`PublicKeyRing::sort`]
/// before any cryptographic operation touches it.
#[derive(Clone, Debug, Default)]
pub struct PublicKeyRing {
    keys: Vec<PublicKey>,
}

impl PublicKeyRing {
    /// An empty ring with room for `capacity` keys before reallocating.
    pub fn new(capacity: usize) -> Self {
        PublicKeyRing {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Appends a key. No deduplication: duplicate keys are permitted
    /// (`SPEC_FULL.md` §4.5 tie-breaks).
    pub fn add(&mut self, pub_key: PublicKey) {
        self.keys.push(pub_key);
    }

    /// Appends `pub_key` unless it (or an equal key) is already present.
    ///
    /// This is the explicit "ensure signer present" helper `SPEC_FULL.md`
    /// §4.4/§9 calls for, replacing the original's habit of burying the
    /// insertion inside descriptor parsing.
    pub fn ensure_present(&mut self, pub_key: &PublicKey) {
        if !self.contains(pub_key) {
            self.keys.push(*pub_key);
        }
    }

    /// Sorts in place by `(X, Y)`, total because distinct curve points have
    /// distinct coordinates.
    pub fn sort(&mut self) {
        self.keys.sort();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Linear scan for `pub_key` under point equality.
    pub fn contains(&self, pub_key: &PublicKey) -> bool {
        self.keys.iter().any(|k| k == pub_key)
    }

    /// The index of the first ring member equal to `pub_key`, if any.
    pub(crate) fn position_of(&self, pub_key: &PublicKey) -> Option<usize> {
        self.keys.iter().position(|k| k == pub_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PublicKey> {
        self.keys.iter()
    }

    pub(crate) fn get(&self, index: usize) -> &PublicKey {
        &self.keys[index]
    }

    /// Concatenation, in current order, of each member's minimal big-endian
    /// `X ‖ Y` bytes. Callers are expected to have called [`Self::sort`]
    /// first; this method does not sort for them (matching the original,
    /// which serializes whatever order the ring is currently in).
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for key in &self.keys {
            let (x, y) = key.coordinates();
            out.extend(minimal_be_bytes(&x));
            out.extend(minimal_be_bytes(&y));
        }
        out
    }
}
