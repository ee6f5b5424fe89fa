//! The signature engine: `RingSign`, `sign`, and `verify`
//! (`SPEC_FULL.md` §4.5, §4.6).

use k256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::hash::{hash_all_q, hash_to_group, ShareBytes};
use crate::hazmat;
use crate::key::PrivateKey;
use crate::ring::PublicKeyRing;
use crate::scalar::{minimal_be_bytes, random_field_element, scalar_from_minimal_bytes};

/// A completed ring signature: two tag points and one challenge/response
/// pair per ring index.
///
/// Fields are stored as raw minimal big-endian byte vectors rather than
/// curve-typed values, so that a textually decoded signature can be held
/// (and re-serialized) before [`verify`] has had a chance to validate it —
/// exactly like the reference implementation's untyped `*big.Int` fields.
/// [`sign`] always produces a `RingSign` from already-valid curve values, so
/// on the happy path every field is valid by construction; [`verify`] is the
/// only place raw bytes are promoted to `Scalar`/point types, under the
/// pre-checks of `SPEC_FULL.md` §4.6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSign {
    pub(crate) x: Vec<u8>,
    pub(crate) y: Vec<u8>,
    pub(crate) xp: Vec<u8>,
    pub(crate) yp: Vec<u8>,
    pub(crate) c: Vec<Vec<u8>>,
    pub(crate) t: Vec<Vec<u8>>,
}

impl RingSign {
    pub(crate) fn from_parts(
        tau1: ProjectivePoint,
        tau2: ProjectivePoint,
        c: Vec<Scalar>,
        t: Vec<Scalar>,
    ) -> Self {
        let (x, y) = hazmat::affine_coordinates(&tau1.to_affine());
        let (xp, yp) = hazmat::affine_coordinates(&tau2.to_affine());
        RingSign {
            x: minimal_be_bytes(&x),
            y: minimal_be_bytes(&y),
            xp: minimal_be_bytes(&xp),
            yp: minimal_be_bytes(&yp),
            c: c.iter().map(minimal_be_bytes_of_scalar).collect(),
            t: t.iter().map(minimal_be_bytes_of_scalar).collect(),
        }
    }

    /// Number of ring indices this signature was produced over, i.e. `|C|`.
    /// A malformed signature (unequal `|C|`/`|T|`) has no single well
    /// defined ring size; callers that need to know should go through
    /// [`verify`], which checks `|C| == |T| == n` first.
    pub fn challenge_count(&self) -> usize {
        self.c.len()
    }
}

fn minimal_be_bytes_of_scalar(s: &Scalar) -> Vec<u8> {
    crate::scalar::scalar_minimal_bytes(s)
}

/// Runs `f` over `0..n`, in parallel when the `parallel` feature is enabled
/// and sequentially otherwise. Used for the per-ring-index commitment
/// computation in both [`sign`] and [`verify`] (`SPEC_FULL.md` §5).
fn compute_all<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..n).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(f).collect()
    }
}

fn ring_transcripts(ring: &PublicKeyRing, m: &[u8], v: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let ring_bytes = ring.bytes();
    let mut m_r = Vec::with_capacity(m.len() + ring_bytes.len());
    m_r.extend_from_slice(m);
    m_r.extend_from_slice(&ring_bytes);

    let mut mv_r = Vec::with_capacity(m.len() + v.len() + ring_bytes.len());
    mv_r.extend_from_slice(m);
    mv_r.extend_from_slice(v);
    mv_r.extend_from_slice(&ring_bytes);

    (m_r, mv_r)
}

fn share_bytes(a: &ProjectivePoint, b: &ProjectivePoint, bp: &ProjectivePoint) -> ShareBytes {
    let (ax, ay) = hazmat::affine_coordinates(&a.to_affine());
    let (bx, by) = hazmat::affine_coordinates(&b.to_affine());
    let (bpx, bpy) = hazmat::affine_coordinates(&bp.to_affine());
    ShareBytes {
        ax: minimal_be_bytes(&ax),
        ay: minimal_be_bytes(&ay),
        bx: minimal_be_bytes(&bx),
        by: minimal_be_bytes(&by),
        bpx: minimal_be_bytes(&bpx),
        bpy: minimal_be_bytes(&bpy),
    }
}

/// Signs `m` (with auxiliary linkage input `v`) as a member of `ring`,
/// sorting `ring` in place first.
///
/// `ring` must already contain `priv_key`'s public key (see
/// [`PublicKeyRing::ensure_present`]); otherwise this fails with
/// [`Error::SignerNotInRing`] rather than inserting it, per `SPEC_FULL.md`
/// §6's scoping of key-ring augmentation to the (out of scope) external
/// parser.
pub fn sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    priv_key: &PrivateKey,
    ring: &mut PublicKeyRing,
    m: &[u8],
    v: &[u8],
) -> Result<RingSign> {
    ring.sort();
    let n = ring.len();
    if n == 0 {
        return Err(Error::EmptyRing);
    }

    let id = ring
        .position_of(priv_key.public_key())
        .ok_or(Error::SignerNotInRing)?;

    let (m_r, mv_r) = ring_transcripts(ring, m, v);
    let h1 = hash_to_group(&m_r);
    let h2 = hash_to_group(&mv_r);

    let d = *priv_key.scalar();
    let tau1 = hazmat::scalar_mult(&h1, &d);
    let tau2 = hazmat::scalar_mult(&h2, &d);

    // Randomness is drawn sequentially (it needs exclusive access to `rng`);
    // only the expensive scalar-multiplication work below is fanned out.
    let mut c = Vec::with_capacity(n);
    let mut t = Vec::with_capacity(n);
    for _ in 0..n {
        c.push(random_field_element(rng)?);
        t.push(random_field_element(rng)?);
    }

    // Reborrowed immutably: `&mut PublicKeyRing` itself is never `Sync`, so
    // the parallel closure below needs a plain shared reference to capture.
    let ring_ref: &PublicKeyRing = ring;
    let shares: Vec<(ProjectivePoint, ProjectivePoint, ProjectivePoint)> =
        compute_all(n, |j| {
            if j == id {
                let r = t[j];
                let a = hazmat::scalar_base_mult(&r);
                let b = hazmat::scalar_mult(&h1, &r);
                let bp = hazmat::scalar_mult(&h2, &r);
                (a, b, bp)
            } else {
                let rj = ring_ref.get(j).as_projective();
                let a = hazmat::add(&hazmat::scalar_base_mult(&t[j]), &hazmat::scalar_mult(&rj, &c[j]));
                let w = d * c[j] + t[j];
                let b = hazmat::scalar_mult(&h1, &w);
                let bp = hazmat::scalar_mult(&h2, &w);
                (a, b, bp)
            }
        });

    let share_records: Vec<ShareBytes> = shares
        .iter()
        .map(|(a, b, bp)| share_bytes(a, b, bp))
        .collect();

    let sum = (0..n).fold(Scalar::ZERO, |acc, j| if j == id { acc } else { acc + c[j] });

    let (tau1_x, tau1_y) = hazmat::affine_coordinates(&tau1.to_affine());
    let (tau2_x, tau2_y) = hazmat::affine_coordinates(&tau2.to_affine());
    let tau1_x = minimal_be_bytes(&tau1_x);
    let tau1_y = minimal_be_bytes(&tau1_y);
    let tau2_x = minimal_be_bytes(&tau2_x);
    let tau2_y = minimal_be_bytes(&tau2_y);

    let h = hash_all_q(
        &mv_r,
        (&tau1_x, &tau1_y),
        (&tau2_x, &tau2_y),
        &share_records,
    );

    let r = t[id];
    c[id] = h - sum;
    t[id] = r - d * c[id];

    Ok(RingSign::from_parts(tau1, tau2, c, t))
}

/// Signs as [`sign`] does, then verifies the result before returning it,
/// turning an internal inconsistency into [`Error::MalformedSignature`]
/// instead of handing the caller a signature that won't verify.
///
/// `SPEC_FULL.md` §4.5 calls this out as the "self-check" the reference
/// implementation always performs; this crate makes it an explicit opt-in
/// so callers that have already exercised it in their own tests don't pay
/// for a second full verification on every signature.
pub fn sign_checked<R: RngCore + CryptoRng>(
    rng: &mut R,
    priv_key: &PrivateKey,
    ring: &mut PublicKeyRing,
    m: &[u8],
    v: &[u8],
) -> Result<RingSign> {
    let rs = sign(rng, priv_key, ring, m, v)?;
    if verify(ring, m, v, &rs) {
        Ok(rs)
    } else {
        Err(Error::MalformedSignature)
    }
}

/// Verifies `rs` over `(m, v)` against `ring`, sorting `ring` in place
/// first. Never panics; every failure mode collapses to `false`.
pub fn verify(ring: &mut PublicKeyRing, m: &[u8], v: &[u8], rs: &RingSign) -> bool {
    ring.sort();
    let n = ring.len();
    if n == 0 {
        return false;
    }
    if rs.c.len() != n || rs.t.len() != n {
        return false;
    }

    let tau1_affine = match parse_tag_point(&rs.x, &rs.y) {
        Some(p) => p,
        None => return false,
    };
    let tau2_affine = match parse_tag_point(&rs.xp, &rs.yp) {
        Some(p) => p,
        None => return false,
    };

    let mut c = Vec::with_capacity(n);
    let mut t = Vec::with_capacity(n);
    for j in 0..n {
        let cj = match scalar_from_minimal_bytes(&rs.c[j]) {
            Some(s) => s,
            None => return false,
        };
        let tj = match scalar_from_minimal_bytes(&rs.t[j]) {
            Some(s) => s,
            None => return false,
        };
        c.push(cj);
        t.push(tj);
    }

    let (m_r, mv_r) = ring_transcripts(ring, m, v);
    let h1 = hash_to_group(&m_r);
    let h2 = hash_to_group(&mv_r);

    let tau1 = ProjectivePoint::from(tau1_affine);
    let tau2 = ProjectivePoint::from(tau2_affine);

    let ring_ref: &PublicKeyRing = ring;
    let shares: Vec<(ProjectivePoint, ProjectivePoint, ProjectivePoint)> = compute_all(n, |j| {
        let rj = ring_ref.get(j).as_projective();
        let a = hazmat::add(&hazmat::scalar_base_mult(&t[j]), &hazmat::scalar_mult(&rj, &c[j]));
        let b = hazmat::add(&hazmat::scalar_mult(&h1, &t[j]), &hazmat::scalar_mult(&tau1, &c[j]));
        let bp = hazmat::add(&hazmat::scalar_mult(&h2, &t[j]), &hazmat::scalar_mult(&tau2, &c[j]));
        (a, b, bp)
    });

    let share_records: Vec<ShareBytes> = shares
        .iter()
        .map(|(a, b, bp)| share_bytes(a, b, bp))
        .collect();

    let sum = c.iter().fold(Scalar::ZERO, |acc, cj| acc + cj);
    let h = hash_all_q(&mv_r, (&rs.x, &rs.y), (&rs.xp, &rs.yp), &share_records);

    sum == h
}

/// Parses a tag point's raw coordinates under the §4.6 pre-checks: nonzero,
/// `< N`, and on-curve.
fn parse_tag_point(x: &[u8], y: &[u8]) -> Option<k256::AffinePoint> {
    if x.is_empty() || y.is_empty() {
        return None;
    }
    if !hazmat::coordinate_lt_order(x) || !hazmat::coordinate_lt_order(y) {
        return None;
    }
    let x_fb = hazmat::pad_to_field_bytes(x)?;
    let y_fb = hazmat::pad_to_field_bytes(y)?;
    hazmat::affine_from_coordinates(&x_fb, &y_fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::PrivateKey;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn ring_of(n: usize, rng: &mut ChaCha20Rng) -> (Vec<PrivateKey>, PublicKeyRing) {
        let mut ring = PublicKeyRing::new(n);
        let mut keys = Vec::with_capacity(n);
        for _ in 0..n {
            let k = PrivateKey::random(rng).unwrap();
            ring.add(*k.public_key());
            keys.push(k);
        }
        (keys, ring)
    }

    #[test]
    fn single_key_ring_self_signature_verifies() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let priv_key = PrivateKey::random(&mut rng).unwrap();
        let mut ring = PublicKeyRing::new(1);
        ring.add(*priv_key.public_key());

        let rs = sign(&mut rng, &priv_key, &mut ring, b"hello", b"v1").unwrap();
        assert!(verify(&mut ring, b"hello", b"v1", &rs));
    }

    #[test]
    fn three_key_ring_verifies_for_any_signer() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let (keys, ring) = ring_of(3, &mut rng);
        for signer in &keys {
            let mut r = ring.clone();
            let rs = sign(&mut rng, signer, &mut r, b"pollID", b"myVoteIs10").unwrap();
            assert!(verify(&mut r, b"pollID", b"myVoteIs10", &rs));
        }
    }

    #[test]
    fn signer_not_in_ring_fails() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let (_keys, mut ring) = ring_of(2, &mut rng);
        let outsider = PrivateKey::random(&mut rng).unwrap();
        let err = sign(&mut rng, &outsider, &mut ring, b"m", b"v").unwrap_err();
        assert_eq!(err, Error::SignerNotInRing);
    }

    #[test]
    fn linkability_same_tags_different_shares() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let priv_key = PrivateKey::random(&mut rng).unwrap();
        let mut ring = PublicKeyRing::new(1);
        ring.add(*priv_key.public_key());

        let rs1 = sign(&mut rng, &priv_key, &mut ring, b"m", b"v").unwrap();
        let rs2 = sign(&mut rng, &priv_key, &mut ring, b"m", b"v").unwrap();
        assert_eq!(rs1.x, rs2.x);
        assert_eq!(rs1.y, rs2.y);
        assert_eq!(rs1.xp, rs2.xp);
        assert_eq!(rs1.yp, rs2.yp);
        assert_ne!(rs1.c, rs2.c);
    }

    #[test]
    fn different_v_changes_only_second_tag() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let priv_key = PrivateKey::random(&mut rng).unwrap();
        let mut ring = PublicKeyRing::new(1);
        ring.add(*priv_key.public_key());

        let rs1 = sign(&mut rng, &priv_key, &mut ring, b"m", b"v1").unwrap();
        let rs2 = sign(&mut rng, &priv_key, &mut ring, b"m", b"v2").unwrap();
        assert_eq!(rs1.x, rs2.x);
        assert_eq!(rs1.y, rs2.y);
        assert_ne!((rs1.xp, rs1.yp), (rs2.xp, rs2.yp));
    }

    #[test]
    fn corrupted_challenge_fails_verification() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let priv_key = PrivateKey::random(&mut rng).unwrap();
        let mut ring = PublicKeyRing::new(1);
        ring.add(*priv_key.public_key());

        let mut rs = sign(&mut rng, &priv_key, &mut ring, b"m", b"v").unwrap();
        let bumped = scalar_from_minimal_bytes(&rs.c[0]).unwrap() + Scalar::ONE;
        rs.c[0] = minimal_be_bytes_of_scalar(&bumped);
        assert!(!verify(&mut ring, b"m", b"v", &rs));
    }

    #[test]
    fn empty_ring_fails_both_ways() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let priv_key = PrivateKey::random(&mut rng).unwrap();
        let mut ring = PublicKeyRing::new(0);
        assert_eq!(
            sign(&mut rng, &priv_key, &mut ring, b"m", b"v").unwrap_err(),
            Error::EmptyRing
        );
        let rs = RingSign {
            x: vec![1],
            y: vec![1],
            xp: vec![1],
            yp: vec![1],
            c: vec![],
            t: vec![],
        };
        assert!(!verify(&mut ring, b"m", b"v", &rs));
    }
}
