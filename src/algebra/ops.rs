//! Holographic operations and accumulation policies.
//!
//! - **Bind (⊛)**: circular convolution, `IFFT(FFT(a) · FFT(b))`
//! - **Unbind (⊘)**: circular correlation, `IFFT(conj(FFT(cue)) · FFT(trace))`
//! - **Superpose (+)**: fold bound items into a trace under an [`Accumulation`] policy
//!
//! Bind and unbind cost O(d log d); similarity and permutation cost O(d).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::algebra::spectral;
use crate::algebra::vector::HrrVector;
use crate::config::NORM_EPSILON;
use crate::error::{ensure_same_dim, HrrError, Result};

/// Bind two vectors via circular convolution.
///
/// Commutative, approximately associative, distributes over addition.
/// The result is not renormalised.
pub fn bind(a: &HrrVector, b: &HrrVector) -> Result<HrrVector> {
    ensure_same_dim(a.dim(), b.dim())?;
    let spectrum: Vec<Complex64> = a
        .spectrum()
        .iter()
        .zip(b.spectrum().iter())
        .map(|(x, y)| x * y)
        .collect();
    Ok(HrrVector::from_array(spectral::inverse(spectrum)))
}

/// Unbind a cue from a trace via circular correlation.
///
/// If `trace = bind(cue, x)` then `unbind(trace, cue) ≈ x`, exactly so when
/// `cue` is unitary. Unrelated pairs in `trace` add cross-talk noise.
pub fn unbind(trace: &HrrVector, cue: &HrrVector) -> Result<HrrVector> {
    ensure_same_dim(trace.dim(), cue.dim())?;
    Ok(correlate(&trace.spectrum(), cue))
}

/// Correlate a cue against a precomputed trace spectrum.
pub(crate) fn correlate(trace_spectrum: &[Complex64], cue: &HrrVector) -> HrrVector {
    let spectrum: Vec<Complex64> = trace_spectrum
        .iter()
        .zip(cue.spectrum().iter())
        .map(|(t, c)| t * c.conj())
        .collect();
    HrrVector::from_array(spectral::inverse(spectrum))
}

/// Cosine similarity on the real part of the inner product.
///
/// Returns 0 when either operand's norm falls below the epsilon guard.
pub fn similarity(a: &HrrVector, b: &HrrVector) -> Result<f64> {
    let inner = a.dot(b)?;
    let denom = a.norm() * b.norm();
    if a.norm() < NORM_EPSILON || b.norm() < NORM_EPSILON || denom < NORM_EPSILON {
        return Ok(0.0);
    }
    Ok((inner.re / denom).clamp(-1.0, 1.0))
}

/// Cyclic rotation to the right: `out[i] = v[(i - shift) mod d]`.
pub fn permute(v: &HrrVector, shift: usize) -> HrrVector {
    let mut components = v.to_vec();
    if !components.is_empty() {
        let k = shift % components.len();
        components.rotate_right(k);
    }
    HrrVector::from_components(components)
}

/// Inverse of [`permute`]: `out[i] = v[(i + shift) mod d]`.
pub fn inverse_permute(v: &HrrVector, shift: usize) -> HrrVector {
    let mut components = v.to_vec();
    if !components.is_empty() {
        let k = shift % components.len();
        components.rotate_left(k);
    }
    HrrVector::from_components(components)
}

/// How bound items are folded into a trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Accumulation {
    /// Plain summation. Used by attention retrieval.
    Sum,
    /// Summation, then scaled to unit norm once all items are in.
    NormalizedSum,
    /// Exponential moving average: `trace = α·trace + (1-α)·item`.
    DecayedAverage { retention: f64 },
}

impl Accumulation {
    /// Fold one item into `trace`.
    pub fn fold_into(&self, trace: &mut HrrVector, item: &HrrVector) -> Result<()> {
        ensure_same_dim(trace.dim(), item.dim())?;
        match *self {
            Accumulation::Sum | Accumulation::NormalizedSum => trace.add_scaled(item, 1.0),
            Accumulation::DecayedAverage { retention } => {
                trace.scale(retention);
                trace.add_scaled(item, 1.0 - retention)
            }
        }
    }

    /// Post-processing once every item has been folded.
    pub fn finish(&self, trace: &mut HrrVector) {
        if let Accumulation::NormalizedSum = self {
            trace.normalize();
        }
    }

    /// Check policy parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Accumulation::DecayedAverage { retention } if !(retention > 0.0 && retention < 1.0) => {
                Err(HrrError::InvalidConfig(format!(
                    "retention must lie in (0, 1), got {}",
                    retention
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Superpose items into a fresh `dim`-dimensional trace under `policy`.
pub fn superpose<'a, I>(dim: usize, items: I, policy: Accumulation) -> Result<HrrVector>
where
    I: IntoIterator<Item = &'a HrrVector>,
{
    if dim == 0 {
        return Err(HrrError::ZeroDimension);
    }
    policy.validate()?;
    let mut trace = HrrVector::zeros(dim);
    for item in items {
        policy.fold_into(&mut trace, item)?;
    }
    policy.finish(&mut trace);
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_pair(dim: usize, seed: u64) -> (HrrVector, HrrVector) {
        let mut rng = StdRng::seed_from_u64(seed);
        (HrrVector::random(dim, &mut rng), HrrVector::random(dim, &mut rng))
    }

    #[test]
    fn test_bind_identity() {
        let a = HrrVector::from_real(&[0.1, 0.2, 0.3, 0.4]);
        let identity = HrrVector::from_real(&[1.0, 0.0, 0.0, 0.0]);
        let result = bind(&a, &identity).unwrap();
        for (x, y) in result.components().iter().zip(a.components().iter()) {
            assert!((x - y).norm() < 1e-12);
        }
    }

    #[test]
    fn test_bind_matches_direct_convolution() {
        let a = HrrVector::from_real(&[1.0, 2.0, 3.0]);
        let b = HrrVector::from_real(&[0.0, 1.0, 0.5]);
        let c = bind(&a, &b).unwrap();
        // c[n] = Σ_k a[k] · b[(n - k) mod 3]
        let expected = [1.0 * 0.0 + 2.0 * 0.5 + 3.0 * 1.0, 1.0 * 1.0 + 2.0 * 0.0 + 3.0 * 0.5, 1.0 * 0.5 + 2.0 * 1.0 + 3.0 * 0.0];
        for (got, want) in c.components().iter().zip(expected.iter()) {
            assert!((got.re - want).abs() < 1e-12);
            assert!(got.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_bind_commutative() {
        let (a, b) = random_pair(64, 1);
        let ab = bind(&a, &b).unwrap();
        let ba = bind(&b, &a).unwrap();
        assert!((similarity(&ab, &ba).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_round_trip() {
        let (a, b) = random_pair(256, 2);
        let recovered = unbind(&bind(&a, &b).unwrap(), &a).unwrap();
        let sim = similarity(&recovered, &b).unwrap();
        assert!(sim > 0.9, "sim = {}", sim);
    }

    #[test]
    fn test_bind_mismatch() {
        let a = HrrVector::zeros(8);
        let b = HrrVector::zeros(9);
        assert!(matches!(bind(&a, &b), Err(HrrError::DimensionMismatch { .. })));
        assert!(matches!(unbind(&a, &b), Err(HrrError::DimensionMismatch { .. })));
        assert!(matches!(similarity(&a, &b), Err(HrrError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_similarity_degenerate_is_zero() {
        let (a, _) = random_pair(32, 3);
        let z = HrrVector::zeros(32);
        let sim = similarity(&a, &z).unwrap();
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_unbind_by_zero_is_finite() {
        let (a, _) = random_pair(32, 4);
        let out = unbind(&a, &HrrVector::zeros(32)).unwrap();
        assert!(out.is_finite());
        assert!(out.is_degenerate());
    }

    #[test]
    fn test_similarity_self() {
        let (a, _) = random_pair(128, 5);
        assert!((similarity(&a, &a).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_permute_inverse() {
        let (a, _) = random_pair(50, 6);
        for shift in [0, 1, 7, 50, 123] {
            let back = inverse_permute(&permute(&a, shift), shift);
            assert_eq!(back, a);
        }
    }

    #[test]
    fn test_permute_direction() {
        let v = HrrVector::from_real(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(permute(&v, 1), HrrVector::from_real(&[4.0, 1.0, 2.0, 3.0]));
        assert_eq!(inverse_permute(&v, 1), HrrVector::from_real(&[2.0, 3.0, 4.0, 1.0]));
    }

    #[test]
    fn test_superpose_sum() {
        let a = HrrVector::from_real(&[1.0, 0.0]);
        let b = HrrVector::from_real(&[0.0, 2.0]);
        let s = superpose(2, [&a, &b], Accumulation::Sum).unwrap();
        assert_eq!(s, HrrVector::from_real(&[1.0, 2.0]));
    }

    #[test]
    fn test_superpose_normalized() {
        let a = HrrVector::from_real(&[3.0, 0.0]);
        let b = HrrVector::from_real(&[0.0, 4.0]);
        let s = superpose(2, [&a, &b], Accumulation::NormalizedSum).unwrap();
        assert!((s.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_superpose_decayed_average() {
        let a = HrrVector::from_real(&[1.0]);
        let policy = Accumulation::DecayedAverage { retention: 0.5 };
        let s = superpose(1, [&a, &a], policy).unwrap();
        // 0.5 · (0.5 · 1) + 0.5 · 1 = 0.75
        assert!((s.components()[0].re - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_superpose_rejects_bad_retention() {
        let a = HrrVector::from_real(&[1.0]);
        for retention in [0.0, 1.0, -0.1, f64::NAN] {
            let policy = Accumulation::DecayedAverage { retention };
            assert!(matches!(
                superpose(1, [&a], policy),
                Err(HrrError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_superpose_empty_is_zero() {
        let s = superpose(16, std::iter::empty(), Accumulation::NormalizedSum).unwrap();
        assert!(s.is_degenerate());
    }
}
