//! Core HRR vector type.
//!
//! A vector is `d` complex components held in an `ndarray::Array1`. Symbols
//! are generated *unitary*: every spectral coefficient has magnitude 1, which
//! makes them unit-norm and makes unbinding an isolated pair exact.

use std::f64::consts::PI;
use std::fmt;

use ndarray::{Array1, Zip};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::algebra::spectral;
use crate::config::NORM_EPSILON;
use crate::error::{ensure_same_dim, HrrError, Result};

/// A fixed-dimension complex vector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct HrrVector {
    components: Array1<Complex64>,
}

impl HrrVector {
    /// The zero vector (an empty trace).
    pub fn zeros(dim: usize) -> Self {
        Self {
            components: Array1::from_elem(dim, Complex64::new(0.0, 0.0)),
        }
    }

    /// Random unitary vector: unit-magnitude spectrum, phases iid uniform on [-π, π).
    pub fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self {
        let phase = Uniform::new(-PI, PI);
        let spectrum: Vec<Complex64> = (0..dim)
            .map(|_| Complex64::from_polar(1.0, phase.sample(rng)))
            .collect();
        Self::from_spectrum(spectrum)
    }

    /// Build from spectral coefficients, normalised to unit length.
    pub fn from_spectrum(spectrum: Vec<Complex64>) -> Self {
        let mut v = Self {
            components: spectral::inverse(spectrum),
        };
        v.normalize();
        v
    }

    /// Build a unit vector from raw components.
    ///
    /// Errors with `DegenerateVector` if the input has (near) zero norm.
    pub fn unit(components: Vec<Complex64>) -> Result<Self> {
        if components.is_empty() {
            return Err(HrrError::ZeroDimension);
        }
        let mut v = Self::from_components(components);
        let norm = v.normalize();
        if norm < NORM_EPSILON {
            return Err(HrrError::DegenerateVector { norm });
        }
        Ok(v)
    }

    /// Wrap raw components without normalising (traces, intermediate results).
    pub fn from_components(components: Vec<Complex64>) -> Self {
        Self {
            components: Array1::from_vec(components),
        }
    }

    /// Wrap a real-valued signal (imaginary parts zero), without normalising.
    pub fn from_real(values: &[f64]) -> Self {
        Self {
            components: values.iter().map(|&r| Complex64::new(r, 0.0)).collect(),
        }
    }

    pub(crate) fn from_array(components: Array1<Complex64>) -> Self {
        Self { components }
    }

    /// Number of components `d`.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Borrow the components.
    pub fn components(&self) -> &Array1<Complex64> {
        &self.components
    }

    /// Copy the components out.
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.components.to_vec()
    }

    /// Forward transform of this vector.
    pub fn spectrum(&self) -> Vec<Complex64> {
        spectral::forward(&self.components)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.components.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
    }

    /// True if the norm is below the epsilon guard.
    pub fn is_degenerate(&self) -> bool {
        self.norm() < NORM_EPSILON
    }

    /// Complex inner product `Σ a_i · conj(b_i)`.
    pub fn dot(&self, other: &HrrVector) -> Result<Complex64> {
        ensure_same_dim(self.dim(), other.dim())?;
        Ok(self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b.conj())
            .sum())
    }

    /// Scale to unit norm in place and return the previous norm.
    /// A degenerate vector is left untouched.
    pub fn normalize(&mut self) -> f64 {
        let norm = self.norm();
        if norm >= NORM_EPSILON {
            let inv = 1.0 / norm;
            self.components.mapv_inplace(|c| c * inv);
        }
        norm
    }

    /// Unit-norm copy.
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Multiply every component by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.components.mapv_inplace(|c| c * factor);
    }

    /// `self += weight · other`.
    pub fn add_scaled(&mut self, other: &HrrVector, weight: f64) -> Result<()> {
        ensure_same_dim(self.dim(), other.dim())?;
        Zip::from(&mut self.components)
            .and(&other.components)
            .for_each(|a, &b| *a += b * weight);
        Ok(())
    }

    /// Reset every component to zero.
    pub fn clear(&mut self) {
        self.components.fill(Complex64::new(0.0, 0.0));
    }

    /// All components finite (no NaN / Inf).
    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|c| c.re.is_finite() && c.im.is_finite())
    }

    /// Memory footprint of the components in bytes.
    pub fn size_bytes(&self) -> usize {
        self.dim() * std::mem::size_of::<Complex64>()
    }
}

impl fmt::Debug for HrrVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HrrVector(dim={}, norm={:.6})", self.dim(), self.norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zeros() {
        let v = HrrVector::zeros(64);
        assert_eq!(v.dim(), 64);
        assert_eq!(v.norm(), 0.0);
        assert!(v.is_degenerate());
    }

    #[test]
    fn test_random_is_unit_norm() {
        let mut rng = StdRng::seed_from_u64(7);
        for dim in [1, 2, 17, 256, 1000] {
            let v = HrrVector::random(dim, &mut rng);
            assert!((v.norm() - 1.0).abs() < 1e-9, "dim={} norm={}", dim, v.norm());
        }
    }

    #[test]
    fn test_random_spectrum_is_flat() {
        let mut rng = StdRng::seed_from_u64(11);
        let v = HrrVector::random(128, &mut rng);
        // unit norm over 128 bins => each |X_k| = 1 under the unnormalised FFT
        for c in v.spectrum() {
            assert!((c.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unit_rejects_zero() {
        let err = HrrVector::unit(vec![Complex64::new(0.0, 0.0); 4]).unwrap_err();
        assert!(matches!(err, HrrError::DegenerateVector { .. }));
        assert_eq!(HrrVector::unit(Vec::new()).unwrap_err(), HrrError::ZeroDimension);
    }

    #[test]
    fn test_unit_normalises() {
        let v = HrrVector::unit(vec![Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)]).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_leaves_zero() {
        let mut v = HrrVector::zeros(8);
        let prev = v.normalize();
        assert_eq!(prev, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_add_scaled() {
        let mut a = HrrVector::from_real(&[1.0, 2.0, 3.0]);
        let b = HrrVector::from_real(&[1.0, 1.0, 1.0]);
        a.add_scaled(&b, 0.5).unwrap();
        assert_eq!(a, HrrVector::from_real(&[1.5, 2.5, 3.5]));
    }

    #[test]
    fn test_add_scaled_mismatch() {
        let mut a = HrrVector::zeros(3);
        let b = HrrVector::zeros(4);
        assert!(matches!(
            a.add_scaled(&b, 1.0),
            Err(HrrError::DimensionMismatch { expected: 3, found: 4 })
        ));
    }

    #[test]
    fn test_dot_conjugates_rhs() {
        let a = HrrVector::from_components(vec![Complex64::new(0.0, 1.0)]);
        let d = a.dot(&a).unwrap();
        assert!((d - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_clear_and_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut v = HrrVector::random(32, &mut rng);
        v.clear();
        assert_eq!(v.norm(), 0.0);
        assert_eq!(v.size_bytes(), 32 * 16);
    }
}
