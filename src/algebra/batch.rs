//! Batched operations parallelised with rayon.
//!
//! The algebra is pure, so independent binds and unbinds fan out across the
//! thread pool with no shared mutable state.

use num_complex::Complex64;
use rayon::prelude::*;

use crate::algebra::ops::{bind, correlate, similarity};
use crate::algebra::vector::HrrVector;
use crate::error::{ensure_same_dim, HrrError, Result};

/// Bind `left[i]` with `right[i]` in parallel. Output order follows input order.
pub fn bind_batch(left: &[HrrVector], right: &[HrrVector]) -> Result<Vec<HrrVector>> {
    if left.len() != right.len() {
        return Err(HrrError::LengthMismatch {
            expected: left.len(),
            found: right.len(),
        });
    }
    left.par_iter()
        .zip(right.par_iter())
        .map(|(a, b)| bind(a, b))
        .collect()
}

/// Unbind each cue from one trace. The trace spectrum is computed once.
pub fn unbind_batch(trace: &HrrVector, cues: &[HrrVector]) -> Result<Vec<HrrVector>> {
    unbind_spectrum_batch(&trace.spectrum(), cues)
}

/// Unbind each cue against a precomputed trace spectrum.
pub fn unbind_spectrum_batch(
    trace_spectrum: &[Complex64],
    cues: &[HrrVector],
) -> Result<Vec<HrrVector>> {
    for cue in cues {
        ensure_same_dim(trace_spectrum.len(), cue.dim())?;
    }
    Ok(cues
        .par_iter()
        .map(|cue| correlate(trace_spectrum, cue))
        .collect())
}

/// Similarity of `probe` against every candidate.
pub fn similarity_batch(probe: &HrrVector, candidates: &[HrrVector]) -> Result<Vec<f64>> {
    candidates
        .par_iter()
        .map(|candidate| similarity(probe, candidate))
        .collect()
}
