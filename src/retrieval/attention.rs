//! Holographic attention: O(T) key/value retrieval through one trace.
//!
//! Every `(key, value)` pair is bound and summed (no decay) into a transient
//! trace; each query then unbinds that trace once. Total cost is
//! O(T · d log d) against O(T² · d) for pairwise dot-product attention.
//!
//! There is no causal mask: every pair is visible to every query.

use rayon::prelude::*;

use crate::algebra::ops::correlate;
use crate::algebra::{bind_batch, superpose, unbind_spectrum_batch, Accumulation, HrrVector};
use crate::error::{ensure_same_dim, HrrError, Result};

/// Transient key/value trace, reusable across query batches.
#[derive(Clone, Debug)]
pub struct HolographicAttention {
    trace: HrrVector,
    spectrum: Vec<num_complex::Complex64>,
    pairs: usize,
}

impl HolographicAttention {
    /// Bind and sum every `(keys[i], values[i])`.
    pub fn build(keys: &[HrrVector], values: &[HrrVector]) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(HrrError::LengthMismatch {
                expected: keys.len(),
                found: values.len(),
            });
        }
        let dim = match keys.first() {
            Some(k) => k.dim(),
            None => {
                return Err(HrrError::InvalidConfig(
                    "attention needs at least one key/value pair".into(),
                ))
            }
        };
        for v in keys.iter().chain(values) {
            ensure_same_dim(dim, v.dim())?;
        }

        let bound = bind_batch(keys, values)?;
        let trace = superpose(dim, &bound, Accumulation::Sum)?;
        let spectrum = trace.spectrum();
        tracing::trace!(pairs = keys.len(), dim, "attention trace built");
        Ok(Self {
            trace,
            spectrum,
            pairs: keys.len(),
        })
    }

    /// Unbind one query from the trace.
    pub fn query(&self, query: &HrrVector) -> Result<HrrVector> {
        ensure_same_dim(self.dim(), query.dim())?;
        Ok(correlate(&self.spectrum, query))
    }

    /// Unbind every query in parallel. Output order follows input order.
    pub fn query_all(&self, queries: &[HrrVector]) -> Result<Vec<HrrVector>> {
        unbind_spectrum_batch(&self.spectrum, queries)
    }

    pub fn trace(&self) -> &HrrVector {
        &self.trace
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    pub fn dim(&self) -> usize {
        self.trace.dim()
    }
}

/// `outputs[i] = unbind(Σ bind(keys[j], values[j]), queries[i])`.
///
/// All three arrays must have the same length and dimension. Empty input
/// gives empty output.
pub fn holographic_attention(
    queries: &[HrrVector],
    keys: &[HrrVector],
    values: &[HrrVector],
) -> Result<Vec<HrrVector>> {
    if queries.len() != keys.len() {
        return Err(HrrError::LengthMismatch {
            expected: queries.len(),
            found: keys.len(),
        });
    }
    if queries.is_empty() && values.is_empty() {
        return Ok(Vec::new());
    }
    HolographicAttention::build(keys, values)?.query_all(queries)
}

/// Softmax dot-product attention over every (query, key) pair, O(T² · d).
///
/// Scores are `scale · Re⟨query, key⟩`.
pub fn pairwise_attention(
    queries: &[HrrVector],
    keys: &[HrrVector],
    values: &[HrrVector],
    scale: f64,
) -> Result<Vec<HrrVector>> {
    if queries.len() != keys.len() || keys.len() != values.len() {
        return Err(HrrError::LengthMismatch {
            expected: queries.len(),
            found: if queries.len() != keys.len() {
                keys.len()
            } else {
                values.len()
            },
        });
    }
    let dim = match queries.first() {
        Some(q) => q.dim(),
        None => return Ok(Vec::new()),
    };
    for v in queries.iter().chain(keys).chain(values) {
        ensure_same_dim(dim, v.dim())?;
    }

    queries
        .par_iter()
        .map(|q| -> Result<HrrVector> {
            let scores = keys
                .iter()
                .map(|k| q.dot(k).map(|d| scale * d.re))
                .collect::<Result<Vec<f64>>>()?;
            let weights = softmax(&scores);
            let mut out = HrrVector::zeros(dim);
            for (w, v) in weights.iter().zip(values) {
                out.add_scaled(v, *w)?;
            }
            Ok(out)
        })
        .collect()
}

fn softmax(x: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = x.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        exp.into_iter().map(|e| e / sum).collect()
    } else {
        vec![1.0 / x.len() as f64; x.len()]
    }
}
