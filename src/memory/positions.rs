//! Position table: precomputed vectors for sequence indices.
//!
//! The table is generated once from a seed and never changes, so persisting
//! the seed is enough to rebuild it.
//!
//! Two encodings:
//! - **Rotation**: `position(p) = permute(base, p)`. Distinct positions are
//!   nearly orthogonal, so a token only matches at its exact index.
//! - **Fractional**: `position(p) = base^p` (p-fold self-binding) for a unitary
//!   base whose phases lie in `[-bandwidth, bandwidth]`. Neighbouring positions
//!   stay similar, `sim(p, p+Δ) ≈ sin(bΔ)/(bΔ)`, so a phrase still matches when
//!   it appears at a shifted offset.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::algebra::{permute, HrrVector};
use crate::config::DEFAULT_POSITION_BANDWIDTH;
use crate::error::{HrrError, Result};

/// How position vectors are generated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PositionEncoding {
    /// Successive cyclic rotations of one random base vector.
    Rotation,
    /// Successive powers of a band-limited unitary base vector.
    Fractional { bandwidth: f64 },
}

impl Default for PositionEncoding {
    fn default() -> Self {
        PositionEncoding::Fractional {
            bandwidth: DEFAULT_POSITION_BANDWIDTH,
        }
    }
}

impl PositionEncoding {
    /// Check the encoding for a table of `max_positions` vectors of dimension `dim`.
    ///
    /// Rotations repeat every `dim` steps, so a rotation table longer than
    /// `dim` would hand out duplicate positions.
    pub fn validate(&self, dim: usize, max_positions: usize) -> Result<()> {
        match *self {
            PositionEncoding::Rotation => {
                if max_positions > dim {
                    Err(HrrError::InvalidConfig(format!(
                        "rotation encoding gives at most {} distinct positions, {} requested",
                        dim, max_positions
                    )))
                } else {
                    Ok(())
                }
            }
            PositionEncoding::Fractional { bandwidth } => {
                if bandwidth.is_finite() && bandwidth > 0.0 && bandwidth <= PI {
                    Ok(())
                } else {
                    Err(HrrError::InvalidConfig(format!(
                        "position bandwidth must lie in (0, π], got {}",
                        bandwidth
                    )))
                }
            }
        }
    }
}

/// Immutable table of `max_positions` unit vectors, indexed from 1.
#[derive(Clone, Debug)]
pub struct PositionTable {
    positions: Vec<HrrVector>,
    encoding: PositionEncoding,
    seed: u64,
    dim: usize,
}

impl PositionTable {
    /// Generate the table deterministically from `seed`.
    pub fn generate(
        dim: usize,
        max_positions: usize,
        encoding: PositionEncoding,
        seed: u64,
    ) -> Result<Self> {
        if dim == 0 {
            return Err(HrrError::ZeroDimension);
        }
        if max_positions == 0 {
            return Err(HrrError::InvalidConfig(
                "max_positions must be at least 1".into(),
            ));
        }
        encoding.validate(dim, max_positions)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let positions: Vec<HrrVector> = match encoding {
            PositionEncoding::Rotation => {
                let base = HrrVector::random(dim, &mut rng);
                (1..=max_positions).map(|p| permute(&base, p)).collect()
            }
            PositionEncoding::Fractional { bandwidth } => {
                let band = Uniform::new_inclusive(-bandwidth, bandwidth);
                let phases: Vec<f64> = (0..dim).map(|_| band.sample(&mut rng)).collect();
                (1..=max_positions)
                    .map(|p| {
                        let spectrum = phases
                            .iter()
                            .map(|&theta| Complex64::from_polar(1.0, theta * p as f64))
                            .collect();
                        HrrVector::from_spectrum(spectrum)
                    })
                    .collect()
            }
        };

        tracing::debug!(dim, max_positions, ?encoding, seed, "position table generated");
        Ok(Self {
            positions,
            encoding,
            seed,
            dim,
        })
    }

    /// Vector for 1-based position `p`, or `None` past the end.
    pub fn position(&self, p: usize) -> Option<&HrrVector> {
        p.checked_sub(1).and_then(|i| self.positions.get(i))
    }

    /// Positions in order, starting at position 1.
    pub fn iter(&self) -> std::slice::Iter<'_, HrrVector> {
        self.positions.iter()
    }

    /// Number of positions (`max_positions`).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Seed the table was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    /// Memory footprint in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.positions.iter().map(HrrVector::size_bytes).sum()
    }
}
