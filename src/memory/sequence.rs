//! Sequence memory bank: recency-weighted memory of token streams.
//!
//! Each token is bound to the vector for its position in the text and folded
//! into the trace with an exponential moving average:
//! `trace = α·trace + (1-α)·bind(token, position(p))`.
//! Older material fades geometrically while storage stays at `d` components
//! regardless of how much text has been seen.
//!
//! Tokenisation is fixed: split on whitespace, lowercase. Nothing more.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algebra::{bind, similarity, superpose, Accumulation, HrrVector};
use crate::config::{DEFAULT_DIM, DEFAULT_MAX_POSITIONS, DEFAULT_RETENTION};
use crate::error::{ensure_same_dim, HrrError, Result};
use crate::memory::positions::{PositionEncoding, PositionTable};
use crate::memory::snapshot::TraceSnapshot;
use crate::memory::symbols::{SymbolPolicy, SymbolRng, SymbolTable};

/// Split on whitespace and lowercase each token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Sequence bank configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Vector dimension.
    pub dim: usize,

    /// Number of position vectors; tokens beyond this are dropped.
    pub max_positions: usize,

    /// Retention factor α ∈ (0, 1).
    pub retention: f64,

    /// Position vector scheme.
    pub encoding: PositionEncoding,

    /// Seed for the position table. Drawn from the random source when unset.
    pub position_seed: Option<u64>,

    /// Token vector generation policy.
    pub symbols: SymbolPolicy,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            max_positions: DEFAULT_MAX_POSITIONS,
            retention: DEFAULT_RETENTION,
            encoding: PositionEncoding::default(),
            position_seed: None,
            symbols: SymbolPolicy::default(),
        }
    }
}

impl SequenceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(HrrError::ZeroDimension);
        }
        if self.max_positions == 0 {
            return Err(HrrError::InvalidConfig(
                "max_positions must be at least 1".into(),
            ));
        }
        Accumulation::DecayedAverage {
            retention: self.retention,
        }
        .validate()?;
        self.encoding.validate(self.dim, self.max_positions)
    }
}

/// Outcome of one `encode` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeReport {
    /// Tokens actually bound into the trace.
    pub encoded: usize,
    /// Tokens in the input.
    pub total: usize,
    /// Input was longer than the position table.
    pub truncated: bool,
}

impl EncodeReport {
    /// Number of encoded tokens.
    pub fn count(&self) -> usize {
        self.encoded
    }
}

/// Position-bound token memory with exponential decay.
#[derive(Debug)]
pub struct SequenceMemory {
    trace: HrrVector,
    positions: PositionTable,
    tokens: SymbolTable,
    retention: f64,
    tokens_encoded: u64,
}

impl SequenceMemory {
    /// Build a bank drawing token vectors (and the position seed, if unset) from `rng`.
    pub fn new(config: SequenceConfig, mut rng: SymbolRng) -> Result<Self> {
        config.validate()?;
        let seed = config.position_seed.unwrap_or_else(|| rng.next_u64());
        let positions =
            PositionTable::generate(config.dim, config.max_positions, config.encoding, seed)?;
        let tokens = SymbolTable::new(config.dim, config.symbols, rng)?;
        tracing::debug!(
            dim = config.dim,
            max_positions = config.max_positions,
            retention = config.retention,
            "sequence memory created"
        );
        Ok(Self {
            trace: HrrVector::zeros(config.dim),
            positions,
            tokens,
            retention: config.retention,
            tokens_encoded: 0,
        })
    }

    /// Build a bank over a seeded `StdRng`.
    pub fn seeded(config: SequenceConfig, seed: u64) -> Result<Self> {
        Self::new(config, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Fold `text` into the trace. Tokens past `max_positions` are dropped;
    /// the report says how many made it in.
    pub fn encode(&mut self, text: &str) -> Result<EncodeReport> {
        let tokens = tokenize(text);
        let policy = Accumulation::DecayedAverage {
            retention: self.retention,
        };

        let mut encoded = 0;
        for (token, position) in tokens.iter().zip(self.positions.iter()) {
            let bound = bind(self.tokens.get_or_create(token), position)?;
            policy.fold_into(&mut self.trace, &bound)?;
            encoded += 1;
        }
        if encoded > 0 {
            self.trace.normalize();
        }
        self.tokens_encoded += encoded as u64;

        let report = EncodeReport {
            encoded,
            total: tokens.len(),
            truncated: tokens.len() > encoded,
        };
        if report.truncated {
            tracing::warn!(
                total = report.total,
                encoded = report.encoded,
                "input longer than position table, tail dropped"
            );
        }
        tracing::debug!(encoded, vocabulary = self.tokens.len(), "sequence encoded");
        Ok(report)
    }

    /// The normalised plain-sum trace of `text` on its own.
    pub fn query_vector(&self, text: &str) -> Result<HrrVector> {
        let tokens = tokenize(text);
        let bound = tokens
            .iter()
            .zip(self.positions.iter())
            .map(|(token, position)| bind(&self.tokens.probe(token), position))
            .collect::<Result<Vec<_>>>()?;
        superpose(self.dim(), &bound, Accumulation::NormalizedSum)
    }

    /// Relevance of `query` to what has been encoded. 0 for an empty query or trace.
    pub fn decode(&self, query: &str) -> Result<f64> {
        let query_trace = self.query_vector(query)?;
        let score = similarity(&self.trace, &query_trace)?;
        tracing::trace!(score, "sequence decoded");
        Ok(score)
    }

    /// Zero the trace. Positions and token vectors are kept.
    pub fn reset(&mut self) {
        self.trace.clear();
        tracing::debug!("sequence trace reset");
    }

    pub fn trace(&self) -> &HrrVector {
        &self.trace
    }

    pub fn dim(&self) -> usize {
        self.trace.dim()
    }

    pub fn retention(&self) -> f64 {
        self.retention
    }

    pub fn max_positions(&self) -> usize {
        self.positions.len()
    }

    /// Seed the position table was generated from.
    pub fn position_seed(&self) -> u64 {
        self.positions.seed()
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Distinct tokens cached so far.
    pub fn vocabulary_size(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens encoded over the bank's lifetime.
    pub fn tokens_encoded(&self) -> u64 {
        self.tokens_encoded
    }

    /// Export the raw trace.
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot::new(&self.trace)
    }

    /// Replace the trace with a previously exported one.
    pub fn restore(&mut self, snapshot: &TraceSnapshot) -> Result<()> {
        ensure_same_dim(self.dim(), snapshot.trace.dim())?;
        self.trace = snapshot.trace.clone();
        Ok(())
    }
}
