//! Associative memory store: chunks of (slot, value) facts in one trace.
//!
//! A chunk such as `{color: red, shape: circle}` becomes
//! `normalize(bind(color, red) + bind(shape, circle))`, and every chunk is
//! added into the trace without renormalising it. Only these bound
//! contributions persist; the chunks themselves are never stored.
//!
//! Similarity of a stored chunk decays as more chunks are superposed
//! (roughly `1/√n` for high-dimensional random symbols).

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algebra::{
    bind, similarity, similarity_batch, superpose, unbind, unbind_batch, Accumulation, HrrVector,
};
use crate::config::DEFAULT_DIM;
use crate::error::{ensure_same_dim, HrrError, Result};
use crate::memory::snapshot::TraceSnapshot;
use crate::memory::symbols::{SymbolPolicy, SymbolRng, SymbolTable};

/// Store configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Vector dimension.
    pub dim: usize,

    /// Symbol generation policy.
    pub symbols: SymbolPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            symbols: SymbolPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(HrrError::ZeroDimension);
        }
        Ok(())
    }
}

/// A transient slot → value mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    pairs: Vec<(String, String)>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Chunk::insert`].
    pub fn with(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(slot, value);
        self
    }

    /// Set `slot` to `value`, replacing any previous value for that slot.
    pub fn insert(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        let slot = slot.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(s, _)| *s == slot) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((slot, value)),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every slot and value label, in pair order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.pairs
            .iter()
            .flat_map(|(s, v)| [s.as_str(), v.as_str()])
    }
}

impl<S: Into<String>, V: Into<String>, const N: usize> From<[(S, V); N]> for Chunk {
    fn from(pairs: [(S, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<S: Into<String>, V: Into<String>> FromIterator<(S, V)> for Chunk {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut chunk = Chunk::new();
        for (slot, value) in iter {
            chunk.insert(slot, value);
        }
        chunk
    }
}

/// Best match for a slot query.
#[derive(Clone, Debug, PartialEq)]
pub struct Recall {
    pub label: String,
    pub score: f64,
}

/// Chunk-based associative memory over a single trace.
#[derive(Debug)]
pub struct AssociativeMemory {
    trace: HrrVector,
    symbols: SymbolTable,
    chunk_count: u64,
}

impl AssociativeMemory {
    /// Build a store drawing symbols from `rng`.
    pub fn new(config: StoreConfig, rng: SymbolRng) -> Result<Self> {
        config.validate()?;
        let symbols = SymbolTable::new(config.dim, config.symbols, rng)?;
        tracing::debug!(dim = config.dim, policy = ?config.symbols, "associative memory created");
        Ok(Self {
            trace: HrrVector::zeros(config.dim),
            symbols,
            chunk_count: 0,
        })
    }

    /// Build a store over a seeded `StdRng`.
    pub fn seeded(config: StoreConfig, seed: u64) -> Result<Self> {
        Self::new(config, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Normalised superposition of the chunk's bound pairs. Read-only:
    /// unseen labels are probed, not cached.
    pub fn chunk_vector(&self, chunk: &Chunk) -> Result<HrrVector> {
        let bound = chunk
            .pairs()
            .iter()
            .map(|(slot, value)| bind(&self.symbols.probe(slot), &self.symbols.probe(value)))
            .collect::<Result<Vec<_>>>()?;
        superpose(self.dim(), &bound, Accumulation::NormalizedSum)
    }

    /// Add a chunk to the trace. Returns `false` for an empty chunk, which
    /// leaves the memory untouched and is not counted in `chunk_count`.
    pub fn add(&mut self, chunk: &Chunk) -> Result<bool> {
        if chunk.is_empty() {
            return Ok(false);
        }
        for label in chunk.labels() {
            self.symbols.get_or_create(label);
        }
        let vector = self.chunk_vector(chunk)?;
        self.trace.add_scaled(&vector, 1.0)?;
        self.chunk_count += 1;
        tracing::debug!(
            pairs = chunk.len(),
            chunks = self.chunk_count,
            symbols = self.symbols.len(),
            "chunk added"
        );
        Ok(true)
    }

    /// Similarity between the trace and the chunk's vector. Does not modify the store.
    pub fn get_activation(&self, chunk: &Chunk) -> Result<f64> {
        let vector = self.chunk_vector(chunk)?;
        let activation = similarity(&self.trace, &vector)?;
        tracing::trace!(activation, "chunk activation");
        Ok(activation)
    }

    /// For every known symbol (plus the cue's own labels), unbind it from the
    /// trace and report the best similarity to any *other* symbol.
    ///
    /// Costs O(n² · d) in the number of symbols.
    pub fn request(&self, cue: &Chunk) -> Result<BTreeMap<String, f64>> {
        let mut candidates: BTreeMap<&str, HrrVector> = self
            .symbols
            .iter()
            .map(|(label, v)| (label, v.clone()))
            .collect();
        for label in cue.labels() {
            if !candidates.contains_key(label) {
                candidates.insert(label, self.symbols.probe(label).into_owned());
            }
        }
        let (labels, vectors): (Vec<&str>, Vec<HrrVector>) = candidates.into_iter().unzip();

        let unbound = unbind_batch(&self.trace, &vectors)?;
        let mut scores = BTreeMap::new();
        for (i, (label, approx)) in labels.iter().zip(&unbound).enumerate() {
            let best = similarity_batch(approx, &vectors)?
                .into_iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, sim)| sim)
                .fold(None, |best: Option<f64>, sim| Some(best.map_or(sim, |b| b.max(sim))));
            scores.insert(label.to_string(), best.unwrap_or(0.0));
        }
        tracing::trace!(candidates = labels.len(), "request scanned");
        Ok(scores)
    }

    /// Unbind `slot` from the trace and return the closest other known symbol.
    /// `None` when the trace is empty or no other symbol exists.
    pub fn recall(&self, slot: &str) -> Result<Option<Recall>> {
        if self.trace.is_degenerate() {
            return Ok(None);
        }
        let approx = unbind(&self.trace, &self.symbols.probe(slot))?;
        let (labels, vectors): (Vec<&str>, Vec<HrrVector>) = self
            .symbols
            .iter()
            .filter(|(label, _)| *label != slot)
            .map(|(label, v)| (label, v.clone()))
            .unzip();
        let scores = similarity_batch(&approx, &vectors)?;
        let mut best: Option<Recall> = None;
        for (label, score) in labels.into_iter().zip(scores) {
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Recall {
                    label: label.to_string(),
                    score,
                });
            }
        }
        Ok(best)
    }

    /// Zero the trace, reset the counter and empty the symbol table.
    pub fn clear(&mut self) {
        self.trace.clear();
        self.chunk_count = 0;
        self.symbols.clear();
        tracing::debug!("associative memory cleared");
    }

    /// Chunks added since construction or the last clear.
    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn trace(&self) -> &HrrVector {
        &self.trace
    }

    pub fn dim(&self) -> usize {
        self.trace.dim()
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
