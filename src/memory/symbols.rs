//! Symbol table: maps string labels to fixed unit vectors.
//!
//! Vectors are created lazily on first use and cached for the life of the
//! table. There is no eviction: the table grows with the number of distinct
//! labels until it is cleared.
//!
//! Generation policy is explicit:
//! - [`SymbolPolicy::Random`] draws from the injected random source, so vectors
//!   differ between processes unless the caller seeds that source.
//! - [`SymbolPolicy::Derived`] hashes `(seed, label)` with SHA-256, giving the
//!   same vector for the same label in every process.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::algebra::HrrVector;
use crate::error::{HrrError, Result};

/// Injectable random source for symbol generation.
pub type SymbolRng = Box<dyn RngCore + Send + Sync>;

/// How new symbol vectors are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPolicy {
    /// Fresh vector from the table's random source.
    #[default]
    Random,
    /// Vector derived from the label and a fixed seed.
    Derived { seed: u64 },
}

/// Lazily populated label → vector cache.
pub struct SymbolTable {
    dim: usize,
    symbols: BTreeMap<String, HrrVector>,
    policy: SymbolPolicy,
    rng: SymbolRng,
    /// Salt for read-only probes of unseen labels.
    probe_salt: u64,
}

impl SymbolTable {
    /// Create a table drawing from `rng`.
    pub fn new(dim: usize, policy: SymbolPolicy, mut rng: SymbolRng) -> Result<Self> {
        if dim == 0 {
            return Err(HrrError::ZeroDimension);
        }
        let probe_salt = match policy {
            SymbolPolicy::Random => rng.next_u64(),
            SymbolPolicy::Derived { seed } => seed,
        };
        Ok(Self {
            dim,
            symbols: BTreeMap::new(),
            policy,
            rng,
            probe_salt,
        })
    }

    /// Random-policy table over a seeded `StdRng`.
    pub fn seeded(dim: usize, seed: u64) -> Result<Self> {
        Self::new(dim, SymbolPolicy::Random, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Random-policy table over an OS-seeded `StdRng`.
    pub fn from_entropy(dim: usize) -> Result<Self> {
        Self::new(dim, SymbolPolicy::Random, Box::new(StdRng::from_entropy()))
    }

    /// Label-derived table, reproducible across processes.
    pub fn derived(dim: usize, seed: u64) -> Result<Self> {
        Self::new(
            dim,
            SymbolPolicy::Derived { seed },
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    /// Return the cached vector for `label`, creating it on first use.
    pub fn get_or_create(&mut self, label: &str) -> &HrrVector {
        if !self.symbols.contains_key(label) {
            let vector = match self.policy {
                SymbolPolicy::Random => HrrVector::random(self.dim, &mut *self.rng),
                SymbolPolicy::Derived { seed } => derive_vector(self.dim, seed, label),
            };
            tracing::trace!(label, count = self.symbols.len() + 1, "new symbol");
            self.symbols.insert(label.to_string(), vector);
        }
        &self.symbols[label]
    }

    /// Cached vector, if the label has been seen.
    pub fn get(&self, label: &str) -> Option<&HrrVector> {
        self.symbols.get(label)
    }

    /// Read-only lookup. An unseen label gets an ephemeral vector that is
    /// not cached; it is near-orthogonal to everything stored.
    pub fn probe(&self, label: &str) -> Cow<'_, HrrVector> {
        match self.symbols.get(label) {
            Some(v) => Cow::Borrowed(v),
            None => Cow::Owned(derive_vector(self.dim, self.probe_salt, label)),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.symbols.contains_key(label)
    }

    /// Number of cached symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// `(label, vector)` pairs in sorted label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HrrVector)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop every cached symbol.
    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn policy(&self) -> SymbolPolicy {
        self.policy
    }

    /// Memory used by cached vectors in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.symbols
            .iter()
            .map(|(k, v)| k.len() + v.size_bytes())
            .sum()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("dim", &self.dim)
            .field("len", &self.symbols.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Deterministic unitary vector for `(salt, label)`.
fn derive_vector(dim: usize, salt: u64, label: &str) -> HrrVector {
    let mut hasher = Sha256::new();
    hasher.update(salt.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    let mut rng = StdRng::from_seed(seed);
    HrrVector::random(dim, &mut rng)
}
