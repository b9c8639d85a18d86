//! Raw trace export.
//!
//! A snapshot holds the dimension and the trace's `d` complex components,
//! encoded with bincode. Symbol tables and position tables are not included;
//! rebuilding them (from seeds or a derived symbol policy) is the caller's job.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::algebra::HrrVector;
use crate::error::ensure_same_dim;

/// Exported trace state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    pub dim: usize,
    pub trace: HrrVector,
}

impl TraceSnapshot {
    pub fn new(trace: &HrrVector) -> Self {
        Self {
            dim: trace.dim(),
            trace: trace.clone(),
        }
    }

    /// Serialise to bytes.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        bincode::serialize(self).context("failed to encode trace snapshot")
    }

    /// Deserialise from bytes, checking the recorded dimension.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).context("failed to decode trace snapshot")?;
        ensure_same_dim(snapshot.dim, snapshot.trace.dim())
            .context("trace snapshot is inconsistent")?;
        Ok(snapshot)
    }

    /// Write to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))
    }

    /// Read from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn sample() -> TraceSnapshot {
        let mut rng = StdRng::seed_from_u64(8);
        TraceSnapshot::new(&HrrVector::random(32, &mut rng))
    }

    #[test]
    fn test_bytes_roundtrip() {
        let snap = sample();
        let restored = TraceSnapshot::from_bytes(&snap.to_bytes().unwrap()).unwrap();
        assert_eq!(snap, restored);
    }

    #[test]
    fn test_inconsistent_dim_rejected() {
        let mut snap = sample();
        snap.dim = 16;
        let bytes = snap.to_bytes().unwrap();
        assert!(TraceSnapshot::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(TraceSnapshot::from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.bin");
        let snap = sample();
        snap.save(&path).unwrap();
        assert_eq!(TraceSnapshot::load(&path).unwrap(), snap);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = TraceSnapshot::load(&dir.path().join("absent.bin")).unwrap_err();
        assert!(err.to_string().contains("failed to read snapshot"));
    }
}
