//! Error taxonomy for the memory engine.
//!
//! Only caller errors surface here. Expected degradations (near-zero norms,
//! sequences longer than the position table) are recovered locally and show up
//! in return values instead.

/// Errors raised by vector algebra and memory operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HrrError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("sequence length mismatch: expected {expected} items, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("vectors must have at least one component")]
    ZeroDimension,

    #[error("vector norm {norm:e} is below the epsilon guard")]
    DegenerateVector { norm: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, HrrError>;

/// Reject operands whose dimensions disagree.
pub(crate) fn ensure_same_dim(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(HrrError::DimensionMismatch { expected, found });
    }
    if expected == 0 {
        return Err(HrrError::ZeroDimension);
    }
    Ok(())
}
