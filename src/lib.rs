//! # holotrace
//!
//! **Bounded associative memory**: structured facts and token sequences are
//! compressed into one fixed-size complex vector (the *trace*) using
//! Holographic Reduced Representations, then queried by similarity.
//!
//! ## Components
//!
//! 1. **Algebra**: bind / unbind / similarity / permute over `d`-dimensional
//!    complex vectors (FFT circular convolution and correlation)
//! 2. **Symbols**: lazily created unit vector per string label
//! 3. **Associative store**: (slot, value) chunks superposed into one trace
//! 4. **Sequence bank**: position-bound tokens with exponential-decay retention
//! 5. **Attention**: O(T) key/value retrieval through a transient trace
//!
//! ## Trade-off
//!
//! Recall is approximate. Cross-talk grows with the number of superposed
//! associations (roughly `1/√n` for the similarity of a true member), while the
//! memory footprint stays at `d` complex numbers no matter how much is stored.

pub mod algebra;
pub mod error;
pub mod memory;
pub mod retrieval;

pub use algebra::{
    bind, inverse_permute, permute, similarity, superpose, unbind, Accumulation, HrrVector,
};
pub use error::{HrrError, Result};
pub use memory::conversation::{ConversationConfig, ConversationMemory, TurnReport};
pub use memory::sequence::{tokenize, EncodeReport, SequenceConfig, SequenceMemory};
pub use memory::shared::SharedMemory;
pub use memory::snapshot::TraceSnapshot;
pub use memory::store::{AssociativeMemory, Chunk, Recall, StoreConfig};
pub use memory::symbols::{SymbolPolicy, SymbolRng, SymbolTable};
pub use memory::positions::{PositionEncoding, PositionTable};
pub use retrieval::attention::{holographic_attention, pairwise_attention, HolographicAttention};

/// Engine-wide constants.
pub mod config {
    /// Default vector dimension.
    pub const DEFAULT_DIM: usize = 1024;

    /// Default number of precomputed position vectors.
    pub const DEFAULT_MAX_POSITIONS: usize = 2048;

    /// Default retention factor α for the sequence bank's moving average.
    pub const DEFAULT_RETENTION: f64 = 0.9;

    /// Default phase bandwidth of fractional position encoding.
    pub const DEFAULT_POSITION_BANDWIDTH: f64 = std::f64::consts::FRAC_PI_4;

    /// Norms below this are treated as the zero vector.
    pub const NORM_EPSILON: f64 = 1e-12;

    /// Default relevance score above which a conversation recalls memory.
    pub const DEFAULT_RECALL_THRESHOLD: f64 = 0.2;
}
