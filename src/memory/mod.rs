//! Stateful memories built on the vector algebra.
//!
//! - **Symbols**: label → unit vector cache
//! - **Store**: (slot, value) chunks superposed into one trace
//! - **Sequence**: position-bound tokens with exponential decay
//! - **Conversation**: recall gate over a sequence bank
//! - **Snapshot / Shared**: raw trace export and single-writer sharing

pub mod conversation;
pub mod positions;
pub mod sequence;
pub mod shared;
pub mod snapshot;
pub mod store;
pub mod symbols;
