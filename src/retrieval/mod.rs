//! Retrieval mechanisms built directly on the algebra.

pub mod attention;
