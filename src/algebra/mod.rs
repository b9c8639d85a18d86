//! Vector algebra core.
//!
//! Stateless primitives over fixed-dimension complex vectors:
//! - **Bind**: circular convolution (pointwise product of spectra)
//! - **Unbind**: circular correlation (product with the conjugate spectrum)
//! - **Similarity**: cosine of the real part of the inner product
//! - **Permute**: cyclic rotation for position-dependent variants
//!
//! Every higher-level memory builds on these, choosing an explicit
//! [`Accumulation`] policy for how bound pairs are superposed.

pub mod batch;
pub mod ops;
pub mod spectral;
pub mod vector;

pub use batch::{bind_batch, similarity_batch, unbind_batch, unbind_spectrum_batch};
pub use ops::{bind, inverse_permute, permute, similarity, superpose, unbind, Accumulation};
pub use vector::HrrVector;
