//! Numeric kernels.

pub mod dot_product;
pub mod element;

pub use element::Element;
