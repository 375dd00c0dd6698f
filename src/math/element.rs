//! Element types accepted by the kernels.

use num_traits::Float;
use std::fmt::{Debug, Display};
use std::ops::AddAssign;

/// A floating-point element the dot product kernels can accumulate.
///
/// Implemented for `f64` and `f32`. The kernels never convert between
/// element types; `from_f64` and `as_f64` exist for generating test data
/// and reporting results.
pub trait Element:
    Float + AddAssign + Debug + Display + Send + Sync + 'static
{
    /// Short type name used in runner and variant names.
    const NAME: &'static str;

    fn from_f64(value: f64) -> Self;

    /// Widening conversion, named apart from `ToPrimitive::to_f64`.
    fn as_f64(self) -> f64;
}

impl Element for f64 {
    const NAME: &'static str = "f64";

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self
    }
}

impl Element for f32 {
    const NAME: &'static str = "f32";

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self as f64
    }
}
