//! Error types for the kernels and the benchmark harness.

use thiserror::Error;

/// Contract violations detected by the checked kernel entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// A buffer cannot supply `offset + length` elements.
    #[error(
        "buffer `{buffer}` holds {available} elements, but offset {offset} + length {length} were requested"
    )]
    OutOfBounds {
        buffer: &'static str,
        offset: usize,
        length: usize,
        available: usize,
    },

    /// The small-length kernel was asked for more terms than its ladder has.
    #[error("small dot product length {length} exceeds the maximum of {max}")]
    OutOfRange { length: usize, max: usize },
}

/// Errors surfaced by the registry, runner and CLI.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// A variant disagreed with the reference implementation.
    #[error("variant '{variant}' of '{algorithm}' failed verification: {detail}")]
    Verification {
        algorithm: &'static str,
        variant: &'static str,
        detail: String,
    },

    #[error("algorithm '{0}' not found")]
    UnknownAlgorithm(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidArgument { flag: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = KernelError> = std::result::Result<T, E>;
