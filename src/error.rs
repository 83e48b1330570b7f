//! Error types and the [`Error`] trait.
//!
//! Every error in this crate implements the [`Error`] trait, which extends
//! [`std::error::Error`] with retry semantics. The crate never retries on
//! its own: retryability is reported, the decision belongs to the caller.
//! [`BoxedError`] provides type-erased error handling while preserving
//! retryability.

use std::convert::Infallible;

use snafu::{AsErrorSource, Snafu};

/// Errors that may occur in the crate.
pub trait Error: std::error::Error + AsErrorSource + Send + Sync + 'static {
    /// If true, this indicates that a failed operation may succeed if retried.
    fn is_retryable(&self) -> bool;
}

impl Error for Infallible {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// A boxed error that can be used without type parameters.
#[derive(Debug, Snafu)]
#[snafu(transparent)]
pub struct BoxedError {
    source: Box<dyn Error>,
}

impl BoxedError {
    /// Create a new boxed error from a generic `Error`.
    pub fn from_err<E: Error + 'static>(err: E) -> Self {
        Self {
            source: Box::new(err),
        }
    }
}

impl Error for BoxedError {
    fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
