//! Secret access.
//!
//! Client secrets and signing-key material usually arrive from the process
//! environment or a secret manager rather than source code. This module
//! provides the retrieval seam: a [`Secret`] source yields a typed secret
//! value, with decoding for the common text encodings.

pub mod encodings;
mod providers;

pub use encodings::{DecodingError, SecretDecoder};
pub use providers::{EnvVarSecret, EnvVarSecretError};

/// Trait for secret retrieval.
pub trait Secret: Send + Sync {
    /// The error type returned by this secret source's operations.
    type Error: crate::Error;

    /// The type of secret this source provides.
    type Output;

    /// Retrieves the secret value.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret cannot be retrieved.
    fn get_secret_value(&self) -> Result<Self::Output, Self::Error>;
}
