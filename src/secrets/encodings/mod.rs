//! Encodings for secret material.

mod base64;
mod string;

use std::str::Utf8Error;

use snafu::Snafu;

pub use base64::Base64Encoding;
pub use string::StringEncoding;

/// Trait for decoding raw bytes into a typed secret.
pub trait SecretDecoder: Send + Sync {
    /// The type of secret this encoding produces.
    type Output;

    /// Decodes raw bytes into the secret type.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded (e.g., invalid UTF-8
    /// or invalid base64).
    fn decode(&self, bytes: &[u8]) -> Result<Self::Output, DecodingError>;
}

/// Errors that can occur when decoding a secret.
#[derive(Debug, Snafu)]
pub enum DecodingError {
    /// The bytes are not valid UTF-8.
    #[snafu(display("Invalid UTF-8"))]
    InvalidUtf8 {
        /// The underlying error.
        source: Utf8Error,
    },
    /// The string is not valid base64.
    #[snafu(display("Invalid base64"))]
    InvalidBase64 {
        /// The underlying error.
        source: ::base64::DecodeError,
    },
}

impl crate::Error for DecodingError {
    fn is_retryable(&self) -> bool {
        false
    }
}
