use std::{convert::Infallible, ffi::OsString, sync::Arc};

use snafu::prelude::*;

use crate::{
    secrecy::SecretString,
    secrets::{DecodingError, Secret, SecretDecoder, encodings::StringEncoding},
};

/// Retrieves secrets from environment variables with configurable encoding.
///
/// The variable is read and decoded once, at construction; the handle is
/// cheap to clone afterwards.
#[derive(Debug, Clone)]
pub struct EnvVarSecret<Output = SecretString> {
    value: Arc<Output>,
}

impl<O> EnvVarSecret<O> {
    /// Creates a new environment variable secret provider with the specified encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable doesn't exist, isn't
    /// valid UTF-8, or can't be decoded.
    pub fn new<E: SecretDecoder<Output = O>>(
        var_name: impl Into<OsString>,
        encoding: &E,
    ) -> Result<Self, EnvVarSecretError> {
        let var_name = var_name.into();

        let encoded_value = std::env::var(var_name.clone()).context(EnvAccessSnafu { var_name })?;
        let value = encoding
            .decode(encoded_value.as_bytes())
            .context(DecodeSnafu)?;

        Ok(Self {
            value: Arc::new(value),
        })
    }
}

impl EnvVarSecret<SecretString> {
    /// Creates a new environment variable secret provider returning a `SecretString`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable doesn't exist, or if the
    /// value isn't valid UTF-8.
    pub fn string(var_name: impl Into<OsString>) -> Result<Self, EnvVarSecretError> {
        Self::new(var_name, &StringEncoding)
    }
}

impl<O: Clone + Send + Sync> Secret for EnvVarSecret<O> {
    type Output = O;
    type Error = Infallible;

    fn get_secret_value(&self) -> Result<Self::Output, Self::Error> {
        Ok(self.value.as_ref().clone())
    }
}

/// Errors that can occur when using [`EnvVarSecret`].
#[derive(Debug, Snafu)]
pub enum EnvVarSecretError {
    /// The environment variable was not found or was not valid unicode.
    #[snafu(display("Failed to read env variable '{}'", var_name.to_string_lossy()))]
    EnvAccess {
        /// The name of the environment variable that could not be accessed.
        var_name: OsString,
        /// The underlying error from the environment variable lookup.
        source: std::env::VarError,
    },
    /// Failed to decode the secret.
    #[snafu(display("Failed to decode secret"))]
    Decode {
        /// The encoding error.
        source: DecodingError,
    },
}

impl crate::Error for EnvVarSecretError {
    fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    #[test]
    fn reads_an_existing_variable() {
        // PATH is set in any environment these tests run in.
        let secret = EnvVarSecret::string("PATH").expect("PATH is set");

        let value = secret.get_secret_value().expect("infallible");
        assert!(!value.expose_secret().is_empty());
    }

    #[test]
    fn missing_variable_is_an_access_error() {
        let result = EnvVarSecret::string("THANE_TEST_UNSET_VARIABLE");

        assert!(matches!(
            result,
            Err(EnvVarSecretError::EnvAccess { .. })
        ));
    }
}
