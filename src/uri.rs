//! A validated absolute URI.
//!
//! Redirect URIs and assertion audiences must be absolute: the token
//! endpoint compares them as full strings, and a relative value would
//! silently produce a request the server rejects. [`AbsoluteUri`] is a
//! newtype over [`Uri`] that checks for a scheme and authority once, at
//! construction. It can be built from common string and URL types via
//! [`IntoAbsoluteUri`].

use std::convert::Infallible;

use http::{Uri, uri::InvalidUri};
use snafu::prelude::*;
use url::Url;

/// A URI guaranteed to carry a scheme and an authority.
///
/// Once constructed it can be freely cloned and passed between request
/// builders without re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteUri(Uri);

impl AbsoluteUri {
    /// Returns the inner [`Uri`].
    #[must_use]
    pub fn as_uri(&self) -> &Uri {
        &self.0
    }

    /// Consumes the [`AbsoluteUri`] and returns the inner [`Uri`].
    #[must_use]
    pub fn into_uri(self) -> Uri {
        self.0
    }
}

impl std::fmt::Display for AbsoluteUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors that can occur when validating an absolute URI.
#[derive(Debug, Snafu)]
pub enum AbsoluteUriError {
    /// The value could not be parsed as a URI at all.
    #[snafu(display("Invalid URI"))]
    Parse {
        /// The underlying parse error.
        source: InvalidUri,
    },
    /// The URI parsed but has no scheme or no authority.
    #[snafu(display("URI must be absolute (scheme and authority required)"))]
    NotAbsolute,
}

impl crate::Error for AbsoluteUriError {
    fn is_retryable(&self) -> bool {
        false
    }
}

fn validate(uri: Uri) -> Result<AbsoluteUri, AbsoluteUriError> {
    ensure!(
        uri.scheme().is_some() && uri.authority().is_some(),
        NotAbsoluteSnafu
    );
    Ok(AbsoluteUri(uri))
}

/// Conversion trait for types that can be turned into an [`AbsoluteUri`].
pub trait IntoAbsoluteUri {
    /// The error type returned if the conversion fails.
    type Error;

    /// Attempts to convert this value into an [`AbsoluteUri`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be parsed as a URI, or parses
    /// into a relative one.
    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error>;
}

impl IntoAbsoluteUri for AbsoluteUri {
    type Error = Infallible;

    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error> {
        Ok(self)
    }
}

impl IntoAbsoluteUri for Uri {
    type Error = AbsoluteUriError;

    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error> {
        validate(self)
    }
}

impl IntoAbsoluteUri for Url {
    type Error = AbsoluteUriError;

    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error> {
        self.as_str().into_absolute_uri()
    }
}

impl IntoAbsoluteUri for &str {
    type Error = AbsoluteUriError;

    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error> {
        validate(self.parse::<Uri>().context(ParseSnafu)?)
    }
}

impl IntoAbsoluteUri for String {
    type Error = AbsoluteUriError;

    fn into_absolute_uri(self) -> Result<AbsoluteUri, Self::Error> {
        self.as_str().into_absolute_uri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_uri() {
        let uri = "https://login.example/token"
            .into_absolute_uri()
            .expect("absolute URI");

        assert_eq!(uri.to_string(), "https://login.example/token");
    }

    #[test]
    fn rejects_path_only_uri() {
        let result = "/callback".into_absolute_uri();

        assert!(matches!(result, Err(AbsoluteUriError::NotAbsolute)));
    }

    #[test]
    fn rejects_bare_word() {
        // `http::Uri` parses a bare word as a path-only URI.
        let result = "callback".into_absolute_uri();

        assert!(matches!(result, Err(AbsoluteUriError::NotAbsolute)));
    }

    #[test]
    fn converts_from_url() {
        let url = Url::parse("https://app.example/cb").expect("valid URL");
        let uri = url.into_absolute_uri().expect("absolute URI");

        assert_eq!(uri.as_uri().host(), Some("app.example"));
    }
}
