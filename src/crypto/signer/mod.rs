//! Signing key traits.

mod rsa;

use std::{borrow::Cow, sync::Arc};

use bon::Builder;
use bytes::Bytes;

use crate::error::BoxedError;

pub use self::rsa::{RsaAlgorithm, RsaPrivateKey, RsaPrivateKeyLoadError};

/// Key metadata.
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct SigningKeyMetadata {
    /// The JWS algorithm identifier.
    ///
    /// This is specifically for use in the JWT `alg` header parameter.
    #[builder(into)]
    pub jws_algorithm: String,
    /// The key ID of the signer.
    ///
    /// This is specifically for use in the JWT `kid` header parameter.
    #[builder(into)]
    pub key_id: Option<String>,
}

/// Trait for keys that produce RFC 7515 (JWS) / RFC 7518 (JWA) compatible signatures.
///
/// Signing is a local, non-blocking computation. The key handle is borrowed
/// for the duration of one call and not retained by the caller.
pub trait JwsSigningKey: Send + Sync {
    /// The error type returned by this key's operations.
    type Error: crate::Error + 'static;

    /// Returns the key metadata for this signer.
    fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata>;

    /// Signs the given input data and returns the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing operation fails.
    fn sign(&self, input: &[u8]) -> Result<Bytes, Self::Error>;
}

/// Boxed JWS signing key.
///
/// Type-erases a concrete [`JwsSigningKey`] so credential types need no
/// signer type parameter when no certificate is in play.
#[derive(Clone)]
pub struct BoxedJwsSigningKey {
    inner: Arc<dyn DynJwsSigningKey>,
}

impl BoxedJwsSigningKey {
    /// Create a boxed signing key from a non-boxed one.
    pub fn new<Sgn: JwsSigningKey + 'static>(key: Sgn) -> Self {
        Self {
            inner: Arc::new(key),
        }
    }
}

impl std::fmt::Debug for BoxedJwsSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedJwsSigningKey").finish_non_exhaustive()
    }
}

/// Object-safe form of [`JwsSigningKey`].
trait DynJwsSigningKey: Send + Sync {
    fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata>;

    fn sign(&self, input: &[u8]) -> Result<Bytes, BoxedError>;
}

impl<Sgn: JwsSigningKey> DynJwsSigningKey for Sgn {
    fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata> {
        JwsSigningKey::key_metadata(self)
    }

    fn sign(&self, input: &[u8]) -> Result<Bytes, BoxedError> {
        JwsSigningKey::sign(self, input).map_err(BoxedError::from_err)
    }
}

impl JwsSigningKey for BoxedJwsSigningKey {
    type Error = BoxedError;

    fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata> {
        self.inner.key_metadata()
    }

    fn sign(&self, input: &[u8]) -> Result<Bytes, Self::Error> {
        self.inner.sign(input)
    }
}
