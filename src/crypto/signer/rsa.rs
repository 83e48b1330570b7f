use std::{borrow::Cow, convert::Infallible, sync::Arc};

use bytes::Bytes;
use rsa::pkcs8::DecodePrivateKey as _;
use rsa::signature::{RandomizedSigner as _, SignatureEncoding as _, Signer as _};
use secrecy::{ExposeSecret as _, SecretBox, SecretString};
use snafu::prelude::*;

use crate::crypto::signer::{JwsSigningKey, SigningKeyMetadata};
use crate::secrets::Secret;

/// RSA algorithm supported by a key.
#[derive(Debug, Clone, Copy)]
pub enum RsaAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256 (`RS256`).
    Rs256,
    /// RSASSA-PSS with SHA-256 (`PS256`).
    Ps256,
}

impl AsRef<str> for RsaAlgorithm {
    fn as_ref(&self) -> &str {
        match self {
            RsaAlgorithm::Rs256 => "RS256",
            RsaAlgorithm::Ps256 => "PS256",
        }
    }
}

enum SigningKey {
    Rs256(rsa::pkcs1v15::SigningKey<rsa::sha2::Sha256>),
    Ps256(rsa::pss::SigningKey<rsa::sha2::Sha256>),
}

impl SigningKey {
    fn sign(&self, msg: &[u8]) -> Bytes {
        match self {
            SigningKey::Rs256(signing_key) => signing_key.sign(msg).to_vec().into(),
            SigningKey::Ps256(signing_key) => signing_key
                .sign_with_rng(&mut rand::thread_rng(), msg)
                .to_vec()
                .into(),
        }
    }
}

/// Errors that may occur when loading an RSA private key.
#[derive(Debug, Snafu)]
pub enum RsaPrivateKeyLoadError<E: crate::Error> {
    /// Failed to access the key material.
    #[snafu(display("Failed to access key material"))]
    Secret {
        /// The underlying error.
        source: E,
    },
    /// The material was not a usable PKCS#8 private key.
    #[snafu(display("Failed to decode PKCS#8 key"))]
    KeyDecode {
        /// The underlying error.
        source: rsa::pkcs8::Error,
    },
}

impl<E: crate::Error> crate::Error for RsaPrivateKeyLoadError<E> {
    fn is_retryable(&self) -> bool {
        match self {
            RsaPrivateKeyLoadError::Secret { source } => source.is_retryable(),
            RsaPrivateKeyLoadError::KeyDecode { .. } => false,
        }
    }
}

struct RsaPrivateKeyInner {
    signing_key: SigningKey,
    key_metadata: SigningKeyMetadata,
}

impl std::fmt::Debug for RsaPrivateKeyInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateKeyInner")
            .field("key_metadata", &self.key_metadata)
            .finish_non_exhaustive()
    }
}

/// An RSA private key.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    inner: Arc<RsaPrivateKeyInner>,
}

fn convert(
    private_key: rsa::RsaPrivateKey,
    algorithm: RsaAlgorithm,
    key_id: Option<&str>,
) -> RsaPrivateKey {
    let signing_key = match algorithm {
        RsaAlgorithm::Rs256 => SigningKey::Rs256(
            rsa::pkcs1v15::SigningKey::<rsa::sha2::Sha256>::new(private_key),
        ),
        RsaAlgorithm::Ps256 => {
            SigningKey::Ps256(rsa::pss::SigningKey::<rsa::sha2::Sha256>::new(private_key))
        }
    };

    RsaPrivateKey {
        inner: Arc::new(RsaPrivateKeyInner {
            signing_key,
            key_metadata: SigningKeyMetadata::builder()
                .jws_algorithm(algorithm.as_ref())
                .maybe_key_id(key_id)
                .build(),
        }),
    }
}

impl RsaPrivateKey {
    /// Generates a 2048-bit private key supporting the specified JWS algorithm.
    ///
    /// # Errors
    ///
    /// Should not return an error during normal operation.
    pub fn generate(algorithm: RsaAlgorithm, key_id: Option<&str>) -> Result<Self, rsa::Error> {
        Ok(convert(
            rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048)?,
            algorithm,
            key_id,
        ))
    }

    /// Loads the private key from a PKCS#8 PEM secret.
    ///
    /// # Errors
    ///
    /// The secret was not a valid PKCS#8 PEM formatted string, or the
    /// secret could not be accessed.
    pub fn load_pkcs8_pem<S: Secret<Output = SecretString>>(
        secret: &S,
        algorithm: RsaAlgorithm,
        key_id: Option<&str>,
    ) -> Result<Self, RsaPrivateKeyLoadError<S::Error>> {
        let pem = secret.get_secret_value().context(SecretSnafu)?;
        let key = rsa::RsaPrivateKey::from_pkcs8_pem(pem.expose_secret()).context(KeyDecodeSnafu)?;
        Ok(convert(key, algorithm, key_id))
    }

    /// Loads the private key from a DER binary secret.
    ///
    /// # Errors
    ///
    /// The secret was not a valid DER formatted key, or the secret could
    /// not be accessed.
    pub fn load_pkcs8_der<S: Secret<Output = SecretBox<[u8]>>>(
        secret: &S,
        algorithm: RsaAlgorithm,
        key_id: Option<&str>,
    ) -> Result<Self, RsaPrivateKeyLoadError<S::Error>> {
        let der = secret.get_secret_value().context(SecretSnafu)?;
        let key = rsa::RsaPrivateKey::from_pkcs8_der(der.expose_secret()).context(KeyDecodeSnafu)?;
        Ok(convert(key, algorithm, key_id))
    }
}

impl JwsSigningKey for RsaPrivateKey {
    type Error = Infallible;

    fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata> {
        Cow::Borrowed(&self.inner.key_metadata)
    }

    fn sign(&self, input: &[u8]) -> Result<Bytes, Self::Error> {
        Ok(self.inner.signing_key.sign(input))
    }
}

#[cfg(test)]
mod tests {
    use rsa::pkcs8::EncodePrivateKey as _;
    use rsa::signature::Verifier as _;

    use super::*;

    struct StaticSecret(SecretString);

    impl Secret for StaticSecret {
        type Error = Infallible;
        type Output = SecretString;

        fn get_secret_value(&self) -> Result<Self::Output, Self::Error> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn metadata_reports_algorithm_and_key_id() {
        let key = RsaPrivateKey::generate(RsaAlgorithm::Rs256, Some("kid-1"))
            .expect("key generation succeeds");
        let metadata = key.key_metadata();

        assert_eq!(metadata.jws_algorithm, "RS256");
        assert_eq!(metadata.key_id.as_deref(), Some("kid-1"));
    }

    #[test]
    fn rs256_signature_verifies() {
        let raw = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
            .expect("key generation succeeds");
        let key = convert(raw.clone(), RsaAlgorithm::Rs256, None);

        let signature_bytes = key.sign(b"signing input").expect("signing succeeds");

        let verifying_key = rsa::pkcs1v15::VerifyingKey::<rsa::sha2::Sha256>::new(
            rsa::RsaPublicKey::from(&raw),
        );
        let signature = rsa::pkcs1v15::Signature::try_from(signature_bytes.as_ref())
            .expect("well-formed signature");
        verifying_key
            .verify(b"signing input", &signature)
            .expect("signature verifies");
    }

    #[test]
    fn ps256_signature_verifies() {
        let raw = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
            .expect("key generation succeeds");
        let key = convert(raw.clone(), RsaAlgorithm::Ps256, None);

        let signature_bytes = key.sign(b"signing input").expect("signing succeeds");

        let verifying_key =
            rsa::pss::VerifyingKey::<rsa::sha2::Sha256>::new(rsa::RsaPublicKey::from(&raw));
        let signature = rsa::pss::Signature::try_from(signature_bytes.as_ref())
            .expect("well-formed signature");
        verifying_key
            .verify(b"signing input", &signature)
            .expect("signature verifies");
    }

    #[test]
    fn loads_key_from_pem_secret() {
        let raw = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
            .expect("key generation succeeds");
        let pem = raw
            .to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)
            .expect("PEM encoding succeeds");
        let secret = StaticSecret(SecretString::from(pem.to_string()));

        let key = RsaPrivateKey::load_pkcs8_pem(&secret, RsaAlgorithm::Rs256, None)
            .expect("key loads from PEM");

        // 2048-bit key: 256-byte PKCS#1 v1.5 signature.
        assert_eq!(key.sign(b"x").expect("signing succeeds").len(), 256);
    }

    #[test]
    fn rejects_garbage_key_material() {
        let secret = StaticSecret(SecretString::from("not a key".to_owned()));

        let result = RsaPrivateKey::load_pkcs8_pem(&secret, RsaAlgorithm::Rs256, None);

        assert!(matches!(
            result,
            Err(RsaPrivateKeyLoadError::KeyDecode { .. })
        ));
    }
}
