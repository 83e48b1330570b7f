use std::time::Duration;

use bon::Builder;

use crate::{
    client_auth::assertion::{JWT_BEARER_ASSERTION_TYPE, SignedAssertion},
    crypto::signer::JwsSigningKey,
    jwt::{JwsSerializationError, Jwt},
    uri::{AbsoluteUri, IntoAbsoluteUri},
};

/// Default validity window for minted client assertions.
///
/// A short, endpoint-scoped lifetime; override it per credential via the
/// builder when the provider requires a different window.
pub const DEFAULT_ASSERTION_LIFETIME: Duration = Duration::from_secs(600);

/// A certificate-backed client credential (RFC 7523, private key JWT).
///
/// Holds a signing key and mints a fresh client assertion for every
/// request: `iss` and `sub` carry the client identifier, `aud` the token
/// endpoint, and each assertion gets its own `jti` and validity window.
/// The key handle is borrowed per signing call and shared cheaply across
/// request constructions.
#[derive(Debug, Clone, Builder)]
#[builder(state_mod(name = builder))]
pub struct CertificateCredential<Sgn: JwsSigningKey> {
    /// The client identifier the assertion is issued for.
    #[builder(into)]
    client_id: String,
    /// The signing key backing the certificate.
    key: Sgn,
    /// The audience of minted assertions: the token endpoint.
    #[builder(setters(name = "audience_uri"))]
    audience: AbsoluteUri,
    /// Validity window applied to each minted assertion.
    #[builder(default = DEFAULT_ASSERTION_LIFETIME)]
    lifetime: Duration,
}

impl<Sgn: JwsSigningKey, S: builder::State> CertificateCredentialBuilder<Sgn, S> {
    /// Sets the audience for minted assertions.
    ///
    /// Accepts any type that implements [`IntoAbsoluteUri`], including
    /// `&str`, [`String`], [`Url`](url::Url), [`Uri`](http::Uri), and
    /// [`AbsoluteUri`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an absolute URI.
    pub fn audience<U: IntoAbsoluteUri>(
        self,
        uri: U,
    ) -> Result<CertificateCredentialBuilder<Sgn, builder::SetAudience<S>>, U::Error>
    where
        S::Audience: builder::IsUnset,
    {
        Ok(self.audience_uri(uri.into_absolute_uri()?))
    }
}

impl<Sgn: JwsSigningKey> CertificateCredential<Sgn> {
    /// The client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Mints and signs a fresh client assertion.
    ///
    /// Every call produces a new assertion with its own `jti` and validity
    /// window; the result must not be cached or reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims could not be serialized or the key
    /// failed to sign.
    pub fn sign_assertion(&self) -> Result<SignedAssertion, JwsSerializationError<Sgn::Error>> {
        let jwt = Jwt::builder()
            .audience(self.audience.to_string())
            .issuer(self.client_id.as_str())
            .subject(self.client_id.as_str())
            .issued_now_valid_for(self.lifetime)
            .build();

        Ok(SignedAssertion {
            assertion: jwt.to_jws_compact(&self.key)?,
            assertion_type: JWT_BEARER_ASSERTION_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, convert::Infallible};

    use base64::prelude::*;
    use bytes::Bytes;

    use super::*;
    use crate::crypto::signer::SigningKeyMetadata;

    #[derive(Debug, Clone)]
    struct MockSigningKey;

    impl JwsSigningKey for MockSigningKey {
        type Error = Infallible;

        fn key_metadata(&self) -> Cow<'_, SigningKeyMetadata> {
            Cow::Owned(SigningKeyMetadata::builder().jws_algorithm("RS256").build())
        }

        fn sign(&self, _input: &[u8]) -> Result<Bytes, Self::Error> {
            Ok(Bytes::from_static(b"signature"))
        }
    }

    fn credential() -> CertificateCredential<MockSigningKey> {
        CertificateCredential::builder()
            .client_id("cid")
            .key(MockSigningKey)
            .audience("https://login.example/token")
            .expect("absolute audience")
            .build()
    }

    #[test]
    fn successive_assertions_are_unique() {
        let credential = credential();

        let first = credential.sign_assertion().expect("signable");
        let second = credential.sign_assertion().expect("signable");

        assert_ne!(first.assertion, second.assertion);
        assert_eq!(first.assertion_type, second.assertion_type);
        assert_eq!(first.assertion_type, JWT_BEARER_ASSERTION_TYPE);
    }

    #[test]
    fn assertion_claims_match_credential() {
        let signed = credential().sign_assertion().expect("signable");

        let claims_segment = signed.assertion.split('.').nth(1).expect("claims segment");
        let claims: serde_json::Value = serde_json::from_slice(
            &BASE64_URL_SAFE_NO_PAD
                .decode(claims_segment)
                .expect("valid base64url"),
        )
        .expect("valid JSON");

        assert_eq!(claims["iss"], "cid");
        assert_eq!(claims["sub"], "cid");
        assert_eq!(claims["aud"], "https://login.example/token");
        let iat = claims["iat"].as_u64().expect("numeric iat");
        assert_eq!(claims["nbf"].as_u64(), Some(iat));
        assert_eq!(claims["exp"].as_u64(), Some(iat + 600));
    }
}
