use std::{borrow::Cow, convert::Infallible, time::Duration};

use base64::prelude::*;
use bon::Builder;
use snafu::prelude::*;

use crate::{
    crypto::signer::JwsSigningKey,
    jwt::structure::{JwtClaims, JwtHeader},
};

/// A built JWT with all information except signing metadata.
///
/// This represents a full JWT that can be signed with information from the
/// signing layer, which contributes the algorithm and key ID, produces the
/// JWS signature, and builds the final string.
#[derive(Debug, Clone, Builder)]
pub struct Jwt<'a> {
    /// The token type set in the `typ` header.
    #[builder(default = "JWT", into)]
    pub typ: Cow<'a, str>,
    /// The `iss` claim.
    #[builder(into)]
    pub issuer: Option<Cow<'a, str>>,
    /// The `sub` claim.
    #[builder(into)]
    pub subject: Option<Cow<'a, str>>,
    /// The `aud` claim values.
    #[builder(default, into)]
    pub audiences: Vec<Cow<'a, str>>,
    /// The `iat` claim, in seconds since the Unix epoch.
    pub issued_at: Option<u64>,
    /// The `exp` claim, in seconds since the Unix epoch.
    pub expiration: Option<u64>,
    /// The `nbf` claim, in seconds since the Unix epoch.
    pub not_before: Option<u64>,
    /// The `jti` claim; a fresh UUID v7 unless set explicitly.
    #[builder(required, into, default = crate::uuid::uuid_v7())]
    pub jti: Option<String>,
}

impl<'a, S: jwt_builder::State> JwtBuilder<'a, S> {
    /// Sets a single audience value for the JWT.
    pub fn audience(
        self,
        audience: impl Into<Cow<'a, str>>,
    ) -> JwtBuilder<'a, jwt_builder::SetAudiences<S>>
    where
        S::Audiences: jwt_builder::IsUnset,
    {
        self.audiences(vec![audience.into()])
    }

    #[allow(clippy::expect_used)]
    /// Sets the issue and not-before times to the current time, and the
    /// expiry time to the current time plus `lifetime`.
    ///
    /// # Panics
    ///
    /// This call panics if the reported time is before the epoch.
    pub fn issued_now_valid_for(
        self,
        lifetime: Duration,
    ) -> JwtBuilder<
        'a,
        jwt_builder::SetNotBefore<jwt_builder::SetExpiration<jwt_builder::SetIssuedAt<S>>>,
    >
    where
        S::IssuedAt: jwt_builder::IsUnset,
        S::Expiration: jwt_builder::IsUnset,
        S::NotBefore: jwt_builder::IsUnset,
    {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .expect("All times are after epoch")
            .as_secs();
        self.issued_at(now)
            .expiration(now.saturating_add(lifetime.as_secs()))
            .not_before(now)
    }
}

/// Errors that occur when attempting to serialize the JWT.
#[derive(Debug, Snafu)]
pub enum JwsSerializationError<SgnErr: crate::Error + 'static = Infallible> {
    /// Failed to encode claims as they could not be converted to JSON.
    EncodeClaims {
        /// The underlying error from `serde_json`.
        source: serde_json::Error,
    },
    /// Failed to encode headers as they could not be converted to JSON.
    EncodeHeader {
        /// The underlying error from `serde_json`.
        source: serde_json::Error,
    },
    /// Failed to sign the JWT.
    Sign {
        /// The underlying signing error.
        source: SgnErr,
    },
}

impl<SgnErr: crate::Error> crate::Error for JwsSerializationError<SgnErr> {
    fn is_retryable(&self) -> bool {
        match self {
            JwsSerializationError::EncodeClaims { .. }
            | JwsSerializationError::EncodeHeader { .. } => false,
            JwsSerializationError::Sign { source } => source.is_retryable(),
        }
    }
}

impl Jwt<'_> {
    /// Creates a string using the JWS compact serialization.
    ///
    /// The algorithm and optional key ID in the header come from the
    /// signer's metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the JWT could not be serialized to JSON, or
    /// signing failed.
    pub fn to_jws_compact<Sgn: JwsSigningKey>(
        &self,
        signer: &Sgn,
    ) -> Result<String, JwsSerializationError<Sgn::Error>> {
        let key_metadata = signer.key_metadata();

        let jwt_header = JwtHeader {
            alg: Cow::Borrowed(&key_metadata.jws_algorithm),
            typ: Some(Cow::Borrowed(&self.typ)),
            kid: key_metadata.key_id.as_deref().map(Cow::Borrowed),
        };
        let jwt_claims = JwtClaims {
            iss: self.issuer.as_deref().map(Cow::Borrowed),
            sub: self.subject.as_deref().map(Cow::Borrowed),
            aud: self.audiences.clone(),
            iat: self.issued_at,
            exp: self.expiration,
            nbf: self.not_before,
            jti: self.jti.as_deref().map(Cow::Borrowed),
        };
        let jwt_header_json = serde_json::to_vec(&jwt_header).context(EncodeHeaderSnafu)?;
        let jwt_header_b64 = BASE64_URL_SAFE_NO_PAD.encode(&jwt_header_json);
        let jwt_claims_json = serde_json::to_vec(&jwt_claims).context(EncodeClaimsSnafu)?;
        let jwt_claims_b64 = BASE64_URL_SAFE_NO_PAD.encode(&jwt_claims_json);

        let signing_input = [jwt_header_b64, jwt_claims_b64].join(".");

        let signature = signer.sign(signing_input.as_bytes()).context(SignSnafu)?;
        let signature_b64 = BASE64_URL_SAFE_NO_PAD.encode(&signature);

        Ok([signing_input, signature_b64].join("."))
    }
}
