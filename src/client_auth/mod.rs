//! Client authentication for token requests.
//!
//! A confidential client authenticates inside the request body in exactly
//! one of three ways: a shared secret, a pre-built signed assertion, or a
//! certificate-backed key that signs a fresh assertion per request.
//! [`ClientKey`] is the closed choice between them; [`ClientKey::apply`]
//! writes the matching fields into a [`ParameterSet`].
//!
//! Note: mTLS authentication is a transport-level concern and belongs to
//! the HTTP client, not to the request body built here.

mod assertion;
mod certificate;
mod credential;

use snafu::prelude::*;

use crate::{
    crypto::signer::{BoxedJwsSigningKey, JwsSigningKey},
    jwt::JwsSerializationError,
    params::{OAuthParameter, ParameterSet},
};

pub use assertion::{ClientAssertion, JWT_BEARER_ASSERTION_TYPE, SignedAssertion};
pub use certificate::{CertificateCredential, DEFAULT_ASSERTION_LIFETIME};
pub use credential::{ClientCredential, ClientSecretValue};

/// The client authentication material for one token request.
///
/// Exactly one variant exists by construction; there is no unpopulated or
/// doubly-populated state to check at use sites. Callers migrating from
/// optional-field credential bags can use [`ClientKey::from_parts`], which
/// preserves the runtime-checked construction path.
#[derive(Debug, Clone)]
pub enum ClientKey<Sgn: JwsSigningKey = BoxedJwsSigningKey> {
    /// Authenticate with a shared client secret.
    Secret(ClientCredential),
    /// Authenticate with a pre-built, already-signed assertion.
    Assertion(ClientAssertion),
    /// Authenticate by signing a fresh assertion with a certificate key.
    Certificate(CertificateCredential<Sgn>),
}

impl<Sgn: JwsSigningKey> ClientKey<Sgn> {
    /// Builds a `ClientKey` from optional parts, requiring exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientKeyError::Unpopulated`] when no part is provided and
    /// [`ClientKeyError::Ambiguous`] when more than one is. Both indicate a
    /// caller bug, not a request-level failure.
    pub fn from_parts(
        credential: Option<ClientCredential>,
        assertion: Option<ClientAssertion>,
        certificate: Option<CertificateCredential<Sgn>>,
    ) -> Result<Self, ClientKeyError> {
        match (credential, assertion, certificate) {
            (Some(credential), None, None) => Ok(Self::Secret(credential)),
            (None, Some(assertion), None) => Ok(Self::Assertion(assertion)),
            (None, None, Some(certificate)) => Ok(Self::Certificate(certificate)),
            (None, None, None) => UnpopulatedSnafu.fail(),
            _ => AmbiguousSnafu.fail(),
        }
    }

    /// Writes this key's authentication fields into a token request.
    ///
    /// Secret credentials set `client_id` only when the grant step has not
    /// already done so, then write `client_secret` through the plain or
    /// protected path. Pre-built assertions are copied verbatim.
    /// Certificate credentials mint and sign a fresh assertion.
    ///
    /// # Errors
    ///
    /// Returns an error if a certificate assertion could not be signed.
    pub fn apply(&self, form: &mut ParameterSet) -> Result<(), ClientAuthError<Sgn::Error>> {
        match self {
            ClientKey::Secret(credential) => {
                if !form.contains(OAuthParameter::ClientId) {
                    form.set(OAuthParameter::ClientId, credential.client_id());
                }
                credential.write_secret(form);
            }
            ClientKey::Assertion(assertion) => {
                form.set(
                    OAuthParameter::ClientAssertionType,
                    assertion.assertion_type(),
                );
                form.set(OAuthParameter::ClientAssertion, assertion.assertion());
            }
            ClientKey::Certificate(certificate) => {
                let signed = certificate.sign_assertion().context(SignSnafu)?;
                form.set(OAuthParameter::ClientAssertionType, signed.assertion_type);
                form.set(OAuthParameter::ClientAssertion, signed.assertion);
            }
        }

        Ok(())
    }
}

/// Errors from the runtime-checked [`ClientKey::from_parts`] constructor.
#[derive(Debug, Snafu)]
pub enum ClientKeyError {
    /// No client key variant was provided.
    #[snafu(display("No client key variant was provided"))]
    Unpopulated,
    /// More than one client key variant was provided.
    #[snafu(display("More than one client key variant was provided"))]
    Ambiguous,
}

impl crate::Error for ClientKeyError {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors that can occur when applying client authentication.
#[derive(Debug, Snafu)]
pub enum ClientAuthError<SgnErr: crate::Error + 'static> {
    /// The client assertion could not be signed.
    #[snafu(display("Failed to sign client assertion"))]
    Sign {
        /// The underlying error.
        source: JwsSerializationError<SgnErr>,
    },
}

impl<SgnErr: crate::Error> crate::Error for ClientAuthError<SgnErr> {
    fn is_retryable(&self) -> bool {
        match self {
            ClientAuthError::Sign { source } => source.is_retryable(),
        }
    }
}
