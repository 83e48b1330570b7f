//! On-behalf-of grant (JWT bearer, RFC 7523 §2.1).
//!
//! Exchanges an end user's assertion for a new token acting on that user's
//! behalf.

use std::borrow::Cow;

use bon::Builder;
use snafu::prelude::*;

use crate::{
    client_auth::ClientKey,
    crypto::signer::JwsSigningKey,
    params::{OAuthParameter, ParameterSet},
    request::{AuthSnafu, TokenRequestError, require, trace_request},
};

/// The scope requested with the on-behalf-of grant.
///
/// Asks the provider to issue an identity token alongside the access
/// token.
pub const OPEN_ID_SCOPE: &str = "openid";

/// An end user's assertion, exchanged for a token acting on their behalf.
///
/// Owned by the caller; this crate only reads it.
#[derive(Debug, Clone)]
pub struct UserAssertion(String);

impl UserAssertion {
    /// Wraps the user's assertion string.
    pub fn new(assertion: impl Into<String>) -> Self {
        Self(assertion.into())
    }

    /// The assertion string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserAssertion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserAssertion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// An on-behalf-of token request.
#[derive(Debug, Builder)]
#[builder(state_mod(name = builder))]
pub struct OnBehalfOfRequest<'a, Sgn: JwsSigningKey> {
    /// The target resource identifier. Required and non-empty.
    #[builder(into)]
    resource: Cow<'a, str>,
    /// The end user's assertion. Required and non-empty.
    #[builder(into)]
    user_assertion: UserAssertion,
    /// The client authentication material.
    client_key: &'a ClientKey<Sgn>,
}

impl<Sgn: JwsSigningKey> OnBehalfOfRequest<'_, Sgn> {
    /// Assembles the token-request parameters for this grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource or user assertion is empty, or
    /// client authentication fails.
    pub fn to_form(&self) -> Result<ParameterSet, TokenRequestError<Sgn::Error>> {
        require("resource", &self.resource)?;
        require("assertion", self.user_assertion.as_str())?;

        let mut form = ParameterSet::new();
        form.set(
            OAuthParameter::GrantType,
            "urn:ietf:params:oauth:grant-type:jwt-bearer",
        );
        form.set(OAuthParameter::Assertion, self.user_assertion.as_str());
        form.set(OAuthParameter::RequestedTokenUse, "on_behalf_of");
        form.set(OAuthParameter::Resource, self.resource.as_ref());
        form.set(OAuthParameter::Scope, OPEN_ID_SCOPE);
        self.client_key.apply(&mut form).context(AuthSnafu)?;

        trace_request("jwt-bearer", &form);

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_auth::ClientCredential;

    fn secret_key() -> ClientKey {
        ClientKey::Secret(
            ClientCredential::builder()
                .client_id("cid")
                .secret("s3cr3t")
                .build(),
        )
    }

    #[test]
    fn assembles_exactly_the_grant_fields() {
        let key = secret_key();

        let form = OnBehalfOfRequest::builder()
            .resource("https://graph.example")
            .user_assertion("user-jwt")
            .client_key(&key)
            .build()
            .to_form()
            .expect("buildable request");

        let fields: Vec<_> = form.iter().collect();
        assert_eq!(
            fields,
            vec![
                (
                    OAuthParameter::GrantType,
                    Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
                ),
                (OAuthParameter::Assertion, Some("user-jwt")),
                (OAuthParameter::RequestedTokenUse, Some("on_behalf_of")),
                (OAuthParameter::Resource, Some("https://graph.example")),
                (OAuthParameter::Scope, Some(OPEN_ID_SCOPE)),
                (OAuthParameter::ClientId, Some("cid")),
                (OAuthParameter::ClientSecret, Some("s3cr3t")),
            ]
        );
    }

    #[test]
    fn empty_resource_is_rejected() {
        let key = secret_key();

        let result = OnBehalfOfRequest::builder()
            .resource("")
            .user_assertion("user-jwt")
            .client_key(&key)
            .build()
            .to_form();

        assert!(matches!(
            result,
            Err(TokenRequestError::EmptyParameter { name: "resource" })
        ));
    }

    #[test]
    fn empty_user_assertion_is_rejected() {
        let key = secret_key();

        let result = OnBehalfOfRequest::builder()
            .resource("https://graph.example")
            .user_assertion("")
            .client_key(&key)
            .build()
            .to_form();

        assert!(matches!(
            result,
            Err(TokenRequestError::EmptyParameter { name: "assertion" })
        ));
    }
}
