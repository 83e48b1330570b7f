//! Authorization-code exchange (RFC 6749 §4.1.3).
//!
//! Exchanges the temporary code received on the redirect callback for
//! tokens.

use std::borrow::Cow;

use bon::Builder;
use snafu::prelude::*;

use crate::{
    client_auth::ClientKey,
    crypto::signer::JwsSigningKey,
    params::{OAuthParameter, ParameterSet},
    request::{AuthSnafu, TokenRequestError, require, trace_request},
    uri::{AbsoluteUri, IntoAbsoluteUri},
};

/// An authorization-code token request.
#[derive(Debug, Builder)]
#[builder(state_mod(name = builder))]
pub struct AuthorizationCodeRequest<'a, Sgn: JwsSigningKey> {
    /// The temporary authorization code received from the redirect callback.
    #[builder(into)]
    code: Cow<'a, str>,
    /// The redirect URI of the authorization request.
    #[builder(setters(name = "redirect_uri_value"))]
    redirect_uri: AbsoluteUri,
    /// The target resource identifier; omitted from the request when empty.
    #[builder(into)]
    resource: Option<Cow<'a, str>>,
    /// The client authentication material.
    client_key: &'a ClientKey<Sgn>,
}

impl<'a, Sgn: JwsSigningKey, S: builder::State> AuthorizationCodeRequestBuilder<'a, Sgn, S> {
    /// Sets the redirect URI.
    ///
    /// Accepts any type that implements [`IntoAbsoluteUri`], including
    /// `&str`, [`String`], [`Url`](url::Url), [`Uri`](http::Uri), and
    /// [`AbsoluteUri`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an absolute URI.
    pub fn redirect_uri<U: IntoAbsoluteUri>(
        self,
        uri: U,
    ) -> Result<AuthorizationCodeRequestBuilder<'a, Sgn, builder::SetRedirectUri<S>>, U::Error>
    where
        S::RedirectUri: builder::IsUnset,
    {
        Ok(self.redirect_uri_value(uri.into_absolute_uri()?))
    }
}

impl<Sgn: JwsSigningKey> AuthorizationCodeRequest<'_, Sgn> {
    /// Assembles the token-request parameters for this exchange.
    ///
    /// The redirect URI is written in its absolute string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, or client authentication
    /// fails.
    pub fn to_form(&self) -> Result<ParameterSet, TokenRequestError<Sgn::Error>> {
        require("code", &self.code)?;

        let mut form = ParameterSet::new();
        form.set(OAuthParameter::GrantType, "authorization_code");
        form.set(OAuthParameter::Code, self.code.as_ref());
        form.set(OAuthParameter::RedirectUri, self.redirect_uri.to_string());
        if let Some(resource) = &self.resource
            && !resource.is_empty()
        {
            form.set(OAuthParameter::Resource, resource.as_ref());
        }
        self.client_key.apply(&mut form).context(AuthSnafu)?;

        trace_request("authorization_code", &form);

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

        let form = AuthorizationCodeRequest::builder()
            .code("abc")
            .redirect_uri("https://app.example/cb")
            .expect("absolute URI")
            .resource("https://graph.example")
            .client_key(&key)
            .build()
            .to_form()
            .expect("buildable request");

        let fields: Vec<_> = form.iter().collect();
        assert_eq!(
            fields,
            vec![
                (OAuthParameter::GrantType, Some("authorization_code")),
                (OAuthParameter::Code, Some("abc")),
                (OAuthParameter::RedirectUri, Some("https://app.example/cb")),
                (OAuthParameter::Resource, Some("https://graph.example")),
                (OAuthParameter::ClientId, Some("cid")),
                (OAuthParameter::ClientSecret, Some("s3cr3t")),
            ]
        );
    }

    #[test]
    fn empty_code_is_rejected() {
        let key = secret_key();

        let result = AuthorizationCodeRequest::builder()
            .code("")
            .redirect_uri("https://app.example/cb")
            .expect("absolute URI")
            .client_key(&key)
            .build()
            .to_form();

        assert!(matches!(
            result,
            Err(TokenRequestError::EmptyParameter { name: "code" })
        ));
    }

    #[test]
    fn resource_is_omitted_when_absent_or_empty() {
        let key = secret_key();

        let absent = AuthorizationCodeRequest::builder()
            .code("abc")
            .redirect_uri("https://app.example/cb")
            .expect("absolute URI")
            .client_key(&key)
            .build()
            .to_form()
            .expect("buildable request");
        assert!(!absent.contains(OAuthParameter::Resource));

        let empty = AuthorizationCodeRequest::builder()
            .code("abc")
            .redirect_uri("https://app.example/cb")
            .expect("absolute URI")
            .resource("")
            .client_key(&key)
            .build()
            .to_form()
            .expect("buildable request");
        assert!(!empty.contains(OAuthParameter::Resource));
    }
}
