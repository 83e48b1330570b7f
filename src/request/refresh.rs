//! Refresh token grant (RFC 6749 §6).
//!
//! Obtains a new access token from a previously issued refresh token,
//! without re-authenticating the user.

use std::borrow::Cow;

use bon::Builder;
use snafu::prelude::*;

use crate::{
    client_auth::ClientKey,
    crypto::signer::JwsSigningKey,
    params::{OAuthParameter, ParameterSet},
    request::{AuthSnafu, TokenRequestError, require, trace_request},
};

/// A refresh-token request.
///
/// The grant sets `client_id` from its own argument before client
/// authentication runs; a secret credential will not overwrite it.
#[derive(Debug, Builder)]
#[builder(state_mod(name = builder))]
pub struct RefreshTokenRequest<'a, Sgn: JwsSigningKey> {
    /// The refresh token to redeem. Required and non-empty.
    #[builder(into)]
    refresh_token: Cow<'a, str>,
    /// The client identifier the token was issued to. Required and non-empty.
    #[builder(into)]
    client_id: Cow<'a, str>,
    /// The target resource identifier; omitted from the request when empty.
    #[builder(into)]
    resource: Option<Cow<'a, str>>,
    /// The client authentication material.
    client_key: &'a ClientKey<Sgn>,
}

impl<Sgn: JwsSigningKey> RefreshTokenRequest<'_, Sgn> {
    /// Assembles the token-request parameters for this grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token or client identifier is
    /// empty, or client authentication fails.
    pub fn to_form(&self) -> Result<ParameterSet, TokenRequestError<Sgn::Error>> {
        require("refresh_token", &self.refresh_token)?;
        require("client_id", &self.client_id)?;

        let mut form = ParameterSet::new();
        form.set(OAuthParameter::GrantType, "refresh_token");
        form.set(OAuthParameter::RefreshToken, self.refresh_token.as_ref());
        form.set(OAuthParameter::ClientId, self.client_id.as_ref());
        self.client_key.apply(&mut form).context(AuthSnafu)?;
        if let Some(resource) = &self.resource
            && !resource.is_empty()
        {
            form.set(OAuthParameter::Resource, resource.as_ref());
        }

        trace_request("refresh_token", &form);

        Ok(form)
    }
}
