//! Client credentials grant (RFC 6749 §4.4).
//!
//! Used when the client is acting on its own behalf, not on behalf of a
//! user.

use std::borrow::Cow;

use bon::Builder;
use snafu::prelude::*;

use crate::{
    client_auth::ClientKey,
    crypto::signer::JwsSigningKey,
    params::{OAuthParameter, ParameterSet},
    request::{AuthSnafu, TokenRequestError, require, trace_request},
};

/// A client-credentials token request.
#[derive(Debug, Builder)]
#[builder(state_mod(name = builder))]
pub struct ClientCredentialsRequest<'a, Sgn: JwsSigningKey> {
    /// The target resource identifier. Required and non-empty.
    #[builder(into)]
    resource: Cow<'a, str>,
    /// The client authentication material.
    client_key: &'a ClientKey<Sgn>,
}

impl<Sgn: JwsSigningKey> ClientCredentialsRequest<'_, Sgn> {
    /// Assembles the token-request parameters for this grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is empty, or client authentication
    /// fails. The resource check runs before the client key is touched.
    pub fn to_form(&self) -> Result<ParameterSet, TokenRequestError<Sgn::Error>> {
        require("resource", &self.resource)?;

        let mut form = ParameterSet::new();
        form.set(OAuthParameter::GrantType, "client_credentials");
        form.set(OAuthParameter::Resource, self.resource.as_ref());
        self.client_key.apply(&mut form).context(AuthSnafu)?;

        trace_request("client_credentials", &form);

        Ok(form)
    }
}
