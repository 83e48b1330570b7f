//! Token-request builders.
//!
//! One module per grant type. Each builder validates its required inputs
//! up front, so a failed build leaves nothing partially constructed, then
//! assembles a [`ParameterSet`](crate::params::ParameterSet) in a fixed
//! field order and delegates client authentication to
//! [`ClientKey::apply`](crate::client_auth::ClientKey::apply).

mod authorization_code;
mod client_credentials;
mod on_behalf_of;
mod refresh;

use snafu::prelude::*;

use crate::client_auth::ClientAuthError;

pub use authorization_code::AuthorizationCodeRequest;
pub use client_credentials::ClientCredentialsRequest;
pub use on_behalf_of::{OPEN_ID_SCOPE, OnBehalfOfRequest, UserAssertion};
pub use refresh::RefreshTokenRequest;

/// Errors that can occur when building a token request.
#[derive(Debug, Snafu)]
pub enum TokenRequestError<SgnErr: crate::Error + 'static> {
    /// A required input was missing or empty.
    ///
    /// Raised before any parameter is assembled.
    #[snafu(display("Required parameter '{name}' must not be empty"))]
    EmptyParameter {
        /// The logical name of the offending input.
        name: &'static str,
    },
    /// Client authentication could not be applied.
    Auth {
        /// The underlying error.
        source: ClientAuthError<SgnErr>,
    },
}

impl<SgnErr: crate::Error> crate::Error for TokenRequestError<SgnErr> {
    fn is_retryable(&self) -> bool {
        match self {
            TokenRequestError::EmptyParameter { .. } => false,
            TokenRequestError::Auth { source } => source.is_retryable(),
        }
    }
}

fn require<SgnErr: crate::Error>(
    name: &'static str,
    value: &str,
) -> Result<(), TokenRequestError<SgnErr>> {
    ensure!(!value.is_empty(), EmptyParameterSnafu { name });
    Ok(())
}

#[cfg(feature = "tracing")]
fn trace_request(grant_type: &'static str, form: &crate::params::ParameterSet) {
    let parameters: Vec<_> = form
        .names()
        .map(crate::params::OAuthParameter::as_str)
        .collect();
    tracing::debug!(grant_type, parameters = ?parameters, "assembled token request");
}

#[cfg(not(feature = "tracing"))]
fn trace_request(_grant_type: &'static str, _form: &crate::params::ParameterSet) {}
