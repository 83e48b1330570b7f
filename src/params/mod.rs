//! The token-request parameter set.
//!
//! [`ParameterSet`] collects the form fields of one token request in
//! insertion order. Names come from the closed [`OAuthParameter`]
//! enumeration; values are either plain strings or protected secrets (see
//! [`FormValue`]). Protected values never appear in `Debug` output or in
//! iteration; they surface exactly once, in [`ParameterSet::to_body`],
//! which encodes the outgoing request.

mod form_value;

use bytes::Bytes;
use secrecy::SecretString;
use snafu::{ResultExt as _, Snafu};

pub use form_value::FormValue;

/// The OAuth2 form field names used by token requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthParameter {
    /// `grant_type`
    GrantType,
    /// `code`
    Code,
    /// `redirect_uri`
    RedirectUri,
    /// `resource`
    Resource,
    /// `refresh_token`
    RefreshToken,
    /// `client_id`
    ClientId,
    /// `client_secret`
    ClientSecret,
    /// `client_assertion`
    ClientAssertion,
    /// `client_assertion_type`
    ClientAssertionType,
    /// `assertion`
    Assertion,
    /// `requested_token_use`
    RequestedTokenUse,
    /// `scope`
    Scope,
}

impl OAuthParameter {
    /// The wire name of this parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OAuthParameter::GrantType => "grant_type",
            OAuthParameter::Code => "code",
            OAuthParameter::RedirectUri => "redirect_uri",
            OAuthParameter::Resource => "resource",
            OAuthParameter::RefreshToken => "refresh_token",
            OAuthParameter::ClientId => "client_id",
            OAuthParameter::ClientSecret => "client_secret",
            OAuthParameter::ClientAssertion => "client_assertion",
            OAuthParameter::ClientAssertionType => "client_assertion_type",
            OAuthParameter::Assertion => "assertion",
            OAuthParameter::RequestedTokenUse => "requested_token_use",
            OAuthParameter::Scope => "scope",
        }
    }
}

impl std::fmt::Display for OAuthParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of token-request form parameters.
///
/// Each name is set at most once per request; the grant builders check
/// [`contains`](Self::contains) before a conditional write instead of
/// overwriting.
#[derive(Debug, Default)]
pub struct ParameterSet {
    entries: Vec<(OAuthParameter, FormValue)>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: OAuthParameter, value: FormValue) {
        debug_assert!(!self.contains(name), "parameter '{name}' set twice");
        self.entries.push((name, value));
    }

    /// Sets a plain string value.
    pub fn set(&mut self, name: OAuthParameter, value: impl Into<String>) {
        self.insert(name, FormValue::Plain(value.into()));
    }

    /// Sets a protected value.
    ///
    /// The value stays out of `Debug` output, [`get`](Self::get) and
    /// [`iter`](Self::iter); it is only written out by
    /// [`to_body`](Self::to_body).
    pub fn set_secure(&mut self, name: OAuthParameter, value: SecretString) {
        self.insert(name, FormValue::Protected(value));
    }

    /// Reports whether a parameter is present, plain or protected.
    #[must_use]
    pub fn contains(&self, name: OAuthParameter) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == name)
    }

    /// Returns a plain value; `None` if absent or protected.
    #[must_use]
    pub fn get(&self, name: OAuthParameter) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .and_then(|(_, value)| value.as_plain())
    }

    /// The number of parameters set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = OAuthParameter> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Iterates over entries in insertion order.
    ///
    /// Protected values are yielded as `None`, so the iterator is safe to
    /// feed into logging.
    pub fn iter(&self) -> impl Iterator<Item = (OAuthParameter, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_plain()))
    }

    /// Encodes all parameters as an `application/x-www-form-urlencoded` body.
    ///
    /// This is the one place protected values surface in plain text; the
    /// returned bytes are meant to be POSTed to the token endpoint and
    /// nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error if form serialization fails.
    pub fn to_body(&self) -> Result<Bytes, SerializeBodyError> {
        let pairs: Vec<(&str, &FormValue)> = self
            .entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        let body = serde_html_form::to_string(&pairs).context(SerializeFormSnafu)?;

        Ok(Bytes::from(body))
    }
}

/// Errors that can occur when encoding the request body.
#[derive(Debug, Snafu)]
pub enum SerializeBodyError {
    /// The form parameters could not be serialized.
    #[snafu(display("Failed to serialize request body"))]
    SerializeForm {
        /// The underlying error.
        source: serde_html_form::ser::Error,
    },
}

impl crate::Error for SerializeBodyError {
    fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_plain_value() {
        let mut form = ParameterSet::new();
        form.set(OAuthParameter::Code, "abc");

        assert!(form.contains(OAuthParameter::Code));
        assert_eq!(form.get(OAuthParameter::Code), Some("abc"));
        assert_eq!(form.get(OAuthParameter::Scope), None);
    }

    #[test]
    fn protected_value_is_present_but_not_readable() {
        let mut form = ParameterSet::new();
        form.set_secure(
            OAuthParameter::ClientSecret,
            SecretString::from("hunter2".to_owned()),
        );

        assert!(form.contains(OAuthParameter::ClientSecret));
        assert_eq!(form.get(OAuthParameter::ClientSecret), None);
        let values: Vec<_> = form.iter().map(|(_, value)| value).collect();
        assert_eq!(values, vec![None]);
    }

    #[test]
    fn debug_output_redacts_protected_values() {
        let mut form = ParameterSet::new();
        form.set(OAuthParameter::ClientId, "cid");
        form.set_secure(
            OAuthParameter::ClientSecret,
            SecretString::from("hunter2".to_owned()),
        );

        let rendered = format!("{form:?}");
        assert!(rendered.contains("cid"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn body_preserves_insertion_order() {
        let mut form = ParameterSet::new();
        form.set(OAuthParameter::GrantType, "client_credentials");
        form.set(OAuthParameter::Resource, "https://graph.example");

        let body = form.to_body().expect("serializable form");
        assert_eq!(
            body,
            "grant_type=client_credentials&resource=https%3A%2F%2Fgraph.example"
        );
    }

    #[test]
    fn body_includes_protected_values() {
        let mut form = ParameterSet::new();
        form.set(OAuthParameter::ClientId, "cid");
        form.set_secure(
            OAuthParameter::ClientSecret,
            SecretString::from("hunter2".to_owned()),
        );

        let body = form.to_body().expect("serializable form");
        assert_eq!(body, "client_id=cid&client_secret=hunter2");
    }

    #[test]
    fn body_escapes_reserved_characters() {
        let mut form = ParameterSet::new();
        form.set(OAuthParameter::Scope, "openid profile&email");

        let body = form.to_body().expect("serializable form");
        assert_eq!(body, "scope=openid+profile%26email");
    }
}
