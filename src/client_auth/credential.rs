use bon::Builder;
use secrecy::SecretString;

use crate::params::{OAuthParameter, ParameterSet};

/// A shared-secret client credential (RFC 6749 §2.3.1).
#[derive(Debug, Clone, Builder)]
pub struct ClientCredential {
    /// The client identifier registered with the identity provider.
    #[builder(into)]
    client_id: String,
    /// The client secret, plain or protected.
    #[builder(into)]
    secret: ClientSecretValue,
}

impl ClientCredential {
    /// The client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn write_secret(&self, form: &mut ParameterSet) {
        self.secret.write_to(form);
    }
}

/// A client secret with two backing representations behind one interface.
///
/// Plain secrets are written to the parameter set as ordinary values.
/// Protected secrets route through the secure path and are never converted
/// to plain form on the way there. The representation is chosen once, by
/// the `From` impl used at construction; call sites never branch on it.
#[derive(Debug, Clone)]
pub struct ClientSecretValue(Repr);

#[derive(Debug, Clone)]
enum Repr {
    Plain(String),
    Protected(SecretString),
}

impl ClientSecretValue {
    /// Creates a plain-text secret value.
    pub fn plain(secret: impl Into<String>) -> Self {
        Self(Repr::Plain(secret.into()))
    }

    /// Creates a protected secret value.
    #[must_use]
    pub fn protected(secret: SecretString) -> Self {
        Self(Repr::Protected(secret))
    }

    pub(crate) fn write_to(&self, form: &mut ParameterSet) {
        match &self.0 {
            Repr::Plain(secret) => form.set(OAuthParameter::ClientSecret, secret.clone()),
            Repr::Protected(secret) => {
                form.set_secure(OAuthParameter::ClientSecret, secret.clone());
            }
        }
    }
}

impl From<&str> for ClientSecretValue {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl From<String> for ClientSecretValue {
    fn from(value: String) -> Self {
        Self::plain(value)
    }
}

impl From<SecretString> for ClientSecretValue {
    fn from(value: SecretString) -> Self {
        Self::protected(value)
    }
}
