use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;

/// A form parameter value with two backing representations.
///
/// Plain values behave like ordinary strings. Protected values live in
/// [`SecretString`] memory: they are redacted from `Debug` output and
/// invisible to [`as_plain`](Self::as_plain). Call sites pick a
/// representation once, at construction, via the `From` impls; nothing
/// downstream branches on it.
#[derive(Debug, Clone)]
pub enum FormValue {
    /// An ordinary string value.
    Plain(String),
    /// A value held in protected memory.
    Protected(SecretString),
}

impl FormValue {
    /// Returns the value if it is plain, `None` if it is protected.
    #[must_use]
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            FormValue::Plain(value) => Some(value),
            FormValue::Protected(_) => None,
        }
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

impl From<SecretString> for FormValue {
    fn from(value: SecretString) -> Self {
        Self::Protected(value)
    }
}

/// Serialization exposes protected values.
///
/// This is intentional and scoped to request-body encoding: the token
/// endpoint must receive the real secret. Nothing else in the crate
/// serializes a [`FormValue`].
impl Serialize for FormValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FormValue::Plain(value) => value.serialize(serializer),
            FormValue::Protected(secret) => secret.expose_secret().serialize(serializer),
        }
    }
}
