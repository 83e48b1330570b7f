use bon::Builder;

/// The client-assertion type identifier for JWT bearer assertions (RFC 7523).
pub const JWT_BEARER_ASSERTION_TYPE: &str =
    "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// A pre-built client assertion, already signed by the caller.
///
/// No signing occurs on this path; the assertion and its type identifier
/// are copied into the request verbatim.
#[derive(Debug, Clone, Builder)]
pub struct ClientAssertion {
    /// The signed assertion in compact serialization.
    #[builder(into)]
    assertion: String,
    /// The assertion-type identifier presented alongside it.
    #[builder(default = JWT_BEARER_ASSERTION_TYPE.to_owned(), into)]
    assertion_type: String,
}

impl ClientAssertion {
    /// The signed assertion.
    #[must_use]
    pub fn assertion(&self) -> &str {
        &self.assertion
    }

    /// The assertion-type identifier.
    #[must_use]
    pub fn assertion_type(&self) -> &str {
        &self.assertion_type
    }
}

/// A freshly signed client assertion.
///
/// Minted per request and never cached: the claims embed a time-bounded
/// validity window and a unique identifier, so reuse would present a stale
/// token.
#[derive(Debug, Clone)]
pub struct SignedAssertion {
    /// The assertion in JWS compact serialization.
    pub assertion: String,
    /// The assertion-type identifier.
    pub assertion_type: &'static str,
}
