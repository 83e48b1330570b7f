//! Token-request construction for `OAuth2` identity providers.
//!
//! The crate assembles the form payloads a client POSTs to a token
//! endpoint, covering the authorization-code, client-credentials,
//! refresh-token, and on-behalf-of grants. Client authentication is
//! polymorphic ([`client_auth::ClientKey`]): a shared secret, a pre-built
//! signed assertion, or a certificate-backed key that signs a fresh JWT
//! assertion per request.
//!
//! Transport, token caching, and response parsing belong to the caller;
//! the produced [`params::ParameterSet`] hands its encoded body to
//! whatever HTTP client the application already uses.

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client_auth;
pub mod crypto;
mod error;
pub mod jwt;
pub mod params;
pub mod prelude;
pub mod request;
pub mod secrets;
mod uri;
mod uuid;

pub use error::{BoxedError, Error};
pub use uri::{AbsoluteUri, AbsoluteUriError, IntoAbsoluteUri};

/// Documentation
pub mod _documentation {
    #[doc = include_str!("../README.md")]
    mod readme {}
    #[doc = include_str!("../CHANGELOG.md")]
    pub mod changelog {}
}

/// Re-export of parts of the `secrecy` crate.
pub mod secrecy {
    pub use ::secrecy::{ExposeSecret, SecretBox, SecretString};
}
