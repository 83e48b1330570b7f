//! JWT support.
//!
//! Supports the following operations:
//!  - Typesafe JWT builder
//!  - Creation of a JWT using JWS compact serialization
//!
//! This crate only mints tokens; it never parses them.

mod builder;
mod structure;

pub use builder::{JwsSerializationError, Jwt, JwtBuilder};
