//! Builds a client-credentials token request authenticated with a freshly
//! generated certificate key, then prints the encoded request body.

use snafu::prelude::*;
use thane::{
    client_auth::{CertificateCredential, ClientKey},
    crypto::signer::{RsaAlgorithm, RsaPrivateKey},
    request::ClientCredentialsRequest,
};

#[snafu::report]
fn main() -> Result<(), snafu::Whatever> {
    let key = RsaPrivateKey::generate(RsaAlgorithm::Rs256, Some("demo-key"))
        .whatever_context("Failed to generate signing key")?;

    let credential = CertificateCredential::builder()
        .client_id("demo-client")
        .key(key)
        .audience("https://login.example/token")
        .whatever_context("Invalid audience")?
        .build();
    let client_key = ClientKey::Certificate(credential);

    let form = ClientCredentialsRequest::builder()
        .resource("https://graph.example")
        .client_key(&client_key)
        .build()
        .to_form()
        .whatever_context("Failed to build token request")?;

    let body = form
        .to_body()
        .whatever_context("Failed to encode request body")?;
    println!("{}", String::from_utf8_lossy(&body));

    Ok(())
}
