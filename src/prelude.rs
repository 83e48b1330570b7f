//! Imports for syntax extensions.

pub use crate::IntoAbsoluteUri as _;
pub use crate::crypto::signer::JwsSigningKey as _;
pub use crate::secrets::Secret as _;
