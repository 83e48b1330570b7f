use snafu::prelude::*;

use crate::{
    secrecy::SecretString,
    secrets::{DecodingError, SecretDecoder, encodings::InvalidUtf8Snafu},
};

/// Interprets bytes as UTF-8 text, returning a `SecretString`.
///
/// Trims leading/trailing whitespace from the decoded string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringEncoding;

impl SecretDecoder for StringEncoding {
    type Output = SecretString;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Output, DecodingError> {
        let s = std::str::from_utf8(bytes).context(InvalidUtf8Snafu)?;
        Ok(SecretString::from(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let decoded = StringEncoding
            .decode(b"  s3cr3t\n")
            .expect("valid UTF-8");

        assert_eq!(decoded.expose_secret(), "s3cr3t");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let result = StringEncoding.decode(&[0xFF, 0xFE]);

        assert!(matches!(result, Err(DecodingError::InvalidUtf8 { .. })));
    }
}
