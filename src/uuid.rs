//! UUID v7 generation.
//!
//! Used to mint the `jti` claim of client assertions. Every call produces a
//! fresh identifier, so no two assertions share one even when issued within
//! the same millisecond.

use std::fmt::Write as _;

use rand::Rng as _;

/// Generates a UUID v7 as a hyphenated lowercase string.
///
/// The first 48 bits carry a Unix timestamp in milliseconds, the rest is
/// random. Identifiers are therefore time-ordered as well as unique.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn uuid_v7() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let mut bytes = [0u8; 16];
    bytes[..6].copy_from_slice(&millis.to_be_bytes()[2..8]);
    rand::thread_rng().fill(&mut bytes[6..]);

    // Version 7, RFC 4122 variant.
    bytes[6] = (bytes[6] & 0x0F) | 0x70;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_uuid_shape() {
        let id = uuid_v7();

        assert_eq!(id.len(), 36);
        let dashes: Vec<_> = id.match_indices('-').map(|(i, _)| i).collect();
        assert_eq!(dashes, vec![8, 13, 18, 23]);
        assert_eq!(&id[14..15], "7");
    }

    #[test]
    fn successive_identifiers_differ() {
        assert_ne!(uuid_v7(), uuid_v7());
    }
}
