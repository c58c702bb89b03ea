//! # Encoding Codecs
//!
//! Binary-to-text encodings used across keyproof. Base58 carries addresses
//! and signatures in wallet-friendly form; lowercase hex is the boring
//! machine-friendly alternative carried alongside it in exported artifacts.

pub mod base58;

pub use base58::{decode, decode_fixed, encode, Base58Error};

/// Render bytes as lowercase hex, two digits per byte, no separators.
///
/// Thin wrapper over the `hex` crate so the artifact exporter and the CLI
/// agree on one spelling of "hex" forever.
///
/// # Examples
///
/// ```
/// assert_eq!(keyproof::codec::encode_hex(&[0, 1, 2, 254, 255]), "000102feff");
/// ```
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rendering_is_lowercase_two_digits_per_byte() {
        assert_eq!(encode_hex(&[0, 1, 2, 254, 255]), "000102feff");
        assert_eq!(encode_hex(&[]), "");
        assert_eq!(encode_hex(&[0xAB]), "ab");
    }
}
