//! # Hex Encoding Helpers
//!
//! Fixed-width lowercase hex used by every 32-byte newtype for JSON and CLI
//! interchange. An optional `0x` prefix is accepted on input.

use crate::error::HexError;

/// Render bytes as a lowercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Short prefix used in `Debug` output so full values never flood logs.
pub fn prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// Decode exactly 32 bytes from a 64-character hex string.
pub fn decode_32(hex: &str) -> Result<[u8; 32], HexError> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != 64 {
        return Err(HexError::InvalidLength {
            expected: 64,
            actual: hex.len(),
        });
    }
    let mut out = [0u8; 32];
    for (i, slot) in out.iter_mut().enumerate() {
        let pos = i * 2;
        *slot = hex
            .get(pos..pos + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or(HexError::InvalidCharacter { position: pos })?;
    }
    Ok(out)
}

/// Decode an arbitrary-length hex string into bytes.
pub fn decode(hex: &str) -> Result<Vec<u8>, HexError> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidLength {
            expected: hex.len() + 1,
            actual: hex.len(),
        });
    }
    (0..hex.len())
        .step_by(2)
        .map(|pos| {
            hex.get(pos..pos + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(HexError::InvalidCharacter { position: pos })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_32_accepts_prefix_and_case() {
        let hex = format!("0x{}", "AB".repeat(32));
        assert_eq!(decode_32(&hex).unwrap(), [0xab; 32]);
    }

    #[test]
    fn test_decode_32_rejects_short_input() {
        assert_eq!(
            decode_32("abcd"),
            Err(HexError::InvalidLength {
                expected: 64,
                actual: 4
            })
        );
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert_eq!(decode("zz"), Err(HexError::InvalidCharacter { position: 0 }));
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert!(decode("abc").is_err());
    }

    #[test]
    fn test_decode_rejects_multibyte_without_panicking() {
        assert!(decode("é1").is_err());
    }

    #[test]
    fn test_encode_lowercase() {
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(prefix(&[1, 2, 3, 4, 5, 6]), "01020304");
    }
}
