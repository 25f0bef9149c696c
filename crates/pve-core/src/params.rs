//! # Common Reference Parameters
//!
//! Six 32-byte values shared by every validator invocation. The engine
//! holds exactly one copy; validators receive it by reference and never keep
//! their own. The engine does not check the values for cryptographic
//! well-formedness.

use serde::{Deserialize, Serialize};

use crate::error::HexError;
use crate::hex;

/// Number of slots in the reference parameter record.
pub const REFERENCE_PARAMETER_COUNT: usize = 6;

/// The shared reference parameter record.
///
/// Serializes as an array of six hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReferenceParameters([[u8; 32]; REFERENCE_PARAMETER_COUNT]);

impl ReferenceParameters {
    /// Build from raw slots.
    pub const fn new(slots: [[u8; 32]; REFERENCE_PARAMETER_COUNT]) -> Self {
        Self(slots)
    }

    /// Access all slots.
    pub fn slots(&self) -> &[[u8; 32]; REFERENCE_PARAMETER_COUNT] {
        &self.0
    }

    /// Access one slot, or `None` past the last.
    pub fn slot(&self, index: usize) -> Option<&[u8; 32]> {
        self.0.get(index)
    }

    /// Concatenation of all slots, in order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flatten().copied().collect()
    }

    /// Parse six hex strings.
    ///
    /// # Errors
    ///
    /// Returns [`HexError::InvalidLength`] (counting slots, not characters)
    /// if not exactly six values are supplied, or the first slot's decoding
    /// error otherwise.
    pub fn from_hex_slots<S: AsRef<str>>(values: &[S]) -> Result<Self, HexError> {
        if values.len() != REFERENCE_PARAMETER_COUNT {
            return Err(HexError::InvalidLength {
                expected: REFERENCE_PARAMETER_COUNT,
                actual: values.len(),
            });
        }
        let mut slots = [[0u8; 32]; REFERENCE_PARAMETER_COUNT];
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = hex::decode_32(value.as_ref())?;
        }
        Ok(Self(slots))
    }

    /// Render every slot as hex.
    pub fn to_hex_slots(&self) -> Vec<String> {
        self.0.iter().map(|slot| hex::encode(slot)).collect()
    }
}

impl Serialize for ReferenceParameters {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex_slots().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReferenceParameters {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<String>::deserialize(deserializer)?;
        Self::from_hex_slots(&values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceParameters {
        let mut slots = [[0u8; 32]; REFERENCE_PARAMETER_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = [i as u8 + 1; 32];
        }
        ReferenceParameters::new(slots)
    }

    #[test]
    fn test_default_is_all_zero() {
        assert!(ReferenceParameters::default().to_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_to_bytes_is_ordered_concatenation() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 32 * REFERENCE_PARAMETER_COUNT);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[32 * 5], 6);
    }

    #[test]
    fn test_slot_access() {
        let params = sample();
        assert_eq!(params.slot(2), Some(&[3u8; 32]));
        assert_eq!(params.slot(6), None);
    }

    #[test]
    fn test_wrong_slot_count_rejected() {
        let five = vec!["00".repeat(32); 5];
        assert!(ReferenceParameters::from_hex_slots(&five).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = sample();
        let json = serde_json::to_string(&params).unwrap();
        let back: ReferenceParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
