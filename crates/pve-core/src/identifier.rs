//! # Proof Identifiers — Packed `(epoch, category, id)` Coordinates
//!
//! A `ProofIdentifier` addresses one proof type at one version. It is a
//! 24-bit value made of three 8-bit fields:
//!
//! ```text
//!  23        16 15        8 7          0
//! ┌────────────┬───────────┬────────────┐
//! │   epoch    │ category  │     id     │
//! └────────────┴───────────┴────────────┘
//! packed = epoch * 65536 + category * 256 + id
//! ```
//!
//! The packed integer is the canonical key everywhere: registry bindings,
//! ledger records, events, snapshots and external APIs. Identifiers are
//! coordinates, not objects; nothing owns them.
//!
//! ## Text Forms
//!
//! - Dotted: `1.1.1`
//! - Packed decimal: `65793`
//! - Packed hex: `0x010101`
//!
//! `Display` renders the dotted form. Serde uses the packed integer.

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Largest value representable in 24 bits.
pub const MAX_PACKED_IDENTIFIER: u32 = 0x00FF_FFFF;

/// The category field of a proof identifier.
///
/// Only [`ProofCategory::Balanced`] has engine-visible behavior: successful
/// validation of a balanced proof records its sub-output fingerprints in the
/// ledger. The other named codes exist so tooling can label them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProofCategory {
    /// Proofs that establish a balancing relationship between inputs and
    /// outputs. Their sub-outputs are recorded for later consultation.
    Balanced,
    /// Proofs that create new value.
    Mint,
    /// Proofs that destroy value.
    Burn,
    /// Auxiliary proofs with no balancing semantics.
    Utility,
    /// Any code without a name.
    Other(u8),
}

impl ProofCategory {
    /// Map an 8-bit category code to a category.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Balanced,
            2 => Self::Mint,
            3 => Self::Burn,
            4 => Self::Utility,
            other => Self::Other(other),
        }
    }

    /// The 8-bit code stored in the identifier.
    pub fn code(self) -> u8 {
        match self {
            Self::Balanced => 1,
            Self::Mint => 2,
            Self::Burn => 3,
            Self::Utility => 4,
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ProofCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => f.write_str("BALANCED"),
            Self::Mint => f.write_str("MINT"),
            Self::Burn => f.write_str("BURN"),
            Self::Utility => f.write_str("UTILITY"),
            Self::Other(code) => write!(f, "CATEGORY({code})"),
        }
    }
}

/// A packed 24-bit proof identifier.
///
/// The inner value is private; every constructor guarantees it fits in
/// 24 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ProofIdentifier(u32);

impl ProofIdentifier {
    /// Build an identifier from its three fields.
    pub const fn new(epoch: u8, category: u8, id: u8) -> Self {
        Self(((epoch as u32) << 16) | ((category as u32) << 8) | id as u32)
    }

    /// Build an identifier from a named category.
    pub fn with_category(epoch: u8, category: ProofCategory, id: u8) -> Self {
        Self::new(epoch, category.code(), id)
    }

    /// Rebuild an identifier from its packed form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::OutOfRange`] if `packed` exceeds 24 bits.
    pub fn from_packed(packed: u32) -> Result<Self, IdentifierError> {
        if packed > MAX_PACKED_IDENTIFIER {
            return Err(IdentifierError::OutOfRange(u64::from(packed)));
        }
        Ok(Self(packed))
    }

    /// The packed 24-bit value.
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// The epoch field.
    pub const fn epoch(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The raw category code.
    pub const fn category_code(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The category field.
    pub fn category(self) -> ProofCategory {
        ProofCategory::from_code(self.category_code())
    }

    /// The id field.
    pub const fn id(self) -> u8 {
        self.0 as u8
    }

    /// Whether validation of this proof type records ledger facts.
    pub fn is_balanced(self) -> bool {
        self.category() == ProofCategory::Balanced
    }
}

impl TryFrom<u32> for ProofIdentifier {
    type Error = IdentifierError;

    fn try_from(packed: u32) -> Result<Self, Self::Error> {
        Self::from_packed(packed)
    }
}

impl From<ProofIdentifier> for u32 {
    fn from(id: ProofIdentifier) -> Self {
        id.packed()
    }
}

impl std::fmt::Display for ProofIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.epoch(), self.category_code(), self.id())
    }
}

impl std::str::FromStr for ProofIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let malformed = |reason: &str| IdentifierError::Malformed {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input.contains('.') {
            let fields: Vec<&str> = input.split('.').collect();
            if fields.len() != 3 {
                return Err(malformed("expected epoch.category.id"));
            }
            let mut parsed = [0u8; 3];
            for (slot, field) in parsed.iter_mut().zip(&fields) {
                *slot = field
                    .parse::<u8>()
                    .map_err(|_| malformed("each field must be an integer in 0..=255"))?;
            }
            return Ok(Self::new(parsed[0], parsed[1], parsed[2]));
        }

        let packed = match input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => input.parse::<u64>(),
        }
        .map_err(|_| malformed("not a packed integer"))?;

        if packed > u64::from(MAX_PACKED_IDENTIFIER) {
            return Err(IdentifierError::OutOfRange(packed));
        }
        Ok(Self(packed as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_layout() {
        let id = ProofIdentifier::new(1, 1, 1);
        assert_eq!(id.packed(), 65_793);
        assert_eq!(id.packed(), 0x01_01_01);
        assert_eq!(ProofIdentifier::new(2, 0, 0).packed(), 2 * 65_536);
        assert_eq!(ProofIdentifier::new(0, 3, 0).packed(), 3 * 256);
    }

    #[test]
    fn test_field_accessors() {
        let id = ProofIdentifier::new(7, 4, 200);
        assert_eq!(id.epoch(), 7);
        assert_eq!(id.category_code(), 4);
        assert_eq!(id.category(), ProofCategory::Utility);
        assert_eq!(id.id(), 200);
    }

    #[test]
    fn test_from_packed_rejects_25_bit_values() {
        assert!(ProofIdentifier::from_packed(MAX_PACKED_IDENTIFIER).is_ok());
        assert_eq!(
            ProofIdentifier::from_packed(MAX_PACKED_IDENTIFIER + 1),
            Err(IdentifierError::OutOfRange(0x0100_0000))
        );
    }

    #[test]
    fn test_balanced_detection() {
        assert!(ProofIdentifier::with_category(1, ProofCategory::Balanced, 1).is_balanced());
        assert!(!ProofIdentifier::with_category(1, ProofCategory::Mint, 1).is_balanced());
        assert!(!ProofIdentifier::new(1, 0, 1).is_balanced());
    }

    #[test]
    fn test_category_codes() {
        for code in 0..=255u8 {
            assert_eq!(ProofCategory::from_code(code).code(), code);
        }
        assert_eq!(ProofCategory::from_code(9), ProofCategory::Other(9));
        assert_eq!(ProofCategory::Balanced.to_string(), "BALANCED");
    }

    #[test]
    fn test_parse_text_forms() {
        let expected = ProofIdentifier::new(1, 1, 1);
        assert_eq!("1.1.1".parse::<ProofIdentifier>().unwrap(), expected);
        assert_eq!("65793".parse::<ProofIdentifier>().unwrap(), expected);
        assert_eq!("0x010101".parse::<ProofIdentifier>().unwrap(), expected);
        assert_eq!(" 1.1.1 ".parse::<ProofIdentifier>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("1.1".parse::<ProofIdentifier>().is_err());
        assert!("1.1.1.1".parse::<ProofIdentifier>().is_err());
        assert!("1.256.1".parse::<ProofIdentifier>().is_err());
        assert!("abc".parse::<ProofIdentifier>().is_err());
        assert!(matches!(
            "0x1000000".parse::<ProofIdentifier>(),
            Err(IdentifierError::OutOfRange(0x0100_0000))
        ));
    }

    #[test]
    fn test_display_is_dotted() {
        assert_eq!(ProofIdentifier::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_serde_uses_packed_integer() {
        let id = ProofIdentifier::new(1, 1, 2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "65794");
        let parsed: ProofIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<ProofIdentifier>("16777216").is_err());
    }
}
