//! # Sub-Output Fingerprints
//!
//! A fingerprint is the SHA-256 digest of one sub-output emitted by a
//! validator. Fingerprints are the first component of every ledger key and
//! the handle by which a second party later consults a validated fact.
//!
//! ## Security Invariant
//!
//! The all-zero fingerprint is reserved as "no value" and is rejected by
//! ledger clearing. SHA-256 never produces it for real input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::HexError;
use crate::hex;

/// A 32-byte sub-output fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// The reserved all-zero fingerprint.
    pub const ZERO: Fingerprint = Fingerprint([0u8; 32]);

    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the reserved all-zero value.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from a 64-character hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        hex::decode_32(s).map(Self)
    }
}

/// Fingerprint a single sub-output.
pub fn fingerprint(sub_output: &[u8]) -> Fingerprint {
    let hash = Sha256::digest(sub_output);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Fingerprint(bytes)
}

impl std::str::FromStr for Fingerprint {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
