//! # Caller Identities
//!
//! `Identity` names the party on whose behalf an operation runs: the sender
//! of a proof, the holder of the owner credential, or the party clearing
//! ledger records. It is an opaque 32-byte value; the engine only compares
//! identities for equality.
//!
//! ## Serde
//!
//! Serializes as a 64-character lowercase hex string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HexError;
use crate::hex;

/// An opaque 32-byte caller identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Create an identity from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
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

impl std::str::FromStr for Identity {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
