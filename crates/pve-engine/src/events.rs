//! # Engine Event Journal
//!
//! Every committed mutation appends one timestamped [`EventRecord`]. Failed
//! operations append nothing, so the journal is an exact history of state
//! changes in commit order.

use pve_core::{Fingerprint, Identity, ProofIdentifier, Timestamp};
use serde::{Deserialize, Serialize};

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A validator was bound to a proof identifier.
    ValidatorSet {
        /// The newly bound identifier.
        proof: ProofIdentifier,
        /// Name of the bound validator.
        validator: String,
    },
    /// A validator binding was revoked.
    ValidatorInvalidated {
        /// The revoked identifier.
        proof: ProofIdentifier,
    },
    /// LatestEpoch advanced.
    EpochIncremented {
        /// The new latest epoch.
        latest_epoch: u32,
    },
    /// The common reference parameters were replaced.
    ReferenceParametersSet,
    /// A balanced proof was validated and its fingerprints recorded.
    ProofValidated {
        /// The validated proof type.
        proof: ProofIdentifier,
        /// The identity the facts were recorded for.
        sender: Identity,
        /// Recorded fingerprints, in sub-output order.
        fingerprints: Vec<Fingerprint>,
    },
    /// Ledger records were cleared.
    ProofsCleared {
        /// The proof type of the cleared records.
        proof: ProofIdentifier,
        /// The owner who cleared them.
        caller: Identity,
        /// Cleared fingerprints, in request order.
        fingerprints: Vec<Fingerprint>,
    },
    /// The owner credential moved to a new identity.
    OwnershipTransferred {
        /// Previous owner.
        previous: Identity,
        /// New owner.
        current: Identity,
    },
}

impl EngineEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidatorSet { .. } => "validator_set",
            Self::ValidatorInvalidated { .. } => "validator_invalidated",
            Self::EpochIncremented { .. } => "epoch_incremented",
            Self::ReferenceParametersSet => "reference_parameters_set",
            Self::ProofValidated { .. } => "proof_validated",
            Self::ProofsCleared { .. } => "proofs_cleared",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }
}

/// A journal entry: an event and when it was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Commit time.
    pub timestamp: Timestamp,
    /// What changed.
    #[serde(flatten)]
    pub event: EngineEvent,
}

impl EventRecord {
    pub(crate) fn now(event: EngineEvent) -> Self {
        Self {
            timestamp: Timestamp::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let record = EventRecord::now(EngineEvent::ValidatorInvalidated {
            proof: ProofIdentifier::new(1, 1, 1),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["event"], "validator_invalidated");
        assert_eq!(json["proof"], 65_793);
        let back: EventRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_unit_event_roundtrip() {
        let record = EventRecord::now(EngineEvent::ReferenceParametersSet);
        let json = serde_json::to_string(&record).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event.name(), "reference_parameters_set");
    }
}
