//! # Error Types — Engine Failure Taxonomy
//!
//! Every boundary operation of the engine fails with an [`EngineError`].
//! Each variant is a distinct failure kind carrying the offending
//! identifier, fingerprint, or caller as structured fields.
//!
//! ## Design
//!
//! - An error aborts the whole enclosing operation. No variant implies a
//!   partial effect on registry or ledger state.
//! - There is no retry inside the engine; retry policy belongs to the caller.
//! - Text-parsing failures live in their own enums ([`IdentifierError`],
//!   [`HexError`]) so the engine taxonomy stays closed.

use thiserror::Error;

use crate::digest::Fingerprint;
use crate::identifier::ProofIdentifier;
use crate::identity::Identity;

/// Failure kinds surfaced by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A privileged operation was invoked by someone other than the owner.
    #[error("unauthorized: {caller} is not the engine owner")]
    Unauthorized {
        /// The identity that attempted the operation.
        caller: Identity,
    },

    /// No validator is bound to the proof identifier.
    #[error("no validator registered for proof {proof}")]
    UnknownValidator {
        /// The identifier that was looked up.
        proof: ProofIdentifier,
    },

    /// The validator bound to the proof identifier has been revoked.
    #[error("validator for proof {proof} has been disabled")]
    DisabledValidator {
        /// The revoked identifier.
        proof: ProofIdentifier,
    },

    /// A validator binding already exists; bindings are write-once.
    #[error("a validator is already registered for proof {proof}")]
    AlreadyRegistered {
        /// The identifier that is already bound.
        proof: ProofIdentifier,
    },

    /// The identifier's epoch is newer than the latest epoch.
    #[error("proof {proof} has epoch {epoch}, latest epoch is {latest}")]
    EpochExceeded {
        /// The identifier being registered.
        proof: ProofIdentifier,
        /// The identifier's epoch field.
        epoch: u8,
        /// LatestEpoch at registration time.
        latest: u32,
    },

    /// The latest epoch counter cannot advance further.
    #[error("latest epoch {latest} cannot be incremented")]
    EpochOverflow {
        /// The current (maximal) latest epoch.
        latest: u32,
    },

    /// An all-zero fingerprint was supplied to a clear request.
    #[error("fingerprint at position {index} is zero")]
    InvalidFingerprint {
        /// Position of the fingerprint within the request.
        index: usize,
    },

    /// The ledger holds no validated record for the fingerprint.
    #[error("fingerprint {fingerprint} was not previously validated for proof {proof}")]
    NotPreviouslyValidated {
        /// The identifier supplied to the clear request.
        proof: ProofIdentifier,
        /// The fingerprint with no matching record.
        fingerprint: Fingerprint,
    },

    /// The validator itself declined the proof.
    #[error("proof {proof} rejected by validator: {reason}")]
    ValidationRejected {
        /// The identifier whose validator rejected the proof.
        proof: ProofIdentifier,
        /// The validator's explanation.
        reason: String,
    },
}

impl EngineError {
    /// Short stable name of the failure kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::UnknownValidator { .. } => "unknown_validator",
            Self::DisabledValidator { .. } => "disabled_validator",
            Self::AlreadyRegistered { .. } => "already_registered",
            Self::EpochExceeded { .. } => "epoch_exceeded",
            Self::EpochOverflow { .. } => "epoch_overflow",
            Self::InvalidFingerprint { .. } => "invalid_fingerprint",
            Self::NotPreviouslyValidated { .. } => "not_previously_validated",
            Self::ValidationRejected { .. } => "validation_rejected",
        }
    }
}

/// Error parsing or constructing a [`ProofIdentifier`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The packed value does not fit in 24 bits.
    #[error("packed proof identifier {0:#x} exceeds 24 bits")]
    OutOfRange(u64),

    /// The text form could not be parsed.
    #[error("malformed proof identifier {input:?}: {reason}")]
    Malformed {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Error decoding a hex-encoded fixed-size value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    /// Wrong number of hex characters for the target width.
    #[error("expected {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Required character count.
        expected: usize,
        /// Supplied character count.
        actual: usize,
    },

    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex at position {position}")]
    InvalidCharacter {
        /// Offset of the bad character pair.
        position: usize,
    },
}
