//! # Validator Trait
//!
//! Defines the contract every pluggable validator satisfies and the
//! capability handle the registry stores for it.
//!
//! ## Security Invariant
//!
//! `Validator::validate` takes its inputs by shared reference and returns
//! an owned [`OutputBlob`]. A validator has no path to the engine's registry
//! or ledger through this interface, so invoking one cannot mutate engine
//! state. Implementations must be `Send + Sync` because a handle may be
//! invoked from any thread holding the engine.

use std::fmt;
use std::sync::Arc;

use pve_core::{Identity, ReferenceParameters};
use thiserror::Error;

use crate::output::OutputBlob;

/// A validator declined to accept proof data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorRejection {
    /// The proof data could not be decoded.
    #[error("malformed proof data: {0}")]
    Malformed(String),
    /// The proof data decoded but failed verification.
    #[error("proof verification failed: {0}")]
    Invalid(String),
}

/// A pluggable proof validator.
pub trait Validator: Send + Sync {
    /// Check `proof_data` submitted on behalf of `sender` against the common
    /// reference parameters, returning the proof's sub-outputs on success.
    fn validate(
        &self,
        proof_data: &[u8],
        sender: &Identity,
        params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection>;
}

/// A named, shareable reference to a validator capability.
///
/// Cloning a handle clones the reference, not the validator. Two handles
/// are the same capability only if they point at the same allocation; see
/// [`ValidatorHandle::same_capability`].
#[derive(Clone)]
pub struct ValidatorHandle {
    name: String,
    validator: Arc<dyn Validator>,
}

impl ValidatorHandle {
    /// Wrap a validator under a name.
    pub fn new(name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
        }
    }

    /// Wrap an already shared validator.
    pub fn from_arc(name: impl Into<String>, validator: Arc<dyn Validator>) -> Self {
        Self {
            name: name.into(),
            validator,
        }
    }

    /// The name the capability was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles reference the same validator allocation.
    pub fn same_capability(&self, other: &ValidatorHandle) -> bool {
        Arc::ptr_eq(&self.validator, &other.validator)
    }

    /// Invoke the validator.
    pub fn invoke(
        &self,
        proof_data: &[u8],
        sender: &Identity,
        params: &ReferenceParameters,
    ) -> Result<OutputBlob, ValidatorRejection> {
        self.validator.validate(proof_data, sender, params)
    }
}

impl fmt::Debug for ValidatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
