//! # Proof Engine State
//!
//! `ProofEngine` is the explicit state object that replaces global
//! contract-style storage: the validator registry, the validated-proof
//! ledger, LatestEpoch, the common reference parameters, the owner
//! credential and the event journal.
//!
//! Operations are split by concern across sibling modules:
//!
//! - `dispatch.rs`: `validate`, `validate_by_hash`, `clear`.
//! - `admin.rs`: owner-gated mutations.
//! - `snapshot.rs`: persistence.
//!
//! Every method taking `&mut self` is a complete transaction: it either
//! commits all of its effects or returns an error having changed nothing.

use pve_core::{Identity, ProofIdentifier, ReferenceParameters};
use pve_validator::ValidatorHandle;

use crate::events::{EngineEvent, EventRecord};
use crate::ledger::ValidatedProofLedger;
use crate::registry::ValidatorRegistry;

/// LatestEpoch of a freshly created engine.
pub const DEFAULT_INITIAL_EPOCH: u32 = 1;

/// The proof validation engine.
#[derive(Debug, Clone)]
pub struct ProofEngine {
    pub(crate) owner: Identity,
    pub(crate) latest_epoch: u32,
    pub(crate) reference_parameters: ReferenceParameters,
    pub(crate) registry: ValidatorRegistry,
    pub(crate) ledger: ValidatedProofLedger,
    pub(crate) journal: Vec<EventRecord>,
}

impl ProofEngine {
    /// A new engine owned by `owner`, at [`DEFAULT_INITIAL_EPOCH`], with
    /// all-zero reference parameters.
    pub fn new(owner: Identity) -> Self {
        Self::with_initial_epoch(owner, DEFAULT_INITIAL_EPOCH)
    }

    /// A new engine starting at `initial_epoch`.
    pub fn with_initial_epoch(owner: Identity, initial_epoch: u32) -> Self {
        Self {
            owner,
            latest_epoch: initial_epoch,
            reference_parameters: ReferenceParameters::default(),
            registry: ValidatorRegistry::new(),
            ledger: ValidatedProofLedger::new(),
            journal: Vec::new(),
        }
    }

    /// Current holder of the owner credential.
    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// Current LatestEpoch.
    pub fn latest_epoch(&self) -> u32 {
        self.latest_epoch
    }

    /// The common reference parameters.
    pub fn reference_parameters(&self) -> &ReferenceParameters {
        &self.reference_parameters
    }

    /// The handle bound to `proof`, whether or not it is revoked.
    pub fn validator(&self, proof: ProofIdentifier) -> Option<&ValidatorHandle> {
        self.registry.binding(proof).map(|b| b.handle())
    }

    /// Whether `proof` is bound and revoked.
    pub fn is_revoked(&self, proof: ProofIdentifier) -> bool {
        self.registry.is_revoked(proof)
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Read access to the ledger.
    pub fn ledger(&self) -> &ValidatedProofLedger {
        &self.ledger
    }

    /// Number of validated-proof facts currently recorded.
    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }

    /// The event journal, oldest first.
    pub fn events(&self) -> &[EventRecord] {
        &self.journal
    }

    /// Take the journal, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.journal)
    }

    pub(crate) fn emit(&mut self, event: EngineEvent) {
        self.journal.push(EventRecord::now(event));
    }
}
