//! # pve-engine — Proof Validation Core
//!
//! Decides whether submitted proofs are accepted, remembers which balanced
//! proofs have been validated and by whom, and lets an owner manage which
//! validators serve which proof identifiers.
//!
//! ## Architecture
//!
//! - **Registry** (`registry.rs`): write-once, epoch-gated bindings from
//!   proof identifier to validator handle, with irreversible revocation.
//!
//! - **Ledger** (`ledger.rs`): the set of `(fingerprint, proof, owner)`
//!   validated-proof facts, with all-or-nothing clearing.
//!
//! - **Dispatch** (`dispatch.rs`): `validate`, `validate_by_hash`, `clear`.
//!
//! - **Admin** (`admin.rs`): owner-gated registry and versioning mutations.
//!
//! - **Engine** (`engine.rs`): [`ProofEngine`], the explicit state object
//!   that owns all of the above plus the event journal.
//!
//! - **Shared** (`shared.rs`): [`SharedEngine`] for concurrent hosts.
//!
//! - **Persistence** (`snapshot.rs`, `config.rs`): JSON snapshots and
//!   YAML/JSON genesis configuration.
//!
//! ## Crate Policy
//!
//! - Every `&mut self` operation on [`ProofEngine`] is one transaction.
//! - Validators are invoked with no engine borrow outstanding.
//! - No `unwrap()` or `expect()` outside tests.

pub mod admin;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod shared;
pub mod snapshot;

pub use config::{ConfigError, EngineConfig, GenesisBinding};
pub use engine::{ProofEngine, DEFAULT_INITIAL_EPOCH};
pub use events::{EngineEvent, EventRecord};
pub use ledger::{LedgerKey, ValidatedProofLedger};
pub use registry::{ValidatorBinding, ValidatorRegistry};
pub use shared::SharedEngine;
pub use snapshot::{BindingRecord, EngineSnapshot, SnapshotError};
