//! # pve-core — Foundational Types for the Proof Validation Engine
//!
//! This crate is the leaf of the workspace. It defines the value types that
//! every other crate passes around: the packed proof identifier, caller
//! identities, sub-output fingerprints, the common reference parameters, and
//! the error taxonomy surfaced at the engine boundary.
//!
//! ## Key Design Principles
//!
//! 1. **One canonical identifier format.** `ProofIdentifier` is the 24-bit
//!    packed `(epoch, category, id)` coordinate. Registry keys, ledger keys,
//!    events, snapshots and the CLI all use it. No bare `u32`s cross a crate
//!    boundary.
//!
//! 2. **Newtypes for every 32-byte value.** `Identity`, `Fingerprint` and the
//!    six `ReferenceParameters` slots are distinct types, so a fingerprint can
//!    never be passed where a caller identity is expected.
//!
//! 3. **Distinct, inspectable errors.** `EngineError` has exactly one variant
//!    per failure kind, so collaborators can branch on "proof type unknown"
//!    versus "proof type revoked" versus "this proof was rejected".
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pve-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod hex;
pub mod identifier;
pub mod identity;
pub mod params;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{fingerprint, Fingerprint};
pub use error::{EngineError, HexError, IdentifierError};
pub use identifier::{ProofCategory, ProofIdentifier, MAX_PACKED_IDENTIFIER};
pub use identity::Identity;
pub use params::{ReferenceParameters, REFERENCE_PARAMETER_COUNT};
pub use temporal::Timestamp;
