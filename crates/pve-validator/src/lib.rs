//! # pve-validator — Validator Collaborator Contract
//!
//! Validators are independently deployed capabilities that perform the
//! actual cryptographic check on proof data. The engine binds them to proof
//! identifiers, invokes them, and fingerprints what they return; it never
//! interprets proof data or sub-output contents itself.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): The [`Validator`] trait and the
//!   [`ValidatorHandle`] capability reference the registry stores.
//!
//! - **Output** (`output.rs`): [`OutputBlob`], the ordered sequence of
//!   sub-outputs a validator emits, with a length-prefixed wire form.
//!
//! - **Mock** (`mock.rs`): deterministic, transparent validators for tests
//!   and local deployments. They provide no cryptographic security.
//!
//! - **Catalog** (`catalog.rs`): a name → handle table so registry bindings
//!   can be persisted by name and rebound on restore.
//!
//! ## Crate Policy
//!
//! - Depends on `pve-core` only.
//! - Validators are pure with respect to engine state: they receive inputs
//!   by reference and return a value. Nothing in this crate can reach the
//!   registry or the ledger.

pub mod catalog;
#[cfg(feature = "mock")]
pub mod mock;
pub mod output;
pub mod traits;

pub use catalog::ValidatorCatalog;
#[cfg(feature = "mock")]
pub use mock::{BlobValidator, EchoValidator, MockValidator, RejectingValidator};
pub use output::{BlobError, OutputBlob};
pub use traits::{Validator, ValidatorHandle, ValidatorRejection};
