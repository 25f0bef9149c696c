//! # pve-cli — Command-Line Driver for the Proof Validation Engine
//!
//! Provides the `pve` binary. Engine state lives in a JSON snapshot file
//! (`--state`, default `pve-state.json`). Every subcommand loads the
//! snapshot, runs one engine operation, and writes the snapshot back only
//! if that operation succeeded.
//!
//! ## Subcommands
//!
//! - `pve init` — Build genesis state from a YAML or JSON config.
//! - `pve set-validator`, `invalidate`, `increment-epoch`, `set-params`,
//!   `transfer-ownership` — Owner-gated administration.
//! - `pve validate`, `validate-by-hash`, `clear` — Dispatch and ledger.
//! - `pve params`, `status`, `events` — Read-only inspection.
//!
//! ```bash
//! pve init --config engine.yaml
//! pve validate --proof 1.1.1 --sender $SENDER --data 6e6f7465
//! pve validate-by-hash --proof 1.1.1 --sender $SENDER --fingerprint $FP
//! ```
//!
//! Validator names in the state file resolve through the built-in catalog.

pub mod admin;
pub mod genesis;
pub mod inspect;
pub mod proof;
pub mod store;

/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "pve-state.json";
