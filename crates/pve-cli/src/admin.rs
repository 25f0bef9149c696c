//! # Admin Subcommands
//!
//! Owner-gated mutations. Each takes `--caller`, the identity presenting
//! the owner credential; any other caller is refused and the state file is
//! left as it was.
//!
//! - `set-validator` — Bind a catalog validator to a proof identifier.
//! - `invalidate` — Revoke a binding.
//! - `increment-epoch` — Advance LatestEpoch.
//! - `set-params` — Replace the six reference parameters.
//! - `transfer-ownership` — Move the owner credential.

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Args;
use pve_core::{Identity, ProofIdentifier, ReferenceParameters};

use crate::store;

/// Arguments for `pve set-validator`.
#[derive(Args, Debug)]
pub struct SetValidatorArgs {
    /// Owner identity (32-byte hex).
    #[arg(long)]
    pub caller: Identity,
    /// Proof identifier (`epoch.category.id`, decimal, or `0x` hex).
    #[arg(long)]
    pub proof: ProofIdentifier,
    /// Catalog name of the validator (`echo`, `blob`, `mock`, `reject`).
    #[arg(long)]
    pub validator: String,
}

/// Arguments for `pve invalidate`.
#[derive(Args, Debug)]
pub struct InvalidateArgs {
    /// Owner identity (32-byte hex).
    #[arg(long)]
    pub caller: Identity,
    /// Proof identifier to revoke.
    #[arg(long)]
    pub proof: ProofIdentifier,
}

/// Arguments for owner-only subcommands with no other input.
#[derive(Args, Debug)]
pub struct CallerArgs {
    /// Owner identity (32-byte hex).
    #[arg(long)]
    pub caller: Identity,
}

/// Arguments for `pve set-params`.
#[derive(Args, Debug)]
pub struct SetParamsArgs {
    /// Owner identity (32-byte hex).
    #[arg(long)]
    pub caller: Identity,
    /// One 32-byte hex value per slot. Exactly six, in order.
    #[arg(long = "param", required = true)]
    pub params: Vec<String>,
}

/// Arguments for `pve transfer-ownership`.
#[derive(Args, Debug)]
pub struct TransferOwnershipArgs {
    /// Current owner identity (32-byte hex).
    #[arg(long)]
    pub caller: Identity,
    /// Identity that receives the owner credential.
    #[arg(long)]
    pub new_owner: Identity,
}

/// Execute `pve set-validator`.
pub fn run_set_validator(args: &SetValidatorArgs, state: &Path) -> Result<u8> {
    let handle = store::catalog()
        .get(&args.validator)
        .ok_or_else(|| anyhow!("unknown validator: {}", args.validator))?;
    store::update(state, |engine| {
        engine.set_validator(args.caller, args.proof, handle)
    })?;
    println!("OK: bound {} to validator {}", args.proof, args.validator);
    Ok(0)
}

/// Execute `pve invalidate`.
pub fn run_invalidate(args: &InvalidateArgs, state: &Path) -> Result<u8> {
    store::update(state, |engine| engine.invalidate(args.caller, args.proof))?;
    println!("OK: invalidated {}", args.proof);
    Ok(0)
}

/// Execute `pve increment-epoch`.
pub fn run_increment_epoch(args: &CallerArgs, state: &Path) -> Result<u8> {
    let latest = store::update(state, |engine| engine.increment_epoch(args.caller))?;
    println!("OK: latest epoch is now {latest}");
    Ok(0)
}

/// Execute `pve set-params`.
pub fn run_set_params(args: &SetParamsArgs, state: &Path) -> Result<u8> {
    let params = ReferenceParameters::from_hex_slots(&args.params)?;
    store::update(state, |engine| {
        engine.set_reference_parameters(args.caller, params)
    })?;
    println!("OK: reference parameters replaced");
    Ok(0)
}

/// Execute `pve transfer-ownership`.
pub fn run_transfer_ownership(args: &TransferOwnershipArgs, state: &Path) -> Result<u8> {
    store::update(state, |engine| {
        engine.transfer_ownership(args.caller, args.new_owner)
    })?;
    println!("OK: ownership transferred to {}", args.new_owner);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pve_engine::ProofEngine;

    const OWNER: Identity = Identity::from_bytes([0x0e; 32]);
    const MALLORY: Identity = Identity::from_bytes([0x66; 32]);
    const PROOF: ProofIdentifier = ProofIdentifier::new(1, 1, 1);

    fn fresh() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        store::save(&ProofEngine::new(OWNER), &state).unwrap();
        (dir, state)
    }

    fn bind(state: &Path, caller: Identity) -> Result<u8> {
        run_set_validator(
            &SetValidatorArgs {
                caller,
                proof: PROOF,
                validator: "echo".to_string(),
            },
            state,
        )
    }

    #[test]
    fn test_set_validator_persists_binding() {
        let (_dir, state) = fresh();
        assert_eq!(bind(&state, OWNER).unwrap(), 0);
        let engine = store::load(&state).unwrap();
        assert_eq!(engine.validator(PROOF).map(|h| h.name()), Some("echo"));
    }

    #[test]
    fn test_set_validator_unknown_name() {
        let (_dir, state) = fresh();
        let args = SetValidatorArgs {
            caller: OWNER,
            proof: PROOF,
            validator: "groth16".to_string(),
        };
        let err = run_set_validator(&args, &state).unwrap_err();
        assert!(err.to_string().contains("unknown validator"));
    }

    #[test]
    fn test_non_owner_is_refused() {
        let (_dir, state) = fresh();
        assert!(bind(&state, MALLORY).is_err());
        assert!(run_increment_epoch(&CallerArgs { caller: MALLORY }, &state).is_err());
        let engine = store::load(&state).unwrap();
        assert!(engine.registry().is_empty());
        assert_eq!(engine.latest_epoch(), 1);
    }

    #[test]
    fn test_invalidate_and_epoch() {
        let (_dir, state) = fresh();
        bind(&state, OWNER).unwrap();
        run_invalidate(&InvalidateArgs { caller: OWNER, proof: PROOF }, &state).unwrap();
        run_increment_epoch(&CallerArgs { caller: OWNER }, &state).unwrap();
        let engine = store::load(&state).unwrap();
        assert!(engine.is_revoked(PROOF));
        assert_eq!(engine.latest_epoch(), 2);
    }

    #[test]
    fn test_set_params_requires_six_values() {
        let (_dir, state) = fresh();
        let five = SetParamsArgs {
            caller: OWNER,
            params: vec!["11".repeat(32); 5],
        };
        assert!(run_set_params(&five, &state).is_err());

        let six = SetParamsArgs {
            caller: OWNER,
            params: vec!["11".repeat(32); 6],
        };
        run_set_params(&six, &state).unwrap();
        let engine = store::load(&state).unwrap();
        assert_eq!(engine.reference_parameters(), &ReferenceParameters::new([[0x11; 32]; 6]));
    }

    #[test]
    fn test_transfer_ownership() {
        let (_dir, state) = fresh();
        let args = TransferOwnershipArgs {
            caller: OWNER,
            new_owner: MALLORY,
        };
        run_transfer_ownership(&args, &state).unwrap();
        assert_eq!(store::load(&state).unwrap().owner(), MALLORY);
        assert!(bind(&state, OWNER).is_err());
    }
}
