//! # Dispatch Subcommands
//!
//! `validate` submits proof data for a sender and prints the fingerprint of
//! every sub-output. `validate-by-hash` asks whether a fact was recorded.
//! `clear` removes facts the caller recorded earlier, all or nothing.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use pve_core::{hex, Fingerprint, Identity, ProofIdentifier};

use crate::store;

/// Arguments for `pve validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Proof identifier.
    #[arg(long)]
    pub proof: ProofIdentifier,
    /// Identity the resulting facts are recorded for.
    #[arg(long)]
    pub sender: Identity,
    /// Proof data, hex encoded.
    #[arg(long)]
    pub data: String,
}

/// Arguments for `pve validate-by-hash`.
#[derive(Args, Debug)]
pub struct ValidateByHashArgs {
    /// Proof identifier.
    #[arg(long)]
    pub proof: ProofIdentifier,
    /// Sub-output fingerprint (32-byte hex).
    #[arg(long)]
    pub fingerprint: Fingerprint,
    /// Identity the fact is claimed to belong to.
    #[arg(long)]
    pub sender: Identity,
}

/// Arguments for `pve clear`.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Proof identifier.
    #[arg(long)]
    pub proof: ProofIdentifier,
    /// Identity that recorded the facts.
    #[arg(long)]
    pub caller: Identity,
    /// Fingerprints to clear. Repeat for several.
    #[arg(long = "fingerprint")]
    pub fingerprints: Vec<Fingerprint>,
}

/// Execute `pve validate`.
pub fn run_validate(args: &ValidateArgs, state: &Path) -> Result<u8> {
    let data = hex::decode(&args.data).context("--data is not valid hex")?;
    let blob = store::update(state, |engine| engine.validate(args.proof, args.sender, &data))?;

    println!("OK: proof {} accepted ({} sub-output(s))", args.proof, blob.len());
    for fp in blob.fingerprints() {
        println!("  {fp}");
    }
    Ok(0)
}

/// Execute `pve validate-by-hash`. Prints `true` or `false`.
pub fn run_validate_by_hash(args: &ValidateByHashArgs, state: &Path) -> Result<u8> {
    let engine = store::load(state)?;
    let validated = engine.validate_by_hash(args.proof, args.fingerprint, args.sender)?;
    println!("{validated}");
    Ok(0)
}

/// Execute `pve clear`.
pub fn run_clear(args: &ClearArgs, state: &Path) -> Result<u8> {
    store::update(state, |engine| {
        engine.clear(args.proof, &args.fingerprints, args.caller)
    })?;
    println!(
        "OK: cleared {} fact(s) under {}",
        args.fingerprints.len(),
        args.proof
    );
    Ok(0)
}
