//! # Inspection Subcommands
//!
//! Views of the state file. Only `pve events --drain` writes.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::store;

/// Arguments for `pve events`.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Show only the most recent N events.
    #[arg(long)]
    pub tail: Option<usize>,

    /// Remove the printed journal from the state file.
    #[arg(long)]
    pub drain: bool,
}

/// Execute `pve params`: one hex value per line, slot order.
pub fn run_params(state: &Path) -> Result<u8> {
    let engine = store::load(state)?;
    for value in engine.reference_parameters().to_hex_slots() {
        println!("{value}");
    }
    Ok(0)
}

/// Execute `pve status`.
pub fn run_status(state: &Path) -> Result<u8> {
    let engine = store::load(state)?;
    let mut bindings: Vec<_> = engine.registry().iter().collect();
    bindings.sort_by_key(|(proof, _)| *proof);

    println!("Owner:        {}", engine.owner());
    println!("Latest epoch: {}", engine.latest_epoch());
    println!("Ledger facts: {}", engine.ledger_len());
    println!("Events:       {}", engine.events().len());
    println!("Validators ({}):", bindings.len());
    for (proof, binding) in bindings {
        let revoked = if binding.is_revoked() { " [revoked]" } else { "" };
        println!(
            "  {proof} ({}): {}{revoked}",
            proof.category(),
            binding.handle().name()
        );
    }
    Ok(0)
}

/// Execute `pve events`: one JSON record per line, oldest first.
///
/// With `--drain` the whole journal is removed from the state file after
/// printing, even if `--tail` limits what is shown.
pub fn run_events(args: &EventsArgs, state: &Path) -> Result<u8> {
    let events = if args.drain {
        store::update(state, |engine| Ok(engine.drain_events()))?
    } else {
        store::load(state)?.drain_events()
    };
    let skip = args
        .tail
        .map_or(0, |tail| events.len().saturating_sub(tail));
    for record in &events[skip..] {
        println!("{}", serde_json::to_string(record)?);
    }
    if args.drain {
        tracing::info!(drained = events.len(), "event journal drained");
    }
    Ok(0)
}
