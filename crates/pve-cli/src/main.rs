//! # pve CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pve_cli::admin::{
    run_increment_epoch, run_invalidate, run_set_params, run_set_validator,
    run_transfer_ownership, CallerArgs, InvalidateArgs, SetParamsArgs, SetValidatorArgs,
    TransferOwnershipArgs,
};
use pve_cli::genesis::{run_init, InitArgs};
use pve_cli::inspect::{run_events, run_params, run_status, EventsArgs};
use pve_cli::proof::{
    run_clear, run_validate, run_validate_by_hash, ClearArgs, ValidateArgs, ValidateByHashArgs,
};
use pve_cli::DEFAULT_STATE_FILE;

/// Proof validation engine CLI.
///
/// Administers validator bindings, dispatches proofs to validators and
/// queries the validated-proof ledger, persisting engine state in a JSON
/// snapshot between invocations.
#[derive(Parser, Debug)]
#[command(name = "pve", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the engine state file.
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create genesis state from a configuration file.
    Init(InitArgs),

    /// Bind a validator to a proof identifier (owner only).
    SetValidator(SetValidatorArgs),

    /// Revoke a validator binding (owner only).
    Invalidate(InvalidateArgs),

    /// Advance the latest epoch by one (owner only).
    IncrementEpoch(CallerArgs),

    /// Replace the common reference parameters (owner only).
    SetParams(SetParamsArgs),

    /// Hand the owner credential to another identity (owner only).
    TransferOwnership(TransferOwnershipArgs),

    /// Print the common reference parameters.
    Params,

    /// Submit proof data to the bound validator.
    Validate(ValidateArgs),

    /// Ask whether a sub-output fingerprint was validated for a sender.
    ValidateByHash(ValidateByHashArgs),

    /// Clear previously validated facts.
    Clear(ClearArgs),

    /// Summarize engine state.
    Status,

    /// Print the event journal.
    Events(EventsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(state = %cli.state.display(), "pve CLI starting");

    let state = cli.state.as_path();
    let result = match &cli.command {
        Commands::Init(args) => run_init(args, state),
        Commands::SetValidator(args) => run_set_validator(args, state),
        Commands::Invalidate(args) => run_invalidate(args, state),
        Commands::IncrementEpoch(args) => run_increment_epoch(args, state),
        Commands::SetParams(args) => run_set_params(args, state),
        Commands::TransferOwnership(args) => run_transfer_ownership(args, state),
        Commands::Params => run_params(state),
        Commands::Validate(args) => run_validate(args, state),
        Commands::ValidateByHash(args) => run_validate_by_hash(args, state),
        Commands::Clear(args) => run_clear(args, state),
        Commands::Status => run_status(state),
        Commands::Events(args) => run_events(args, state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
