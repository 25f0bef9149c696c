//! # State File
//!
//! Loading and saving the engine snapshot that backs every subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use pve_core::EngineError;
use pve_engine::{EngineSnapshot, ProofEngine};
use pve_validator::ValidatorCatalog;

/// Catalog used to rebind validators named in the state file.
pub fn catalog() -> ValidatorCatalog {
    ValidatorCatalog::builtin()
}

/// Load and restore the engine stored at `path`.
pub fn load(path: &Path) -> Result<ProofEngine> {
    let snapshot = EngineSnapshot::load(path)
        .with_context(|| format!("failed to read engine state {}", path.display()))?;
    ProofEngine::restore(snapshot, &catalog())
        .with_context(|| format!("failed to restore engine state {}", path.display()))
}

/// Persist `engine` to `path`, including any undrained events.
pub fn save(engine: &ProofEngine, path: &Path) -> Result<()> {
    engine
        .snapshot_with_journal()
        .save(path)
        .with_context(|| format!("failed to write engine state {}", path.display()))
}

/// Load the engine, apply `operation`, and save only if it succeeded.
pub fn update<T>(
    path: &Path,
    operation: impl FnOnce(&mut ProofEngine) -> Result<T, EngineError>,
) -> Result<T> {
    let mut engine = load(path)?;
    let value = operation(&mut engine)?;
    save(&engine, path)?;
    Ok(value)
}
