//! # Init Subcommand
//!
//! Builds genesis engine state from a configuration file, overlaid with
//! `PVE_OWNER` and `PVE_INITIAL_EPOCH`, and writes the first snapshot.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use pve_engine::EngineConfig;

use crate::store;

/// Arguments for `pve init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Engine configuration (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub config: PathBuf,

    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

/// Execute `pve init`.
pub fn run_init(args: &InitArgs, state: &Path) -> Result<u8> {
    let config = EngineConfig::from_path(&args.config)?.with_environment()?;
    init_from(&config, state, args.force)
}

fn init_from(config: &EngineConfig, state: &Path, force: bool) -> Result<u8> {
    if state.exists() && !force {
        bail!("state file already exists: {} (use --force)", state.display());
    }
    let engine = config
        .build(&store::catalog())
        .context("failed to build genesis engine")?;
    store::save(&engine, state)?;

    println!(
        "OK: initialized {} at epoch {} with {} validator(s)",
        state.display(),
        engine.latest_epoch(),
        engine.registry().len()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::from_yaml_str(&format!(
            "owner: \"{}\"\nvalidators:\n  - proof: \"1.1.1\"\n    validator: echo\n",
            "0e".repeat(32)
        ))
        .unwrap()
    }

    #[test]
    fn test_init_writes_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        assert_eq!(init_from(&config(), &state, false).unwrap(), 0);
        let engine = store::load(&state).unwrap();
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        init_from(&config(), &state, false).unwrap();
        let err = init_from(&config(), &state, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(init_from(&config(), &state, true).is_ok());
    }

    #[test]
    fn test_init_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("engine.json");
        std::fs::write(
            &config_path,
            format!("{{\"owner\":\"{}\",\"initial_epoch\":3}}", "0e".repeat(32)),
        )
        .unwrap();
        let parsed = EngineConfig::from_path(&config_path).unwrap();
        let state = dir.path().join("state.json");
        init_from(&parsed, &state, false).unwrap();
        assert_eq!(store::load(&state).unwrap().latest_epoch(), 3);
    }
}
