//! # Engine Configuration
//!
//! Genesis configuration for a [`ProofEngine`], read from YAML or JSON and
//! optionally overlaid from the environment:
//!
//! ```yaml
//! owner: "0e0e...0e"            # required, 32-byte hex identity
//! initial_epoch: 1              # default 1
//! reference_parameters: [...]   # six 32-byte hex values, default all zero
//! validators:
//!   - proof: "1.1.1"
//!     validator: mock
//! ```
//!
//! Genesis bindings go through the ordinary owner-gated admin path, so the
//! epoch rule and write-once rule apply to them as to any later binding.
//!
//! | Variable | Overrides |
//! |---|---|
//! | `PVE_OWNER` | `owner` |
//! | `PVE_INITIAL_EPOCH` | `initial_epoch` |

use std::path::{Path, PathBuf};

use pve_core::{EngineError, HexError, Identity, IdentifierError, ProofIdentifier, ReferenceParameters};
use pve_validator::ValidatorCatalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{ProofEngine, DEFAULT_INITIAL_EPOCH};

/// Environment variable overriding the owner identity.
pub const ENV_OWNER: &str = "PVE_OWNER";
/// Environment variable overriding the initial epoch.
pub const ENV_INITIAL_EPOCH: &str = "PVE_INITIAL_EPOCH";

/// Error loading a configuration or building an engine from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No owner in the file or the environment.
    #[error("engine configuration has no owner (set `owner` or PVE_OWNER)")]
    MissingOwner,

    /// Reading the config file failed.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// The config path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// YAML parse failure.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse failure.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// `PVE_OWNER` is not a 32-byte hex identity.
    #[error("invalid PVE_OWNER: {0}")]
    Owner(HexError),

    /// `PVE_INITIAL_EPOCH` is not a u32.
    #[error("invalid PVE_INITIAL_EPOCH: {0:?}")]
    InitialEpoch(String),

    /// A genesis binding has a malformed proof identifier.
    #[error("invalid genesis proof identifier: {0}")]
    Identifier(#[from] IdentifierError),

    /// A genesis binding names a validator the catalog does not know.
    #[error("genesis binding for {proof} names unknown validator {name:?}")]
    UnknownValidatorName {
        /// The identifier being bound.
        proof: ProofIdentifier,
        /// The unresolved validator name.
        name: String,
    },

    /// A genesis binding was refused by the engine.
    #[error("genesis binding refused: {0}")]
    Engine(#[from] EngineError),
}

/// One validator binding installed at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBinding {
    /// Proof identifier in any accepted text form, e.g. `"1.1.1"`.
    pub proof: String,
    /// Catalog name of the validator.
    pub validator: String,
}

/// Genesis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Holder of the owner credential.
    #[serde(default)]
    pub owner: Option<Identity>,
    /// Starting LatestEpoch.
    #[serde(default = "default_initial_epoch")]
    pub initial_epoch: u32,
    /// Starting reference parameters.
    #[serde(default)]
    pub reference_parameters: ReferenceParameters,
    /// Bindings installed at genesis, in order.
    #[serde(default)]
    pub validators: Vec<GenesisBinding>,
}

fn default_initial_epoch() -> u32 {
    DEFAULT_INITIAL_EPOCH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            owner: None,
            initial_epoch: DEFAULT_INITIAL_EPOCH,
            reference_parameters: ReferenceParameters::default(),
            validators: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// Overlay `PVE_OWNER` and `PVE_INITIAL_EPOCH` from the process
    /// environment.
    pub fn with_environment(self) -> Result<Self, ConfigError> {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, keyed by environment variable name.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(owner) = lookup(ENV_OWNER) {
            self.owner = Some(owner.trim().parse().map_err(ConfigError::Owner)?);
        }
        if let Some(epoch) = lookup(ENV_INITIAL_EPOCH) {
            self.initial_epoch = epoch
                .trim()
                .parse()
                .map_err(|_| ConfigError::InitialEpoch(epoch.clone()))?;
        }
        Ok(self)
    }

    /// Build the genesis engine, resolving validator names in `catalog`.
    pub fn build(&self, catalog: &ValidatorCatalog) -> Result<ProofEngine, ConfigError> {
        let owner = self.owner.ok_or(ConfigError::MissingOwner)?;
        let mut engine = ProofEngine::with_initial_epoch(owner, self.initial_epoch);

        if self.reference_parameters != ReferenceParameters::default() {
            engine.set_reference_parameters(owner, self.reference_parameters)?;
        }

        for binding in &self.validators {
            let proof: ProofIdentifier = binding.proof.parse()?;
            let handle = catalog
                .get(&binding.validator)
                .ok_or_else(|| ConfigError::UnknownValidatorName {
                    proof,
                    name: binding.validator.clone(),
                })?;
            engine.set_validator(owner, proof, handle)?;
        }

        tracing::info!(
            owner = %owner,
            initial_epoch = self.initial_epoch,
            validators = self.validators.len(),
            "engine built from configuration"
        );
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER_HEX: &str = "0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e";

    fn yaml() -> String {
        format!(
            "owner: \"{OWNER_HEX}\"\ninitial_epoch: 2\nvalidators:\n  - proof: \"1.1.1\"\n    validator: echo\n  - proof: \"2.4.1\"\n    validator: mock\n"
        )
    }

    #[test]
    fn test_yaml_config_builds_engine() {
        let config = EngineConfig::from_yaml_str(&yaml()).unwrap();
        let engine = config.build(&ValidatorCatalog::builtin()).unwrap();
        assert_eq!(engine.owner().to_hex(), OWNER_HEX);
        assert_eq!(engine.latest_epoch(), 2);
        assert_eq!(
            engine.validator(ProofIdentifier::new(1, 1, 1)).map(|h| h.name()),
            Some("echo")
        );
        assert_eq!(
            engine.validator(ProofIdentifier::new(2, 4, 1)).map(|h| h.name()),
            Some("mock")
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = EngineConfig::from_json_str(&format!("{{\"owner\":\"{OWNER_HEX}\"}}")).unwrap();
        assert_eq!(config.initial_epoch, DEFAULT_INITIAL_EPOCH);
        assert_eq!(config.reference_parameters, ReferenceParameters::default());
        assert!(config.validators.is_empty());
        let engine = config.build(&ValidatorCatalog::builtin()).unwrap();
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_missing_owner_rejected() {
        assert!(matches!(
            EngineConfig::default().build(&ValidatorCatalog::builtin()),
            Err(ConfigError::MissingOwner)
        ));
    }

    #[test]
    fn test_genesis_binding_obeys_epoch_rule() {
        let config = EngineConfig::from_yaml_str(&format!(
            "owner: \"{OWNER_HEX}\"\nvalidators:\n  - proof: \"3.1.1\"\n    validator: echo\n"
        ))
        .unwrap();
        assert!(matches!(
            config.build(&ValidatorCatalog::builtin()),
            Err(ConfigError::Engine(EngineError::EpochExceeded { epoch: 3, latest: 1, .. }))
        ));
    }

    #[test]
    fn test_unknown_validator_name_rejected() {
        let config = EngineConfig::from_yaml_str(&format!(
            "owner: \"{OWNER_HEX}\"\nvalidators:\n  - proof: \"1.1.1\"\n    validator: plonk\n"
        ))
        .unwrap();
        assert!(matches!(
            config.build(&ValidatorCatalog::builtin()),
            Err(ConfigError::UnknownValidatorName { name, .. }) if name == "plonk"
        ));
    }

    #[test]
    fn test_overlay_replaces_owner_and_epoch() {
        let other = "ab".repeat(32);
        let config = EngineConfig::from_yaml_str(&yaml())
            .unwrap()
            .overlay(|key| match key {
                ENV_OWNER => Some(other.clone()),
                ENV_INITIAL_EPOCH => Some("7".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.owner.map(|o| o.to_hex()), Some(other));
        assert_eq!(config.initial_epoch, 7);
    }

    #[test]
    fn test_overlay_rejects_bad_epoch() {
        let result = EngineConfig::default().overlay(|key| {
            (key == ENV_INITIAL_EPOCH).then(|| "seven".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InitialEpoch(v)) if v == "seven"));
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("engine.yaml");
        std::fs::write(&yaml_path, yaml()).unwrap();
        let json_path = dir.path().join("engine.json");
        std::fs::write(&json_path, format!("{{\"owner\":\"{OWNER_HEX}\",\"initial_epoch\":5}}")).unwrap();

        assert_eq!(EngineConfig::from_path(&yaml_path).unwrap().initial_epoch, 2);
        assert_eq!(EngineConfig::from_path(&json_path).unwrap().initial_epoch, 5);
        assert!(matches!(
            EngineConfig::from_path(&dir.path().join("absent.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
