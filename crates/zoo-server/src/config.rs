//! Service configuration.
//!
//! Mirrors the structure of `zoo-config.yaml`. Every field has a default,
//! so a missing file or a partial file both work. After parsing, the
//! environment overrides a few deployment settings:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DRAGONFLY_URL` | `infrastructure.dragonfly_url` |
//! | `NATS_URL` | `infrastructure.nats_url` |
//! | `ZOO_SPECIES` | `pet.species` |
//! | `ZOO_PORT` | `server.port` |

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use zoo_engine::FollowUpDelays;
use zoo_types::{PetId, Species};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {variable}: {value}")]
    InvalidOverride {
        /// The environment variable.
        variable: &'static str,
        /// What it contained.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ZooConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerSection,
    /// Which pet this service hosts.
    #[serde(default)]
    pub pet: PetSection,
    /// External services.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,
    /// Follow-up timings.
    #[serde(default)]
    pub follow_ups: FollowUpConfig,
}

impl ZooConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for a bad environment value.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `ZOO_SPECIES` or
    /// `ZOO_PORT` cannot be parsed.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `ZOO_SPECIES` or
    /// `ZOO_PORT` cannot be parsed.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("DRAGONFLY_URL") {
            self.infrastructure.dragonfly_url = val;
        }
        if let Some(val) = lookup("NATS_URL") {
            self.infrastructure.nats_url = val;
        }
        if let Some(val) = lookup("ZOO_SPECIES") {
            self.pet.species = Species::from_name(&val).ok_or(ConfigError::InvalidOverride {
                variable: "ZOO_SPECIES",
                value: val,
            })?;
        }
        if let Some(val) = lookup("ZOO_PORT") {
            self.server.port = val.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidOverride {
                    variable: "ZOO_PORT",
                    value: format!("{val} ({e})"),
                }
            })?;
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The hosted pet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PetSection {
    /// Species of the hosted pet.
    #[serde(default = "default_species")]
    pub species: Species,
    /// State-store key. Defaults to the species' usual key (`babydino`, ...).
    #[serde(default)]
    pub pet_id: Option<String>,
}

impl PetSection {
    /// The pet key to serve.
    pub fn pet_id(&self) -> PetId {
        self.pet_id.as_deref().map_or_else(
            || PetId::from(zoo_engine::profile(self.species).pet_id),
            PetId::from,
        )
    }
}

impl Default for PetSection {
    fn default() -> Self {
        Self {
            species: default_species(),
            pet_id: None,
        }
    }
}

/// External service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// `Dragonfly` URL. Empty means keep state in memory.
    #[serde(default = "default_dragonfly_url")]
    pub dragonfly_url: String,
    /// NATS URL. Empty means events are not published.
    #[serde(default = "default_nats_url")]
    pub nats_url: String,
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            dragonfly_url: default_dragonfly_url(),
            nats_url: default_nats_url(),
        }
    }
}

/// Follow-up timings in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FollowUpConfig {
    /// Shortest dino nap.
    #[serde(default = "default_nap_min_secs")]
    pub nap_min_secs: u64,
    /// Longest dino nap.
    #[serde(default = "default_nap_max_secs")]
    pub nap_max_secs: u64,
    /// Time the turtle stays in its shell.
    #[serde(default = "default_shell_secs")]
    pub shell_secs: u64,
    /// Time for dragon rage to cool.
    #[serde(default = "default_rage_cooldown_secs")]
    pub rage_cooldown_secs: u64,
    /// Time for octopus ink to settle.
    #[serde(default = "default_ink_secs")]
    pub ink_secs: u64,
}

impl FollowUpConfig {
    /// Convert to engine delays. A `nap_max_secs` below `nap_min_secs` is
    /// raised to it.
    pub const fn delays(&self) -> FollowUpDelays {
        let nap_max = if self.nap_max_secs < self.nap_min_secs {
            self.nap_min_secs
        } else {
            self.nap_max_secs
        };
        FollowUpDelays {
            nap_min: Duration::from_secs(self.nap_min_secs),
            nap_max: Duration::from_secs(nap_max),
            shell: Duration::from_secs(self.shell_secs),
            rage_cooldown: Duration::from_secs(self.rage_cooldown_secs),
            ink: Duration::from_secs(self.ink_secs),
        }
    }
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            nap_min_secs: default_nap_min_secs(),
            nap_max_secs: default_nap_max_secs(),
            shell_secs: default_shell_secs(),
            rage_cooldown_secs: default_rage_cooldown_secs(),
            ink_secs: default_ink_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_species() -> Species {
    Species::Bunny
}

fn default_dragonfly_url() -> String {
    "redis://localhost:6379".to_owned()
}

fn default_nats_url() -> String {
    "nats://localhost:4222".to_owned()
}

const fn default_nap_min_secs() -> u64 {
    20
}

const fn default_nap_max_secs() -> u64 {
    60
}

const fn default_shell_secs() -> u64 {
    30
}

const fn default_rage_cooldown_secs() -> u64 {
    45
}

const fn default_ink_secs() -> u64 {
    15
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ZooConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pet.species, Species::Bunny);
        assert_eq!(config.pet.pet_id(), PetId::from("bouncybun"));
        assert_eq!(config.follow_ups.delays(), FollowUpDelays::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9001

pet:
  species: dragon
  pet_id: "sparky"

infrastructure:
  dragonfly_url: "redis://dragonfly:6379"
  nats_url: "nats://nats:4222"

follow_ups:
  nap_min_secs: 5
  nap_max_secs: 10
  shell_secs: 3
  rage_cooldown_secs: 4
  ink_secs: 2
"#;
        let config = ZooConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.pet.species, Species::Dragon);
        assert_eq!(config.pet.pet_id(), PetId::from("sparky"));
        assert_eq!(config.infrastructure.nats_url, "nats://nats:4222");
        assert_eq!(config.follow_ups.delays().shell, Duration::from_secs(3));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = ZooConfig::parse("pet:\n  species: dino\n").unwrap();
        assert_eq!(config.pet.pet_id(), PetId::from("babydino"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.infrastructure, InfrastructureConfig::default());
    }

    #[test]
    fn env_overrides_win() {
        let mut config = ZooConfig::default();
        config
            .apply_overrides(env(&[
                ("ZOO_SPECIES", "Octopus"),
                ("ZOO_PORT", "3004"),
                ("DRAGONFLY_URL", "redis://elsewhere:6379"),
            ]))
            .unwrap();
        assert_eq!(config.pet.species, Species::Octopus);
        assert_eq!(config.pet.pet_id(), PetId::from("emoocto"));
        assert_eq!(config.server.port, 3004);
        assert_eq!(config.infrastructure.dragonfly_url, "redis://elsewhere:6379");
        assert_eq!(config.infrastructure.nats_url, default_nats_url());
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let mut config = ZooConfig::default();
        let species = config.apply_overrides(env(&[("ZOO_SPECIES", "unicorn")]));
        assert!(matches!(
            species,
            Err(ConfigError::InvalidOverride { variable: "ZOO_SPECIES", .. })
        ));
        let port = config.apply_overrides(env(&[("ZOO_PORT", "eighty")]));
        assert!(matches!(
            port,
            Err(ConfigError::InvalidOverride { variable: "ZOO_PORT", .. })
        ));
    }

    #[test]
    fn inverted_nap_range_is_repaired() {
        let config = FollowUpConfig {
            nap_min_secs: 30,
            nap_max_secs: 10,
            ..FollowUpConfig::default()
        };
        let delays = config.delays();
        assert_eq!(delays.nap_min, delays.nap_max);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            ZooConfig::parse("server: [not, a, map"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
