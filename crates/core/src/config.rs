//! Application configuration loaded from an optional TOML file and the environment.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{default_seed, Cat, Variant};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "catscroll";
/// Prefix for environment overrides, e.g. `CATSCROLL_VARIANT=simple`.
pub const ENV_PREFIX: &str = "CATSCROLL";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    /// A seed entry has an empty name.
    #[error("seed entry {index} has a blank name")]
    BlankSeedName {
        /// Zero-based position in the `seed` list.
        index: usize,
    },
    /// A seed entry lacks the colour the rich variant requires.
    #[error("seed entry {index} ({name}) needs a colour in the rich variant")]
    MissingSeedColour {
        /// Zero-based position in the `seed` list.
        index: usize,
        /// Name of the offending entry.
        name: String,
    },
}

/// One configured starting record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedCat {
    /// Display name.
    pub name: String,
    /// Colour; required by the rich variant.
    #[serde(default)]
    pub colour: Option<String>,
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Which flavour of the scroller to run.
    pub variant: Variant,
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory receiving `catscroll.log`.
    pub log_dir: PathBuf,
    /// Starting records. Empty means the built-in seed.
    pub seed: Vec<SeedCat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Cat Scroller 5000".to_string(),
            variant: Variant::default(),
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            seed: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from the default file location plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from `path` (if given and present) plus environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject seeds the store could not display sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.seed.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::BlankSeedName { index });
            }
            let has_colour = entry
                .colour
                .as_deref()
                .map(|colour| !colour.trim().is_empty())
                .unwrap_or(false);
            if self.variant.has_colour() && !has_colour {
                return Err(ConfigError::MissingSeedColour {
                    index,
                    name: entry.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Records to construct the store with.
    pub fn seed_cats(&self) -> Vec<Cat> {
        if self.seed.is_empty() {
            return default_seed(self.variant);
        }
        self.seed
            .iter()
            .map(|entry| {
                let colour = entry
                    .colour
                    .as_deref()
                    .filter(|_| self.variant.has_colour())
                    .map(str::to_string);
                Cat::new(entry.name.as_str(), colour)
            })
            .collect()
    }
}

/// `<config_dir>/catscroll/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(Some(&dir.path().join("absent.toml")))?;
        assert_eq!(config.title, "Cat Scroller 5000");
        assert_eq!(config.variant, Variant::Rich);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        let names: Vec<_> = config.seed_cats().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["Gary", "Sally", "Harry", "Tina", "Phil"]);
        Ok(())
    }

    #[test]
    fn file_overrides_variant_and_seed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
title = "Cats"
variant = "simple"

[[seed]]
name = " Tom "

[[seed]]
name = "Jerry"
colour = "Brown"
"#,
        )?;

        let config = AppConfig::load_from(Some(&path))?;
        assert_eq!(config.title, "Cats");
        assert_eq!(config.variant, Variant::Simple);

        let cats = config.seed_cats();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name(), " Tom ");
        assert_eq!(cats[1].colour(), None);
        Ok(())
    }

    #[test]
    fn rich_seed_requires_colour() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
variant = "rich"

[[seed]]
name = "Tom"
colour = "Grey"

[[seed]]
name = "Jerry"
"#,
        )?;

        let err = AppConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSeedColour { index: 1, .. }));
        Ok(())
    }

    #[test]
    fn blank_seed_name_is_rejected() {
        let config = AppConfig {
            seed: vec![SeedCat {
                name: "  ".to_string(),
                colour: Some("Black".to_string()),
            }],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BlankSeedName { index: 0 })
        ));
    }

    #[test]
    fn malformed_file_reports_load_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "variant = \"striped\"\n")?;
        let err = AppConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        Ok(())
    }
}
