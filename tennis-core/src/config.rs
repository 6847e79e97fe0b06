use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::filter::Constraints;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [constraints]
    /// minTemperature = 4.0
    /// maxWindSpeed = 20.0
    #[serde(default)]
    pub constraints: Constraints,
}

impl Config {
    /// Stored constraints, checked for usability.
    pub fn constraints(&self) -> Result<Constraints> {
        let hint = "Configured constraints are invalid.\nHint: run `tennis configure` to fix them.";
        self.constraints.validate().context(hint)?;
        Ok(self.constraints)
    }

    /// Replace the stored constraints if they are valid.
    pub fn set_constraints(&mut self, constraints: Constraints) -> Result<()> {
        constraints.validate()?;
        self.constraints = constraints;
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml_string()?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .context("Invalid configuration TOML")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tennis-time", "tennis-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_default_constraints() {
        let cfg = Config::from_toml_str("").expect("empty config is valid");
        assert_eq!(cfg.constraints, Constraints::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [constraints]
            maxWindSpeed = 30.0
            "#,
        )
        .expect("config parses");

        let c = cfg.constraints().expect("constraints are valid");
        assert_eq!(c.max_wind_speed_kph, 30.0);
        assert_eq!(c.min_temperature_c, 4.0);
        assert_eq!(c.max_humidity_pct, 95.0);
    }

    #[test]
    fn snake_case_keys_are_accepted() {
        let cfg = Config::from_toml_str(
            r#"
            [constraints]
            min_temperature_c = 10.0
            "#,
        )
        .expect("config parses");
        assert_eq!(cfg.constraints.min_temperature_c, 10.0);
    }

    #[test]
    fn non_finite_constraint_is_reported() {
        let cfg = Config::from_toml_str(
            r#"
            [constraints]
            maxHumidity = nan
            "#,
        )
        .expect("TOML allows nan");

        let err = cfg.constraints().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Configured constraints are invalid"));
    }

    #[test]
    fn set_constraints_rejects_invalid_values() {
        let mut cfg = Config::default();
        let bad = Constraints {
            max_precipitation_probability_pct: f64::INFINITY,
            ..Constraints::default()
        };
        assert!(cfg.set_constraints(bad).is_err());
        assert_eq!(cfg.constraints, Constraints::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let name = format!("tennis-core-config-{}", std::process::id());
        let dir = std::env::temp_dir().join(name);
        let path = dir.join("config.toml");

        let mut cfg = Config::default();
        cfg.set_constraints(Constraints {
            min_temperature_c: 12.0,
            ..Constraints::default()
        })
        .expect("valid constraints");

        cfg.save_to(&path).expect("save works");
        let loaded = Config::load_from(&path).expect("load works");
        assert_eq!(loaded, cfg);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir()
            .join("tennis-core-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).expect("missing file is fine");
        assert_eq!(cfg, Config::default());
    }
}
