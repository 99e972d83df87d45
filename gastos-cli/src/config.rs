use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_gastos_home, gastos_home};

/// Overrides `gateway.base_url`
pub const GATEWAY_URL_ENV: &str = "GASTOS_GATEWAY_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewaySection,
    #[serde(default)]
    pub import: ImportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    pub base_url: String,
    /// Name of the environment variable holding the bearer token
    pub token_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    pub header_rows: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token_env: "GASTOS_TOKEN".to_string(),
        }
    }
}

impl Default for ImportSection {
    fn default() -> Self {
        Self { header_rows: 1 }
    }
}

impl Config {
    /// Gateway URL after the environment override.
    pub fn gateway_url(&self) -> String {
        match std::env::var(GATEWAY_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.gateway.base_url.clone(),
        }
    }

    /// Bearer token from the configured environment variable, if set.
    pub fn gateway_token(&self) -> Option<String> {
        std::env::var(&self.gateway.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(gastos_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    if cfg.gateway.base_url.trim().is_empty() {
        bail!("gateway.base_url is empty in {}", p.display());
    }
    Ok(cfg)
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_gastos_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.import.header_rows, 1);
    }

    #[test]
    fn test_round_trip_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.gateway.base_url = "https://gw.example.test/prod".to_string();
        cfg.import.header_rows = 2;
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);

        fs::write(&p, "[import]\nheader_rows = 3\n").unwrap();
        let partial = load_config_from(&p).unwrap();
        assert_eq!(partial.import.header_rows, 3);
        assert_eq!(partial.gateway, GatewaySection::default());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[gateway]\nbase_url = \"\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
