use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$GASTOS_HOME`, or `~/.gastos`.
pub fn gastos_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("GASTOS_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".gastos"))
}

pub fn ensure_gastos_home() -> Result<PathBuf> {
    let dir = gastos_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
