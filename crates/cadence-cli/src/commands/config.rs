//! Config command - print or create a loop config

use anyhow::{Context, Result};
use cadence_core::LoopConfig;
use std::fs;
use std::path::Path;

pub fn run(path: Option<&str>, init: bool) -> Result<()> {
    if init {
        let path = path.context("--init needs a PATH to write")?;
        if Path::new(path).exists() {
            anyhow::bail!("File '{}' already exists", path);
        }
        fs::write(path, LoopConfig::default().to_toml_string()?)?;
        println!("Wrote default config to {}", path);
        return Ok(());
    }

    let config = match path {
        Some(path) => {
            LoopConfig::load(path).with_context(|| format!("Failed to load config '{}'", path))?
        }
        None => LoopConfig::default(),
    };

    print!("{}", config.to_toml_string()?);
    Ok(())
}
