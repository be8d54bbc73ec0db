//! # binpack Configuration Module
//!
//! Persistent packing parameters stored as a TOML file, so a link driver can
//! keep its chunk size and destination tag next to the firmware it ships.
//!
//! ```toml
//! chunk_size = 512
//! destination_address = 2
//! output_dir = "out/packets"
//! ```
//!
//! Missing fields fall back to their defaults.
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DESTINATION, MAX_CHUNK_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackConfig {
    pub chunk_size: u32,
    pub destination_address: u8,
    pub output_dir: Option<PathBuf>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            chunk_size: MAX_CHUNK_SIZE,
            destination_address: DEFAULT_DESTINATION,
            output_dir: None,
        }
    }
}

impl PackConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PackConfig> {
        read_toml_file(path.as_ref())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_toml_file(path.as_ref(), self)
    }
}

fn write_toml_file(path: &Path, config: &PackConfig) -> Result<()> {
    let toml_string = toml::to_string(config).context("failed to serialize config to TOML")?;
    let mut file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(toml_string.as_bytes())?;
    Ok(())
}

fn read_toml_file(path: &Path) -> Result<PackConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: PackConfig = toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_config_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("binpack.toml");

        let config = PackConfig {
            chunk_size: 256,
            destination_address: 0x42,
            output_dir: Some(dir.path().join("packets")),
        };
        config.save(&path).expect("Failed to save config");

        let loaded = PackConfig::load(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "destination_address = 7\n").unwrap();

        let loaded = PackConfig::load(&path).unwrap();
        assert_eq!(loaded.destination_address, 7);
        assert_eq!(loaded.chunk_size, MAX_CHUNK_SIZE);
        assert!(loaded.output_dir.is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "chunk_size = \"big\"\n").unwrap();

        assert!(PackConfig::load(&path).is_err());
        assert!(PackConfig::load(dir.path().join("absent.toml")).is_err());
    }
}
