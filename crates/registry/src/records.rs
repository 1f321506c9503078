// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Address;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no deployment record for contract `{0}`")]
    Missing(String),

    #[error("deployment record for `{name}` does not contain a valid address: {detail}")]
    Malformed { name: String, detail: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Flat-file registry mapping a logical contract name to its deployed
/// address. One `<name>.txt` per contract, containing the literal address
/// string; written once at deploy time, read at run and test time.
#[derive(Debug, Clone)]
pub struct DeploymentRecords {
    dir: PathBuf,
}

impl DeploymentRecords {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }

    /// Persists a freshly deployed contract's address.
    pub fn record(&self, name: &str, address: Address) -> Result<(), RegistryError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        fs::write(&path, address.to_string())?;
        info!(contract = name, %address, path = %path.display(), "recorded deployment address");
        Ok(())
    }

    /// Resolves a previously recorded deployment address.
    pub fn address_of(&self, name: &str) -> Result<Address, RegistryError> {
        let path = self.path_for(name);
        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RegistryError::Missing(name.to_string())
            } else {
                RegistryError::Io(e)
            }
        })?;
        contents
            .trim()
            .parse::<Address>()
            .map_err(|e| RegistryError::Malformed {
                name: name.to_string(),
                detail: e.to_string(),
            })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }
}
