// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use path_clean::clean;
use serde::{Deserialize, Serialize};
use umbra_types::{PollPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_STATUS_QUERY_RETRIES};

/// Gas units budgeted for a task when the caller does not override it.
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;

/// Smallest on-ledger fee denomination per whole token.
const GRAINS_PER_TOKEN: u64 = 100_000_000;

/// Config file searched for in the working directory and its parents.
pub const CONFIG_FILENAME: &str = "umbra.config.yaml";

/// Converts whole tokens to grains, the denomination gas prices are quoted
/// in. Saturates rather than wrapping on absurd inputs.
pub fn to_grains(tokens: u64) -> u64 {
    tokens.saturating_mul(GRAINS_PER_TOKEN)
}

/// Client-side knobs for task submission and polling.
///
/// Every field has a default, so an empty file and no file at all are both
/// valid configurations. Values merge in order: defaults, then the YAML
/// file, then `UMBRA_`-prefixed environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_gas_price")]
    pub gas_price: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub poll_timeout_ms: Option<u64>,
    #[serde(default = "default_max_query_retries")]
    pub max_query_retries: u32,
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_gas_price() -> u64 {
    to_grains(1)
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_max_query_retries() -> u32 {
    DEFAULT_STATUS_QUERY_RETRIES
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gas_limit: default_gas_limit(),
            gas_price: default_gas_price(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_timeout_ms: None,
            max_query_retries: default_max_query_retries(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration, resolving the file the same way regardless of
    /// where the process was launched from: an explicit path wins, otherwise
    /// the filename is searched for from the working directory upward.
    pub fn load(cli_file: Option<PathBuf>) -> Result<Self> {
        let cwd = env::current_dir()?;
        let path = match cli_file {
            Some(file) if file.is_absolute() => file,
            Some(file) => clean(cwd.join(file)),
            None => find_in_parent(&cwd, CONFIG_FILENAME)
                .unwrap_or_else(|| cwd.join(CONFIG_FILENAME)),
        };

        let config = Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("UMBRA_"))
            .extract()?;

        Ok(config)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: self.poll_timeout_ms.map(Duration::from_millis),
            max_query_retries: self.max_query_retries,
        }
    }
}

/// Walks up from `path` looking for `filename`.
pub fn find_in_parent(path: &PathBuf, filename: &str) -> Option<PathBuf> {
    let mut current = PathBuf::from(path);

    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}
