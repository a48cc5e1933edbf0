//! Configuration file
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 3000, "cors_origins": [] },
//!   "store":  { "data_dir": "data", "file_name": "products.json",
//!               "seed_path": "seed/products.json", "id_policy": "monotonic" }
//! }
//! ```
//!
//! Every field is optional. A missing file means all defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::args::ConfigArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CliError::config_error(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Load the file named by `args` and apply its overrides
    pub fn from_args(args: &ConfigArgs) -> CliResult<Self> {
        let mut config = Self::load(&args.config)?;
        if let Some(data_dir) = &args.data_dir {
            config.store.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}
