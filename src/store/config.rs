//! Store Configuration
//!
//! Where the backing file lives, how it is seeded, and how ids are assigned.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the store picks the id of a new record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Never reuse an id, even after the highest record is deleted.
    /// The high-water mark is kept in a sidecar file next to the data.
    #[default]
    Monotonic,
    /// `max(existing ids) + 1`, or 1 for an empty store.
    /// Reuses the top id after it is deleted.
    MaxPlusOne,
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the data file (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Data file name inside `data_dir` (default: "products.json")
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Sample dataset copied in when the data file does not exist yet.
    /// Missing seed file means the store starts empty.
    #[serde(default = "default_seed_path")]
    pub seed_path: Option<PathBuf>,

    #[serde(default)]
    pub id_policy: IdPolicy,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_name() -> String {
    "products.json".to_string()
}

fn default_seed_path() -> Option<PathBuf> {
    Some(PathBuf::from("seed/products.json"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
            seed_path: default_seed_path(),
            id_policy: IdPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Config rooted at `data_dir` with no seed dataset
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed_path: None,
            ..Default::default()
        }
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }

    pub fn with_seed(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(seed_path.into());
        self
    }

    /// Full path of the data file
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Sidecar holding the id high-water mark
    pub fn meta_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.meta.json", self.file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.data_path(), PathBuf::from("data/products.json"));
        assert_eq!(config.meta_path(), PathBuf::from("data/products.json.meta.json"));
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert!(config.seed_path.is_some());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"data_dir": "/srv/catalog", "id_policy": "max_plus_one"}"#)
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(config.file_name, "products.json");
        assert_eq!(config.id_policy, IdPolicy::MaxPlusOne);
    }

    #[test]
    fn test_null_seed_disables_seeding() {
        let config: StoreConfig = serde_json::from_str(r#"{"seed_path": null}"#).unwrap();
        assert_eq!(config.seed_path, None);
    }
}
