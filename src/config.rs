use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_VERSION: u64 = 1;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("quill")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct QuillConfig {
    pub data_directory: PathBuf,
    pub api_base_url: String,
    pub debug_logging: bool,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debug_logging: false,
        }
    }
}

impl QuillConfig {
    /// The full note collection, one JSON array.
    pub fn notes_path(&self) -> PathBuf {
        self.data_directory.join("notes.json")
    }

    /// The persisted bearer token.
    pub fn token_path(&self) -> PathBuf {
        self.data_directory.join("session.token")
    }

    /// Ensure the data directory exists.
    pub fn ensure_files(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}
