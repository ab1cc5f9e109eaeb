//! File locations for the pantry store.

use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";
pub const DEFAULT_RECIPES_FILE: &str = "recipes.json";
pub const DEFAULT_FAVORITES_FILE: &str = "favorites.json";

/// Where the store reads and writes its JSON files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryConfig {
    pub inventory_path: PathBuf,
    pub recipes_path: PathBuf,
    pub favorites_path: PathBuf,
}

impl PantryConfig {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            inventory_path: dir.join(DEFAULT_INVENTORY_FILE),
            recipes_path: dir.join(DEFAULT_RECIPES_FILE),
            favorites_path: dir.join(DEFAULT_FAVORITES_FILE),
        }
    }

    /// Reads `PANTRY_DATA_DIR` (default: current directory) and the optional
    /// per-file overrides `PANTRY_INVENTORY_FILE`, `PANTRY_RECIPES_FILE` and
    /// `PANTRY_FAVORITES_FILE`, resolved relative to the data directory.
    pub fn from_env() -> Self {
        let dir = PathBuf::from(env::var("PANTRY_DATA_DIR").unwrap_or_else(|_| ".".to_string()));
        let file = |var: &str, default: &str| {
            dir.join(env::var(var).unwrap_or_else(|_| default.to_string()))
        };

        Self {
            inventory_path: file("PANTRY_INVENTORY_FILE", DEFAULT_INVENTORY_FILE),
            recipes_path: file("PANTRY_RECIPES_FILE", DEFAULT_RECIPES_FILE),
            favorites_path: file("PANTRY_FAVORITES_FILE", DEFAULT_FAVORITES_FILE),
        }
    }
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
