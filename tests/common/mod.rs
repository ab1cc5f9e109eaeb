#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;
use mcp_pantry::engine::{RawInventory, Recipe};
use mcp_pantry::{PantryConfig, PantryStore};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A store rooted in its own temporary directory.
pub struct TestEnvironment {
    pub dir: TempDir,
    pub config: PantryConfig,
    pub store: PantryStore,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = PantryConfig::in_dir(dir.path());
        let store = PantryStore::new(config.clone());
        Ok(Self { dir, config, store })
    }

    /// Environment whose recipe catalog is [`sample_catalog_json`].
    pub fn with_catalog() -> Result<Self> {
        let env = Self::new()?;
        env.write_recipes(&sample_catalog_json())?;
        Ok(env)
    }

    pub fn write_inventory(&self, inventory: &Value) -> Result<()> {
        write_json(&self.config.inventory_path, inventory)
    }

    pub fn write_recipes(&self, recipes: &Value) -> Result<()> {
        write_json(&self.config.recipes_path, recipes)
    }

    pub fn read_inventory_file(&self) -> Result<Value> {
        let text = std::fs::read_to_string(&self.config.inventory_path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn read_favorites_file(&self) -> Result<Value> {
        let text = std::fs::read_to_string(&self.config.favorites_path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn raw(value: Value) -> RawInventory {
    serde_json::from_value(value).expect("inventory fixture should be a JSON object")
}

pub fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|recipe| recipe.title.as_str()).collect()
}

pub fn sample_catalog_json() -> Value {
    json!([
        {
            "title": "Omelette",
            "ingredients": [{"name": "egg"}],
            "time": "10 min"
        },
        {
            "title": "Bread",
            "ingredients": [{"name": "flour"}, {"name": "egg"}, {"name": "yeast"}]
        },
        {
            "title": "Chicken Soup",
            "ingredients": [{"name": "Chicken"}, {"name": "onion"}, {"name": "celery"}, {"name": "carrot"}]
        },
        {
            "title": "Beef Wellington",
            "ingredients": [
                {"name": "beef"}, {"name": "puff pastry"}, {"name": "mushroom"},
                {"name": "prosciutto"}, {"name": "mustard"}
            ]
        },
        {
            "title": "Fried Onions",
            "ingredients": [{"name": "Onion"}, {"name": "oil"}]
        }
    ])
}

pub fn sample_catalog() -> Vec<Recipe> {
    serde_json::from_value(sample_catalog_json()).expect("catalog fixture should deserialize")
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
