use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::PantryConfig;
use crate::engine::normalize::{coerce_quantity, normalize_for_display, normalize_name};
use crate::engine::types::{DisplayMap, InventoryRecord, RawInventory, Recipe};
use crate::store::error::StoreError;

/// Flat-file storage for inventory, recipe catalog and favorites.
///
/// Nothing is cached: every call reads the file again, so edits made by
/// other tools between calls are picked up.
pub struct PantryStore {
    config: PantryConfig,
}

impl PantryStore {
    pub fn new(config: PantryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PantryConfig {
        &self.config
    }

    // Inventory operations

    /// Reads the inventory as persisted.
    ///
    /// A missing file is created empty. A file that is not a JSON object is
    /// logged and treated as an empty inventory.
    pub async fn load_inventory(&self) -> Result<RawInventory> {
        let path = &self.config.inventory_path;
        let Some(text) = read_optional(path).await? else {
            tracing::info!("No inventory at {}, creating an empty one", path.display());
            tokio::fs::write(path, "{}")
                .await
                .with_context(|| format!("Failed to create inventory file {}", path.display()))?;
            return Ok(RawInventory::new());
        };

        match serde_json::from_str::<RawInventory>(&text) {
            Ok(raw) => {
                tracing::debug!("Loaded {} inventory entries from {}", raw.len(), path.display());
                Ok(raw)
            }
            Err(e) => {
                tracing::warn!("Could not parse inventory JSON at {}: {}", path.display(), e);
                Ok(RawInventory::new())
            }
        }
    }

    pub async fn load_display_inventory(&self) -> Result<DisplayMap> {
        let raw = self.load_inventory().await?;
        Ok(normalize_for_display(&raw))
    }

    pub async fn save_inventory(&self, inventory: &DisplayMap) -> Result<()> {
        write_pretty(&self.config.inventory_path, inventory).await
    }

    /// Adds or replaces an item. Returns the trimmed name as given and the
    /// stored record.
    ///
    /// Quantities that are missing, unparsable or not positive are stored
    /// as 1.
    pub async fn upsert_item(
        &self,
        name: &str,
        quantity: Option<&Value>,
        unit: Option<&str>,
    ) -> Result<(String, InventoryRecord)> {
        let raw_name = name.trim().to_string();
        let key = normalize_name(&raw_name);
        if key.is_empty() {
            return Err(StoreError::NameRequired.into());
        }

        let record = write_record(quantity, unit);
        let mut inventory = self.load_display_inventory().await?;
        inventory.insert(key.clone(), record.clone());
        self.save_inventory(&inventory).await?;

        tracing::info!("Stored inventory item '{}': {} {}", key, record.quantity, record.unit);
        Ok((raw_name, record))
    }

    /// Replaces the quantity and unit of an existing item.
    pub async fn update_item(
        &self,
        name: &str,
        quantity: Option<&Value>,
        unit: Option<&str>,
    ) -> Result<InventoryRecord> {
        let key = normalize_name(name);
        let mut inventory = self.load_display_inventory().await?;
        if !inventory.contains(&key) {
            return Err(StoreError::NotFound(key).into());
        }

        let record = write_record(quantity, unit);
        inventory.insert(key.clone(), record.clone());
        self.save_inventory(&inventory).await?;

        tracing::info!("Updated inventory item '{}': {} {}", key, record.quantity, record.unit);
        Ok(record)
    }

    pub async fn remove_item(&self, name: &str) -> Result<InventoryRecord> {
        let key = normalize_name(name);
        let mut inventory = self.load_display_inventory().await?;
        let removed = inventory
            .remove(&key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        self.save_inventory(&inventory).await?;

        tracing::info!("Removed inventory item '{}'", key);
        Ok(removed)
    }

    pub async fn reset_inventory(&self) -> Result<()> {
        self.save_inventory(&DisplayMap::new()).await?;
        tracing::info!("Inventory reset");
        Ok(())
    }

    // Recipe catalog

    /// Reads the catalog. Entries that are not recipe objects are skipped.
    pub async fn load_recipe_catalog(&self) -> Result<Vec<Recipe>> {
        let entries = read_json_list(&self.config.recipes_path).await?;
        let total = entries.len();

        let recipes: Vec<Recipe> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Recipe>(entry) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    tracing::warn!("Skipping malformed recipe #{}: {}", index, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} of {} catalog entries", recipes.len(), total);
        Ok(recipes)
    }

    // Favorites

    pub async fn load_favorites(&self) -> Result<Vec<Value>> {
        read_json_list(&self.config.favorites_path).await
    }

    /// Appends `favorite` unless an identical entry exists. Returns whether it
    /// was added.
    pub async fn add_favorite(&self, favorite: Value) -> Result<bool> {
        let mut favorites = self.load_favorites().await?;
        if favorites.contains(&favorite) {
            tracing::debug!("Favorite already present");
            return Ok(false);
        }

        favorites.push(favorite);
        write_pretty(&self.config.favorites_path, &favorites).await?;
        tracing::info!("Added favorite ({} total)", favorites.len());
        Ok(true)
    }

    /// Drops every favorite whose title equals `title`. Returns how many were
    /// removed.
    pub async fn remove_favorite(&self, title: &str) -> Result<usize> {
        if title.is_empty() {
            return Err(StoreError::TitleRequired.into());
        }

        let favorites = self.load_favorites().await?;
        let before = favorites.len();
        let kept: Vec<Value> = favorites
            .into_iter()
            .filter(|favorite| favorite.get("title").and_then(Value::as_str) != Some(title))
            .collect();
        write_pretty(&self.config.favorites_path, &kept).await?;

        let removed = before - kept.len();
        tracing::info!("Removed {} favorite(s) titled '{}'", removed, title);
        Ok(removed)
    }
}

fn write_record(quantity: Option<&Value>, unit: Option<&str>) -> InventoryRecord {
    let quantity = coerce_quantity(quantity);
    let quantity = if quantity <= 0.0 { 1.0 } else { quantity };
    InventoryRecord::new(quantity, unit.unwrap_or_default().trim())
}

/// `None` when the file does not exist.
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// A JSON array file; missing means empty, malformed is logged and empty.
async fn read_json_list(path: &Path) -> Result<Vec<Value>> {
    let Some(text) = read_optional(path).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Value>>(&text) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!("Could not parse JSON list at {}: {}", path.display(), e);
            Ok(Vec::new())
        }
    }
}

async fn write_pretty<T: serde::Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
