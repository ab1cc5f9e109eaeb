//! Type definitions shared by the normalizer and the matcher.
//!
//! ## Key Types
//!
//! - [`RawInventory`] - Inventory exactly as persisted, in file order
//! - [`InventoryValue`] - A single raw inventory value (record or bare flag)
//! - [`DisplayMap`] - Canonical `{name: {quantity, unit}}` view for display
//! - [`PresenceMap`] - Case-variant keyed "have it" flags used for matching
//! - [`Recipe`] - A catalog recipe; unknown fields are carried through untouched
//! - [`MatchResult`] - Cookable and near tiers produced by the matcher
//!
//! ## Input Tolerance
//!
//! Inventory and recipe files are hand-edited, so these types accept loose
//! shapes and leave coercion to the normalizer:
//! - [`RawInventory`] keeps values as raw JSON until they are coerced
//! - [`Recipe`] treats a missing or non-list ingredient field as empty, reads
//!   bare strings as ingredient names and skips any other ingredient shape

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single inventory value as found in storage.
///
/// Objects are quantity records; anything else is a bare flag read by
/// truthiness.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryValue {
    /// `{"quantity": .., "unit": ..}`, fields still uncoerced
    Record {
        quantity: Option<Value>,
        unit: Option<Value>,
    },
    /// `true`, `1`, `"yes"`, `null`, ...
    Flag(Value),
}

impl From<Value> for InventoryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => InventoryValue::Record {
                quantity: fields.remove("quantity"),
                unit: fields.remove("unit"),
            },
            other => InventoryValue::Flag(other),
        }
    }
}

/// Inventory entries in the order they were written.
///
/// Names are kept as written (casing, surrounding whitespace); the
/// normalizer decides what the canonical key is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInventory {
    pub entries: Vec<(String, InventoryValue)>,
}

impl RawInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<InventoryValue>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, Value)> for RawInventory {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name, InventoryValue::from(value)))
                .collect(),
        }
    }
}

/// Only a JSON object is a valid inventory. The visitor keeps entries in
/// file order, which `serde_json::Map` would not without `preserve_order`.
impl<'de> Deserialize<'de> for RawInventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        use std::fmt;

        struct RawInventoryVisitor;

        impl<'de> Visitor<'de> for RawInventoryVisitor {
            type Value = RawInventory;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping ingredient names to quantities or flags")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut inventory = RawInventory::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    inventory.insert(name, value);
                }
                Ok(inventory)
            }

            // `null` is how an emptied file sometimes ends up on disk
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(RawInventory::new())
            }
        }

        deserializer.deserialize_any(RawInventoryVisitor)
    }
}

/// Canonical quantity and unit for one inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub quantity: f64,
    pub unit: String,
}

impl InventoryRecord {
    pub fn new(quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
        }
    }

    /// Zero or negative quantities are kept for display but do not count as
    /// having the item.
    pub fn is_present(&self) -> bool {
        self.quantity > 0.0
    }
}

/// Canonical inventory keyed by trimmed, lowercased name.
///
/// Serializes as `{name: {quantity, unit}}`, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayMap(pub BTreeMap<String, InventoryRecord>);

impl DisplayMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&InventoryRecord> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: String, record: InventoryRecord) -> Option<InventoryRecord> {
        self.0.insert(name, record)
    }

    pub fn remove(&mut self, name: &str) -> Option<InventoryRecord> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InventoryRecord)> {
        self.0.iter()
    }

    /// Re-expresses the canonical map as raw input, e.g. to normalize it
    /// again or to persist it.
    pub fn to_raw(&self) -> RawInventory {
        self.0
            .iter()
            .map(|(name, record)| {
                (
                    name.clone(),
                    serde_json::json!({ "quantity": record.quantity, "unit": record.unit }),
                )
            })
            .collect()
    }
}

/// "Have it" flags keyed by every case variant of each inventory name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceMap(HashMap<String, bool>);

impl PresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `present` for `variant`. A `true` is never downgraded by a
    /// later `false`.
    pub fn mark(&mut self, variant: String, present: bool) {
        if present {
            self.0.insert(variant, true);
        } else {
            self.0.entry(variant).or_insert(false);
        }
    }

    /// Exact-key lookup.
    pub fn has(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn present_count(&self) -> usize {
        self.0.values().filter(|present| **present).count()
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Name as authored in the catalog; matched by exact lookup
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Quantity, unit, notes and whatever else the catalog carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Lenient reading of one ingredient line: objects and bare names are
    /// kept, anything else yields `None`. A non-string `name` is empty.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(mut fields) => {
                let name = match fields.remove("name") {
                    Some(Value::String(name)) => name,
                    _ => String::new(),
                };
                Some(Self { name, extra: fields })
            }
            Value::String(name) => Some(Self::new(name)),
            _ => None,
        }
    }
}

/// A recipe from the catalog.
///
/// Read-only during matching. Fields other than `title` and `ingredients`
/// are preserved so responses show everything the catalog had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "ingredients_or_empty")]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn new<I, S>(title: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            ingredients: ingredients
                .into_iter()
                .map(|name| RecipeIngredient::new(name))
                .collect(),
            extra: Map::new(),
        }
    }
}

/// Cookable and near recipes, each ordered by ascending missing count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub cookable: Vec<Recipe>,
    pub near: Vec<Recipe>,
}

impl MatchResult {
    /// Cookable first, then near.
    pub fn combined(self) -> Vec<Recipe> {
        let mut recipes = self.cookable;
        recipes.extend(self.near);
        recipes
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

// Anything but a list means "no ingredients"
fn ingredients_or_empty<'de, D>(deserializer: D) -> Result<Vec<RecipeIngredient>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(RecipeIngredient::from_value).collect()),
        _ => Ok(Vec::new()),
    }
}
