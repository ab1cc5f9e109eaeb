//! Inventory normalization.
//!
//! Turns a [`RawInventory`] into either the canonical [`DisplayMap`] or the
//! [`PresenceMap`] used for matching. Every field has an explicit
//! coerce-or-default rule; nothing here fails.

use serde_json::Value;

use crate::engine::types::{DisplayMap, InventoryRecord, InventoryValue, PresenceMap, RawInventory};

/// Canonical storage key: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Coerces a raw quantity to a finite, non-negative number.
///
/// Numbers and numeric strings are taken as-is, booleans count as 1/0,
/// everything else (including negatives) becomes 0.
pub fn coerce_quantity(value: Option<&Value>) -> f64 {
    let quantity = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Coerces a raw unit to a trimmed string; missing or structured values
/// become the empty unit.
pub fn coerce_unit(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// JSON truthiness for bare inventory flags.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

impl InventoryValue {
    /// Canonical record for this value.
    pub fn to_record(&self) -> InventoryRecord {
        match self {
            InventoryValue::Record { quantity, unit } => {
                InventoryRecord::new(coerce_quantity(quantity.as_ref()), coerce_unit(unit.as_ref()))
            }
            InventoryValue::Flag(flag) => {
                let quantity = if is_truthy(flag) { 1.0 } else { 0.0 };
                InventoryRecord::new(quantity, "")
            }
        }
    }

    pub fn is_present(&self) -> bool {
        match self {
            InventoryValue::Record { quantity, .. } => coerce_quantity(quantity.as_ref()) > 0.0,
            InventoryValue::Flag(flag) => is_truthy(flag),
        }
    }
}

/// Builds the `{name: {quantity, unit}}` view. Later entries whose
/// canonical name collides with an earlier one replace it.
pub fn normalize_for_display(raw: &RawInventory) -> DisplayMap {
    let mut display = DisplayMap::new();
    for (name, value) in &raw.entries {
        display.insert(normalize_name(name), value.to_record());
    }
    display
}

/// Original, lowercase, uppercase and capitalized spellings of `name`.
///
/// Duplicates are possible (e.g. an already-lowercase name); writing them
/// to the presence map twice is harmless.
pub fn case_variants(name: &str) -> [String; 4] {
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    };
    [name.to_string(), name.to_lowercase(), name.to_uppercase(), capitalized]
}

/// Builds the presence map used by the matcher.
///
/// Blank names are dropped. Each surviving name is trimmed and expanded into
/// its case variants; a variant that is present anywhere stays present.
pub fn normalize_for_matching(raw: &RawInventory) -> PresenceMap {
    let mut presence = PresenceMap::new();
    for (name, value) in &raw.entries {
        let base = name.trim();
        if base.is_empty() {
            continue;
        }
        let present = value.is_present();
        for variant in case_variants(base) {
            presence.mark(variant, present);
        }
    }
    tracing::debug!(
        "Built presence map: {} variants, {} present",
        presence.len(),
        presence.present_count()
    );
    presence
}
