//! # Pantry Matching Engine
//!
//! Pure functions that turn a raw inventory and a recipe catalog into
//! recipe suggestions. Nothing in this module touches the filesystem or
//! returns an error; malformed input is coerced to safe defaults.
//!
//! ## Modules
//!
//! - [`types`] - Raw and canonical inventory shapes, recipes, match results
//! - [`normalize`] - Display and presence normalization
//! - [`matcher`] - Missing-ingredient scoring and cookable/near tiers
//! - [`main_ingredient`] - Star-ingredient inference and term filters
//! - [`suggest`] - The two suggestion paths built on the above
//!
//! ## Quick Start
//!
//! ```
//! use mcp_pantry::engine::{match_recipes, normalize_for_matching, MatchOptions, RawInventory, Recipe};
//! use serde_json::json;
//!
//! let raw: RawInventory = serde_json::from_value(json!({
//!     "egg": {"quantity": 2, "unit": "pcs"},
//!     "flour": {"quantity": 0}
//! })).unwrap();
//! let catalog = vec![
//!     Recipe::new("Omelette", ["egg"]),
//!     Recipe::new("Bread", ["flour", "egg", "yeast"]),
//! ];
//!
//! let presence = normalize_for_matching(&raw);
//! let matches = match_recipes(&presence, &catalog, MatchOptions::default());
//! assert_eq!(matches.cookable[0].title, "Omelette");
//! assert_eq!(matches.near[0].title, "Bread");
//! ```

pub mod main_ingredient;
pub mod matcher;
pub mod normalize;
pub mod suggest;
pub mod types;

pub use main_ingredient::{filter_by_term, filter_by_title, infer_main_ingredient, STAR_INGREDIENTS};
pub use matcher::{is_missing, match_recipes, score_recipe, MatchOptions, RecipeScore};
pub use normalize::{normalize_for_display, normalize_for_matching, normalize_name};
pub use suggest::{match_with_search, suggest_for_inventory, SearchMatches, SuggestionFilter, Suggestions};
pub use types::*;
