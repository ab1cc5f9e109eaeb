//! Main-ingredient inference and term filtering.

use std::collections::HashSet;

use crate::engine::normalize::normalize_name;
use crate::engine::types::{RawInventory, Recipe};

/// Proteins and aromatics, highest priority first.
pub const STAR_INGREDIENTS: &[&str] = &[
    "chicken", "beef", "pork", "salmon", "egg", "eggs", "onion", "celery",
];

/// First star ingredient that appears in the inventory, by priority rather
/// than by inventory order.
///
/// Any entry counts, including ones with zero quantity.
pub fn infer_main_ingredient(raw: &RawInventory) -> Option<&'static str> {
    let names: HashSet<String> = raw.names().map(normalize_name).collect();
    STAR_INGREDIENTS.iter().copied().find(|star| names.contains(*star))
}

/// Case-insensitive substring test against the title and every ingredient
/// name.
pub fn recipe_mentions(recipe: &Recipe, term: &str) -> bool {
    let term = term.to_lowercase();
    recipe.title.to_lowercase().contains(&term)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.name.to_lowercase().contains(&term))
}

pub fn filter_by_term(recipes: Vec<Recipe>, term: &str) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|recipe| recipe_mentions(recipe, term))
        .collect()
}

/// Title-only variant used by the plain recipe search.
pub fn filter_by_title(recipes: Vec<Recipe>, term: &str) -> Vec<Recipe> {
    let term = term.to_lowercase();
    recipes
        .into_iter()
        .filter(|recipe| recipe.title.to_lowercase().contains(&term))
        .collect()
}
