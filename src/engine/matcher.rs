//! Recipe matching against a presence map.
//!
//! A recipe's score is the number of its ingredients that are not present.
//! Zero missing makes it cookable; up to [`MatchOptions::max_missing`] makes
//! it near; anything more is dropped.

use crate::engine::types::{MatchResult, PresenceMap, Recipe, RecipeIngredient};

pub const DEFAULT_MAX_MISSING: usize = 3;
pub const DEFAULT_TOP: usize = 50;

/// Tolerance and size limits for [`match_recipes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Largest missing count still listed as near
    pub max_missing: usize,
    /// Maximum entries per tier
    pub top: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_missing: DEFAULT_MAX_MISSING,
            top: DEFAULT_TOP,
        }
    }
}

impl MatchOptions {
    /// Fills unset fields from the defaults.
    pub fn from_overrides(max_missing: Option<usize>, top: Option<usize>) -> Self {
        let defaults = Self::default();
        Self {
            max_missing: max_missing.unwrap_or(defaults.max_missing),
            top: top.unwrap_or(defaults.top),
        }
    }
}

/// Missing ingredients of one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeScore {
    pub missing_count: usize,
    /// Names as authored, in recipe order
    pub missing: Vec<String>,
}

/// Exact lookup of the authored name; no fuzzy or case-folded fallback.
pub fn is_missing(presence: &PresenceMap, ingredient: &RecipeIngredient) -> bool {
    !presence.has(&ingredient.name)
}

/// Scores one recipe by exact lookup of each ingredient name.
pub fn score_recipe(presence: &PresenceMap, recipe: &Recipe) -> RecipeScore {
    let missing: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|ingredient| is_missing(presence, ingredient))
        .map(|ingredient| ingredient.name.clone())
        .collect();
    RecipeScore {
        missing_count: missing.len(),
        missing,
    }
}

pub fn missing_count(presence: &PresenceMap, recipe: &Recipe) -> usize {
    recipe
        .ingredients
        .iter()
        .filter(|ingredient| is_missing(presence, ingredient))
        .count()
}

/// Splits the catalog into cookable and near tiers.
///
/// Cookable keeps catalog order. Near is sorted by missing count with ties
/// in catalog order. Both are cut to `options.top`.
pub fn match_recipes(presence: &PresenceMap, catalog: &[Recipe], options: MatchOptions) -> MatchResult {
    let mut cookable = Vec::new();
    let mut near: Vec<(usize, &Recipe)> = Vec::new();

    for recipe in catalog {
        match missing_count(presence, recipe) {
            0 => cookable.push(recipe.clone()),
            missing if missing <= options.max_missing => near.push((missing, recipe)),
            _ => {}
        }
    }

    // sort_by_key is stable
    near.sort_by_key(|(missing, _)| *missing);

    cookable.truncate(options.top);
    let near: Vec<Recipe> = near
        .into_iter()
        .take(options.top)
        .map(|(_, recipe)| recipe.clone())
        .collect();

    tracing::debug!(
        "Matched {} recipes: {} cookable, {} near (max_missing={}, top={})",
        catalog.len(),
        cookable.len(),
        near.len(),
        options.max_missing,
        options.top
    );

    MatchResult { cookable, near }
}
