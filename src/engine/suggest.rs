//! The two recipe suggestion paths.
//!
//! They differ on purpose and must stay that way:
//!
//! - [`suggest_for_inventory`] narrows cookable+near to a search term or, if
//!   none is given, to the inferred main ingredient. With neither it returns
//!   the cookable tier alone.
//! - [`match_with_search`] always returns cookable+near and only filters on
//!   recipe titles when a search term is given.

use crate::engine::main_ingredient::{filter_by_term, filter_by_title, infer_main_ingredient};
use crate::engine::matcher::{match_recipes, MatchOptions};
use crate::engine::normalize::normalize_for_matching;
use crate::engine::types::{PresenceMap, RawInventory, Recipe};

/// What [`suggest_for_inventory`] filtered on, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionFilter {
    Search(String),
    MainIngredient(&'static str),
    CookableOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestions {
    pub filter: SuggestionFilter,
    pub recipes: Vec<Recipe>,
    /// The presence map the recipes were scored against
    pub presence: PresenceMap,
}

/// Result of [`match_with_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatches {
    pub recipes: Vec<Recipe>,
    pub presence: PresenceMap,
}

pub fn suggest_for_inventory(
    raw: &RawInventory,
    catalog: &[Recipe],
    search: Option<&str>,
    options: MatchOptions,
) -> Suggestions {
    let presence = normalize_for_matching(raw);
    let matches = match_recipes(&presence, catalog, options);

    let search = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    let filter = match search {
        Some(term) => SuggestionFilter::Search(term),
        None => match infer_main_ingredient(raw) {
            Some(main) => SuggestionFilter::MainIngredient(main),
            None => SuggestionFilter::CookableOnly,
        },
    };

    let recipes = match &filter {
        SuggestionFilter::Search(term) => filter_by_term(matches.combined(), term),
        SuggestionFilter::MainIngredient(main) => filter_by_term(matches.combined(), main),
        SuggestionFilter::CookableOnly => matches.cookable,
    };

    tracing::debug!("Inventory suggestions with {:?}: {} recipes", filter, recipes.len());
    Suggestions {
        filter,
        recipes,
        presence,
    }
}

/// Cookable+near, optionally narrowed to titles containing `search`.
///
/// The term is lowercased but not trimmed.
pub fn match_with_search(
    raw: &RawInventory,
    catalog: &[Recipe],
    search: Option<&str>,
    options: MatchOptions,
) -> SearchMatches {
    let presence = normalize_for_matching(raw);
    let recipes = match_recipes(&presence, catalog, options).combined();

    let recipes = match search.filter(|s| !s.is_empty()) {
        Some(term) => filter_by_title(recipes, term),
        None => recipes,
    };
    SearchMatches { recipes, presence }
}
