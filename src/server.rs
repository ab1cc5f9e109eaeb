use std::sync::Arc;
use std::future::Future;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::config::PantryConfig;
use crate::engine::{
    infer_main_ingredient, match_with_search, score_recipe, suggest_for_inventory, MatchOptions, PresenceMap, Recipe, SuggestionFilter,
};
use crate::store::{PantryStore, StoreError};

// Parameter structs for tools
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddInventoryItemParams {
    pub name: String,
    /// Number or numeric string; missing or non-positive values store 1
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateInventoryItemParams {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeleteInventoryItemParams {
    pub name: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SuggestFromInventoryParams {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct MatchRecipesParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub max_missing: Option<usize>,
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddFavoriteParams {
    /// Recipe object to remember, usually one returned by a suggestion tool
    pub favorite: Value,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RemoveFavoriteParams {
    #[serde(default)]
    pub title: Option<String>,
}

fn success(result: Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn failure(message: &str, e: anyhow::Error) -> Result<CallToolResult, McpError> {
    let error = match e.downcast_ref::<StoreError>() {
        Some(store_error) => json!({
            "error": store_error.to_string(),
            "success": false
        }),
        None => json!({
            "error": message,
            "details": e.to_string(),
            "success": false
        }),
    };
    Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
}

/// Recipe JSON with the names of the ingredients the pantry lacks.
fn with_missing(recipes: &[Recipe], presence: &PresenceMap) -> Vec<Value> {
    recipes
        .iter()
        .map(|recipe| {
            let score = score_recipe(presence, recipe);
            let mut value = json!(recipe);
            if let Some(fields) = value.as_object_mut() {
                fields.insert("missing_ingredients".to_string(), json!(score.missing));
            }
            value
        })
        .collect()
}

#[derive(Clone)]
pub struct PantryMcpServer {
    store: Arc<Mutex<PantryStore>>,
    tool_router: ToolRouter<PantryMcpServer>,
}

#[tool_router]
impl PantryMcpServer {
    pub fn new(config: PantryConfig) -> Self {
        Self::with_store(PantryStore::new(config))
    }

    pub fn with_store(store: PantryStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            tool_router: Self::tool_router(),
        }
    }

    /// Checks that the inventory and catalog files can be read.
    pub async fn check_data_files(&self) -> Result<(), anyhow::Error> {
        let store = self.store.lock().await;
        let inventory = store.load_display_inventory().await?;
        let catalog = store.load_recipe_catalog().await?;
        tracing::info!(
            "Data files readable: {} inventory items, {} recipes",
            inventory.len(),
            catalog.len()
        );
        Ok(())
    }

    // Inventory tools
    #[tool(description = "Get the pantry inventory as {name: {quantity, unit}}")]
    pub async fn get_inventory(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.load_display_inventory().await {
            Ok(inventory) => success(json!(inventory)),
            Err(e) => failure("Failed to load inventory", e),
        }
    }

    #[tool(description = "Add an item to the pantry or replace its quantity and unit")]
    pub async fn add_inventory_item(
        &self,
        Parameters(params): Parameters<AddInventoryItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store
            .upsert_item(&params.name, params.quantity.as_ref(), params.unit.as_deref())
            .await
        {
            Ok((name, record)) => success(json!({
                "message": "Item added/updated",
                "item": {
                    "name": name,
                    "quantity": record.quantity,
                    "unit": record.unit
                },
                "success": true
            })),
            Err(e) => failure("Failed to add inventory item", e),
        }
    }

    #[tool(description = "Update quantity and unit of an existing pantry item")]
    pub async fn update_inventory_item(
        &self,
        Parameters(params): Parameters<UpdateInventoryItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store
            .update_item(&params.name, params.quantity.as_ref(), params.unit.as_deref())
            .await
        {
            Ok(record) => success(json!({
                "message": "Updated",
                "item": record,
                "success": true
            })),
            Err(e) => failure("Failed to update inventory item", e),
        }
    }

    #[tool(description = "Remove an item from the pantry")]
    pub async fn delete_inventory_item(
        &self,
        Parameters(params): Parameters<DeleteInventoryItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.remove_item(&params.name).await {
            Ok(removed) => success(json!({
                "message": "Deleted",
                "item": removed,
                "success": true
            })),
            Err(e) => failure("Failed to delete inventory item", e),
        }
    }

    #[tool(description = "Empty the pantry inventory")]
    pub async fn reset_inventory(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.reset_inventory().await {
            Ok(()) => success(json!({ "message": "Inventory reset", "success": true })),
            Err(e) => failure("Failed to reset inventory", e),
        }
    }

    #[tool(description = "Guess the main protein or aromatic on hand")]
    pub async fn get_main_ingredient(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.load_inventory().await {
            Ok(raw) => success(json!({ "main": infer_main_ingredient(&raw) })),
            Err(e) => failure("Failed to load inventory", e),
        }
    }

    // Recipe tools
    #[tool(description = "List every recipe in the catalog")]
    pub async fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.load_recipe_catalog().await {
            Ok(recipes) => success(json!({
                "recipes": recipes,
                "total_count": recipes.len()
            })),
            Err(e) => failure("Failed to load recipes", e),
        }
    }

    #[tool(description = "Suggest recipes for the current inventory, narrowed to a search term or the main ingredient on hand")]
    pub async fn suggest_from_inventory(
        &self,
        Parameters(params): Parameters<SuggestFromInventoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        let (raw, catalog) = match tokio::try_join!(store.load_inventory(), store.load_recipe_catalog()) {
            Ok(loaded) => loaded,
            Err(e) => return failure("Failed to load pantry data", e),
        };

        let suggestions = suggest_for_inventory(
            &raw,
            &catalog,
            params.search.as_deref(),
            MatchOptions::default(),
        );

        let (filter, term) = match &suggestions.filter {
            SuggestionFilter::Search(term) => ("search", Some(term.as_str())),
            SuggestionFilter::MainIngredient(main) => ("main_ingredient", Some(*main)),
            SuggestionFilter::CookableOnly => ("cookable_only", None),
        };

        success(json!({
            "recipes": with_missing(&suggestions.recipes, &suggestions.presence),
            "filter": filter,
            "term": term,
            "total_count": suggestions.recipes.len()
        }))
    }

    #[tool(description = "Match the catalog against the inventory: cookable recipes first, then ones missing a few ingredients")]
    pub async fn match_recipes(
        &self,
        Parameters(params): Parameters<MatchRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        let (raw, catalog) = match tokio::try_join!(store.load_inventory(), store.load_recipe_catalog()) {
            Ok(loaded) => loaded,
            Err(e) => return failure("Failed to load pantry data", e),
        };

        let options = MatchOptions::from_overrides(params.max_missing, params.top);
        let search = params.search.map(|s| s.to_lowercase());
        let matches = match_with_search(&raw, &catalog, search.as_deref(), options);

        success(json!({
            "recipes": with_missing(&matches.recipes, &matches.presence),
            "max_missing": options.max_missing,
            "top": options.top,
            "total_count": matches.recipes.len()
        }))
    }

    // Favorites tools
    #[tool(description = "List favorite recipes")]
    pub async fn get_favorites(&self) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.load_favorites().await {
            Ok(favorites) => success(json!(favorites)),
            Err(e) => failure("Failed to load favorites", e),
        }
    }

    #[tool(description = "Add a recipe to favorites")]
    pub async fn add_favorite(
        &self,
        Parameters(params): Parameters<AddFavoriteParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.add_favorite(params.favorite).await {
            Ok(added) => success(json!({
                "message": "Added to favorites",
                "added": added,
                "success": true
            })),
            Err(e) => failure("Failed to add favorite", e),
        }
    }

    #[tool(description = "Remove favorites by recipe title")]
    pub async fn remove_favorite(
        &self,
        Parameters(params): Parameters<RemoveFavoriteParams>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;

        match store.remove_favorite(params.title.as_deref().unwrap_or_default()).await {
            Ok(removed) => success(json!({
                "message": "Favorite removed",
                "removed": removed,
                "success": true
            })),
            Err(e) => failure("Failed to remove favorite", e),
        }
    }
}

#[tool_handler]
impl ServerHandler for PantryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server tracks a pantry inventory and suggests recipes from a local catalog. Available tools include: inventory listing and editing, main-ingredient detection, recipe suggestions (cookable now or missing only a few ingredients), catalog listing, and favorites management.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
