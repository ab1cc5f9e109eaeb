mod common;

use common::TestEnvironment;
use mcp_pantry::engine::InventoryRecord;
use mcp_pantry::server::{
    AddFavoriteParams, AddInventoryItemParams, DeleteInventoryItemParams, MatchRecipesParams,
    RemoveFavoriteParams, SuggestFromInventoryParams, UpdateInventoryItemParams,
};
use mcp_pantry::{PantryConfig, PantryMcpServer, PantryStore};
use pretty_assertions::assert_eq;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ServerHandler;
use serde_json::{json, Value};
use serial_test::serial;

fn server_for(env: &TestEnvironment) -> PantryMcpServer {
    PantryMcpServer::with_store(PantryStore::new(env.config.clone()))
}

/// JSON body of a tool response.
fn response_json(result: &CallToolResult) -> Value {
    let text = result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.clone())
        .expect("Tool response should carry text content");
    serde_json::from_str(&text).expect("Tool response should be JSON")
}

fn recipe_titles(response: &Value) -> Vec<&str> {
    response["recipes"]
        .as_array()
        .expect("Response should list recipes")
        .iter()
        .filter_map(|recipe| recipe["title"].as_str())
        .collect()
}

fn suggest(search: Option<&str>) -> Parameters<SuggestFromInventoryParams> {
    Parameters(SuggestFromInventoryParams {
        search: search.map(str::to_string),
    })
}

fn match_params(
    search: Option<&str>,
    max_missing: Option<usize>,
    top: Option<usize>,
) -> Parameters<MatchRecipesParams> {
    Parameters(MatchRecipesParams {
        search: search.map(str::to_string),
        max_missing,
        top,
    })
}

#[tokio::test]
async fn test_mcp_server_initialization() {
    common::init_test_logging();
    let env = TestEnvironment::with_catalog().expect("Failed to create test environment");
    let server = server_for(&env);

    let info = server.get_info();
    assert!(info.capabilities.tools.is_some(), "Server should advertise tools");

    server
        .check_data_files()
        .await
        .expect("Data files should be readable");
}

#[tokio::test]
async fn test_inventory_tools_write_through_to_store() {
    let env = TestEnvironment::new().unwrap();
    let server = server_for(&env);

    let result = server
        .add_inventory_item(Parameters(AddInventoryItemParams {
            name: "Eggs".to_string(),
            quantity: Some(json!("6")),
            unit: Some("pcs".to_string()),
        }))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));

    let result = server
        .update_inventory_item(Parameters(UpdateInventoryItemParams {
            name: "EGGS".to_string(),
            quantity: Some(json!(4)),
            unit: None,
        }))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));

    let inventory = env.store.load_display_inventory().await.unwrap();
    assert_eq!(inventory.get("eggs"), Some(&InventoryRecord::new(4.0, "")));

    let result = server.get_inventory().await.unwrap();
    assert_ne!(result.is_error, Some(true));
    assert_eq!(response_json(&result), json!({"eggs": {"quantity": 4.0, "unit": ""}}));

    let result = server
        .delete_inventory_item(Parameters(DeleteInventoryItemParams {
            name: "eggs".to_string(),
        }))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));
    assert!(env.store.load_display_inventory().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inventory_tools_report_rejected_requests() {
    let env = TestEnvironment::new().unwrap();
    let server = server_for(&env);

    let result = server
        .add_inventory_item(Parameters(AddInventoryItemParams {
            name: "  ".to_string(),
            quantity: None,
            unit: None,
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(response_json(&result), json!({"error": "name required", "success": false}));

    let result = server
        .delete_inventory_item(Parameters(DeleteInventoryItemParams {
            name: "unicorn".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    assert_eq!(response_json(&result)["error"], json!("Not found: unicorn"));
}

#[tokio::test]
async fn test_list_recipes_returns_catalog_untouched() {
    let env = TestEnvironment::with_catalog().unwrap();
    let server = server_for(&env);

    let response = response_json(&server.list_recipes().await.unwrap());

    assert_eq!(response["total_count"], json!(5));
    assert_eq!(
        recipe_titles(&response),
        vec!["Omelette", "Bread", "Chicken Soup", "Beef Wellington", "Fried Onions"]
    );
    assert_eq!(response["recipes"][0]["time"], json!("10 min"));
}

#[tokio::test]
async fn test_main_ingredient_tool_reports_star() {
    let env = TestEnvironment::with_catalog().unwrap();
    let server = server_for(&env);

    let response = response_json(&server.get_main_ingredient().await.unwrap());
    assert_eq!(response, json!({"main": null}));

    env.write_inventory(&json!({"tofu": 1, "Onion": 0, "egg": 2})).unwrap();
    let response = response_json(&server.get_main_ingredient().await.unwrap());
    assert_eq!(response, json!({"main": "egg"}));
}

#[tokio::test]
async fn test_suggest_from_inventory_reports_filter_and_missing() {
    let env = TestEnvironment::with_catalog().unwrap();
    env.write_inventory(&json!({"egg": {"quantity": 2, "unit": "pcs"}})).unwrap();
    let server = server_for(&env);

    let result = server.suggest_from_inventory(suggest(None)).await.unwrap();
    assert_ne!(result.is_error, Some(true));
    let response = response_json(&result);
    assert_eq!(response["filter"], json!("main_ingredient"));
    assert_eq!(response["term"], json!("egg"));
    assert_eq!(recipe_titles(&response), vec!["Omelette", "Bread"]);
    assert_eq!(response["total_count"], json!(2));
    assert_eq!(response["recipes"][0]["missing_ingredients"], json!([]));
    assert_eq!(response["recipes"][1]["missing_ingredients"], json!(["flour", "yeast"]));

    let response = response_json(&server.suggest_from_inventory(suggest(Some(" ONION "))).await.unwrap());
    assert_eq!(response["filter"], json!("search"));
    assert_eq!(response["term"], json!("onion"));
    assert_eq!(recipe_titles(&response), vec!["Fried Onions"]);
    assert_eq!(response["recipes"][0]["missing_ingredients"], json!(["Onion", "oil"]));
}

#[tokio::test]
async fn test_suggest_from_inventory_without_star_is_cookable_only() {
    let env = TestEnvironment::new().unwrap();
    env.write_recipes(&json!([
        {"title": "Jam Toast", "ingredients": [{"name": "bread"}, {"name": "jam"}]},
        {"title": "Toast", "ingredients": [{"name": "bread"}]}
    ]))
    .unwrap();
    env.write_inventory(&json!({"bread": 1})).unwrap();
    let server = server_for(&env);

    let response = response_json(&server.suggest_from_inventory(suggest(Some("   "))).await.unwrap());

    assert_eq!(response["filter"], json!("cookable_only"));
    assert_eq!(response["term"], Value::Null);
    assert_eq!(recipe_titles(&response), vec!["Toast"]);
}

#[tokio::test]
async fn test_match_recipes_honors_overrides_and_title_search() {
    let env = TestEnvironment::with_catalog().unwrap();
    env.write_inventory(&json!({"egg": {"quantity": 2, "unit": "pcs"}})).unwrap();
    let server = server_for(&env);

    let response = response_json(&server.match_recipes(match_params(None, None, None)).await.unwrap());
    assert_eq!(recipe_titles(&response), vec!["Omelette", "Bread", "Fried Onions"]);
    assert_eq!(response["max_missing"], json!(3));
    assert_eq!(response["top"], json!(50));
    assert_eq!(response["recipes"][2]["missing_ingredients"], json!(["Onion", "oil"]));

    let response = response_json(&server.match_recipes(match_params(None, Some(1), None)).await.unwrap());
    assert_eq!(recipe_titles(&response), vec!["Omelette"]);
    assert_eq!(response["max_missing"], json!(1));

    // top applies to each tier separately
    let response = response_json(&server.match_recipes(match_params(None, None, Some(1))).await.unwrap());
    assert_eq!(recipe_titles(&response), vec!["Omelette", "Bread"]);
    assert_eq!(response["total_count"], json!(2));

    let response = response_json(&server.match_recipes(match_params(Some("BREAD"), None, None)).await.unwrap());
    assert_eq!(recipe_titles(&response), vec!["Bread"]);
    assert_eq!(response["recipes"][0]["missing_ingredients"], json!(["flour", "yeast"]));

    // "egg" is only an ingredient name, never a title
    let response = response_json(&server.match_recipes(match_params(Some("egg"), None, None)).await.unwrap());
    assert_eq!(recipe_titles(&response), Vec::<&str>::new());
    assert_eq!(response["total_count"], json!(0));
}

#[tokio::test]
async fn test_favorite_tools() {
    let env = TestEnvironment::new().unwrap();
    let server = server_for(&env);

    let result = server
        .add_favorite(Parameters(AddFavoriteParams {
            favorite: json!({"title": "Omelette"}),
        }))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));
    assert_eq!(env.store.load_favorites().await.unwrap(), vec![json!({"title": "Omelette"})]);

    let result = server
        .remove_favorite(Parameters(RemoveFavoriteParams { title: None }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));

    let result = server
        .remove_favorite(Parameters(RemoveFavoriteParams {
            title: Some("Omelette".to_string()),
        }))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));
    assert!(env.store.load_favorites().await.unwrap().is_empty());

    let result = server.get_favorites().await.unwrap();
    assert_ne!(result.is_error, Some(true));
    assert_eq!(response_json(&result), json!([]));
}

#[test]
#[serial]
fn test_config_from_env() {
    std::env::set_var("PANTRY_DATA_DIR", "/srv/pantry");
    std::env::set_var("PANTRY_RECIPES_FILE", "catalog.json");
    std::env::remove_var("PANTRY_INVENTORY_FILE");
    std::env::remove_var("PANTRY_FAVORITES_FILE");

    let config = PantryConfig::from_env();

    std::env::remove_var("PANTRY_DATA_DIR");
    std::env::remove_var("PANTRY_RECIPES_FILE");

    assert_eq!(config.inventory_path, std::path::Path::new("/srv/pantry/inventory.json"));
    assert_eq!(config.recipes_path, std::path::Path::new("/srv/pantry/catalog.json"));
    assert_eq!(config.favorites_path, std::path::Path::new("/srv/pantry/favorites.json"));
}

#[test]
#[serial]
fn test_config_defaults_to_current_dir() {
    for var in [
        "PANTRY_DATA_DIR",
        "PANTRY_INVENTORY_FILE",
        "PANTRY_RECIPES_FILE",
        "PANTRY_FAVORITES_FILE",
    ] {
        std::env::remove_var(var);
    }

    assert_eq!(PantryConfig::from_env(), PantryConfig::default());
}
