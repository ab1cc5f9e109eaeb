//! # Pantry Store
//!
//! Flat-file persistence for the pantry: inventory, recipe catalog and
//! favorites, each a JSON file whose location comes from
//! [`PantryConfig`](crate::config::PantryConfig).
//!
//! ## Modules
//!
//! - [`store`] - [`PantryStore`] with all read and write operations
//! - [`error`] - [`StoreError`] for rejected requests
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_pantry::{PantryConfig, PantryStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = PantryStore::new(PantryConfig::in_dir("./data"));
//!
//! store.upsert_item("Eggs", Some(&serde_json::json!(6)), Some("pcs")).await?;
//! let inventory = store.load_display_inventory().await?;
//! println!("{} items in the pantry", inventory.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
#[allow(clippy::module_inception)]
pub mod store;

pub use error::StoreError;
pub use store::PantryStore;
