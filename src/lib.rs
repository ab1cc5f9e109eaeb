//! # Pantry MCP Library
//!
//! This library tracks a pantry inventory and suggests recipes that can be
//! cooked with it, exposed through the Model Context Protocol (MCP). It
//! consists of three main components:
//!
//! ## Engine Module
//!
//! The [`engine`] module normalizes inventory records into display and
//! presence forms and classifies recipes into "cookable" and "near" tiers.
//!
//! ## Store Module
//!
//! The [`store`] module persists inventory, the recipe catalog and favorites
//! as JSON files.
//!
//! ## Server Module
//!
//! The [`server`] module implements an MCP server that exposes inventory
//! management and recipe suggestions as tools AI assistants can use.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_pantry::{PantryConfig, PantryMcpServer, PantryStore};
//!
//! // Use the store directly
//! let store = PantryStore::new(PantryConfig::in_dir("./data"));
//!
//! // Or create an MCP server
//! let server = PantryMcpServer::new(PantryConfig::from_env());
//! ```

pub mod config;
pub mod engine;
pub mod server;
pub mod store;

pub use config::PantryConfig;
pub use server::PantryMcpServer;
pub use store::PantryStore;
