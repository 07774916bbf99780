//! Core library for stocktake.
//!
//! Everything needed to talk to the inventory management API and turn its
//! answers into something a front end can draw:
//!
//! - `api`: the HTTP client, one method per endpoint
//! - `auth`: the in-memory bearer-token session
//! - `models`: products, credentials and request/response bodies
//! - `inventory`: the `InventoryClient` façade tying it all together
//! - `view` / `stats`: pure transforms from products to cards and totals
//! - `status`: expiring status messages scoped to display regions
//! - `config`: API base URL resolution and local directories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod stats;
pub mod status;
pub mod utils;
pub mod view;

pub use error::ClientError;
pub use inventory::InventoryClient;
