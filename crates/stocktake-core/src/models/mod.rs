//! Data models for the inventory API.
//!
//! - `Product`: a product as returned by the server
//! - `NewProduct`, `ProductForm`: what the add-product form sends
//! - `QuantityUpdate`: body of the stock adjustment endpoint
//! - `Credentials`, `TokenResponse`: account registration and login

pub mod account;
pub mod product;

pub use account::{Credentials, TokenResponse};
pub use product::{
    NewProduct, Product, ProductForm, QuantityUpdate, LOW_STOCK_THRESHOLD, PLACEHOLDER_IMAGE_URL,
};
