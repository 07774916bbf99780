//! REST API client module for the inventory service.
//!
//! This module provides the `ApiClient` for registering accounts, logging in
//! and managing products.
//!
//! Login returns a bearer token which every product endpoint requires in the
//! `Authorization` header.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
