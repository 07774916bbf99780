//! The `InventoryClient` façade.
//!
//! Owns the session, issues the API calls, turns every outcome into a status
//! message in the right region, and keeps the rendered product list and its
//! statistics in step with the last successful fetch.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::auth::{Session, SessionData};
use crate::error::ClientError;
use crate::models::{Credentials, Product, ProductForm, QuantityUpdate};
use crate::stats::{compute_stats, InventoryStats};
use crate::status::{StatusBoard, StatusKind, StatusMessage, StatusRegion};
use crate::view::{render, ProductListView};

const MSG_REGISTERED: &str = "Registration successful! You can now login.";
const MSG_USER_EXISTS: &str = "User already exists. Try logging in instead.";
const MSG_REGISTER_FAILED: &str = "Registration failed";
const MSG_LOGGED_IN: &str = "Login successful!";
const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
const MSG_AUTH_CONNECTION: &str = "Connection error. Make sure the server is running.";
const MSG_PRODUCT_ADDED: &str = "Product added successfully!";
const MSG_ADD_FAILED: &str = "Failed to add product";
const MSG_LOAD_FAILED: &str = "Failed to load products";
const MSG_QUANTITY_UPDATED: &str = "Quantity updated successfully!";
const MSG_UPDATE_FAILED: &str = "Failed to update quantity";
const MSG_PRODUCT_CONNECTION: &str = "Connection error";

pub struct InventoryClient {
    api: ApiClient,
    session: Session,
    status: StatusBoard,
    products: Vec<Product>,
    view: ProductListView,
    stats: InventoryStats,
    product_section_visible: bool,
}

impl InventoryClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Session::new(),
            status: StatusBoard::new(),
            products: Vec::new(),
            view: ProductListView::default(),
            stats: InventoryStats::default(),
            product_section_visible: false,
        }
    }

    /// Resume a session whose token was issued earlier
    pub fn with_session(api: ApiClient, data: SessionData) -> Self {
        let mut client = Self::new(api);
        client.session.update(data);
        client.product_section_visible = client.session.is_authenticated();
        client
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// True once a login has succeeded
    pub fn product_section_visible(&self) -> bool {
        self.product_section_visible
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn view(&self) -> &ProductListView {
        &self.view
    }

    pub fn stats(&self) -> &InventoryStats {
        &self.stats
    }

    /// The unexpired message in a region, if any
    pub fn status(&self, region: StatusRegion) -> Option<&StatusMessage> {
        self.status.current(region, Utc::now())
    }

    /// Drop status messages whose display time has passed
    pub fn clear_expired_status(&mut self) {
        self.status.clear_expired(Utc::now());
    }

    fn post(&mut self, region: StatusRegion, kind: StatusKind, text: &str) {
        self.status.post(region, kind, text, Utc::now());
    }

    fn fail(&mut self, region: StatusRegion, text: &str, err: ClientError) -> Result<(), ClientError> {
        debug!(local = err.is_local(), text, "Operation failed");
        self.post(region, StatusKind::Error, text);
        Err(err)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub async fn register(&mut self, credentials: &Credentials) -> Result<(), ClientError> {
        if let Err(e) = credentials.validate() {
            let text = e.to_string();
            return self.fail(StatusRegion::Auth, &text, e);
        }

        match self.api.register(credentials).await {
            Ok(()) => {
                info!(username = %credentials.username, "Registered account");
                self.post(StatusRegion::Auth, StatusKind::Success, MSG_REGISTERED);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status(), username = %credentials.username, "Registration failed");
                let err = ClientError::from(e);
                let text = match err {
                    ClientError::Conflict => MSG_USER_EXISTS,
                    ClientError::Network(_) => MSG_AUTH_CONNECTION,
                    _ => MSG_REGISTER_FAILED,
                };
                self.fail(StatusRegion::Auth, text, err)
            }
        }
    }

    /// Log in, store the token and load the product list.
    ///
    /// A failed login leaves any existing session in place.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), ClientError> {
        if let Err(e) = credentials.validate() {
            let text = e.to_string();
            return self.fail(StatusRegion::Auth, &text, e);
        }

        let token = match self.api.login(credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, status = ?e.status(), username = %credentials.username, "Login failed");
                let err = ClientError::from_api(e);
                let text = match err {
                    ClientError::Network(_) => MSG_AUTH_CONNECTION,
                    _ => MSG_INVALID_CREDENTIALS,
                };
                return self.fail(StatusRegion::Auth, text, err);
            }
        };

        self.session
            .update(SessionData::new(token.access_token, credentials.username.clone()));
        info!(username = %credentials.username, "Login successful");
        self.post(StatusRegion::Auth, StatusKind::Success, MSG_LOGGED_IN);
        self.product_section_visible = true;

        // A failed initial load is reported in the product region only
        let _ = self.load_products().await;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product from the form. On success the form is cleared and
    /// the list is fetched again.
    pub async fn add_product(&mut self, form: &mut ProductForm) -> Result<(), ClientError> {
        let Some(token) = self.session.token().map(str::to_string) else {
            let err = ClientError::AuthRequired;
            let text = err.to_string();
            return self.fail(StatusRegion::Product, &text, err);
        };

        let product = match form.to_new_product() {
            Ok(product) => product,
            Err(e) => {
                let text = e.to_string();
                return self.fail(StatusRegion::Product, &text, e);
            }
        };

        if let Err(e) = self.api.create_product(&token, &product).await {
            warn!(error = %e, status = ?e.status(), sku = %product.sku, "Failed to add product");
            let err = ClientError::from_api(e);
            let text = match err {
                ClientError::Network(_) => MSG_PRODUCT_CONNECTION,
                _ => MSG_ADD_FAILED,
            };
            return self.fail(StatusRegion::Product, text, err);
        }

        info!(sku = %product.sku, "Product added");
        self.post(StatusRegion::Product, StatusKind::Success, MSG_PRODUCT_ADDED);
        form.clear();
        let _ = self.load_products().await;
        Ok(())
    }

    /// Fetch the product list and re-render it.
    ///
    /// Without a session this quietly does nothing.
    pub async fn load_products(&mut self) -> Result<(), ClientError> {
        let Some(token) = self.session.token().map(str::to_string) else {
            debug!("Skipping product load without a session");
            return Ok(());
        };

        match self.api.list_products(&token).await {
            Ok(products) => {
                debug!(count = products.len(), "Products loaded");
                self.set_products(products);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status(), "Failed to load products");
                let err = ClientError::from_api(e);
                let text = match err {
                    ClientError::Network(_) => MSG_PRODUCT_CONNECTION,
                    _ => MSG_LOAD_FAILED,
                };
                self.fail(StatusRegion::Product, text, err)
            }
        }
    }

    /// Submit the text of a card's quantity control for one product
    pub async fn update_quantity(
        &mut self,
        product_id: &str,
        raw_quantity: &str,
    ) -> Result<(), ClientError> {
        let Some(token) = self.session.token().map(str::to_string) else {
            let err = ClientError::AuthRequired;
            let text = err.to_string();
            return self.fail(StatusRegion::Product, &text, err);
        };

        let update = match QuantityUpdate::parse(raw_quantity) {
            Ok(update) => update,
            Err(e) => {
                let text = e.to_string();
                return self.fail(StatusRegion::Product, &text, e);
            }
        };

        if let Err(e) = self.api.update_quantity(&token, product_id, &update).await {
            warn!(error = %e, status = ?e.status(), product_id, "Failed to update quantity");
            let err = ClientError::from_api(e);
            let text = match err {
                ClientError::Network(_) => MSG_PRODUCT_CONNECTION,
                _ => MSG_UPDATE_FAILED,
            };
            return self.fail(StatusRegion::Product, text, err);
        }

        info!(product_id, quantity = update.quantity, "Quantity updated");
        self.post(StatusRegion::Product, StatusKind::Success, MSG_QUANTITY_UPDATED);
        let _ = self.load_products().await;
        Ok(())
    }

    fn set_products(&mut self, products: Vec<Product>) {
        self.view = render(&products);
        self.stats = compute_stats(&products);
        self.products = products;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> InventoryClient {
        InventoryClient::new(ApiClient::new("http://127.0.0.1:1").expect("api client"))
    }

    #[test]
    fn test_fresh_client_is_signed_out_and_empty() {
        let client = client();
        assert!(!client.is_authenticated());
        assert!(!client.product_section_visible());
        assert!(client.products().is_empty());
        assert!(client.view().is_empty());
        assert_eq!(client.stats().total_value_display(), "$0.00");
        assert!(client.status(StatusRegion::Auth).is_none());
    }

    #[test]
    fn test_with_session_requires_a_token() {
        let api = ApiClient::new("http://127.0.0.1:1").expect("api client");
        let resumed = InventoryClient::with_session(api.clone(), SessionData::new("tok", "alice"));
        assert!(resumed.is_authenticated());
        assert!(resumed.product_section_visible());

        let empty = InventoryClient::with_session(api, SessionData::new("", "alice"));
        assert!(!empty.is_authenticated());
        assert!(!empty.product_section_visible());
    }

    #[test]
    fn test_set_products_refreshes_view_and_stats() {
        let mut client = client();
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":"a","name":"Bolt","type":"Hardware","sku":"B-1","quantity":3,"price":1.5}]"#,
        )
        .expect("products");

        client.set_products(products);

        assert_eq!(client.products().len(), 1);
        assert_eq!(client.view().cards().len(), 1);
        assert_eq!(client.stats().low_stock_count, 1);
        assert_eq!(client.stats().total_value_display(), "$4.50");
    }
}
