//! Application state management for Stocktake.
//!
//! `App` wraps the `InventoryClient` with everything the terminal page needs:
//! which panel has focus, the text typed into the auth and product forms, the
//! selected product card and the pending text of each card's quantity control.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info};

use stocktake_core::api::ApiClient;
use stocktake_core::config::Config;
use stocktake_core::models::{Credentials, ProductForm};
use stocktake_core::view::ProductCard;
use stocktake_core::InventoryClient;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for product form fields.
const MAX_FIELD_LENGTH: usize = 200;

/// Maximum length for a card's quantity control.
const MAX_QUANTITY_LENGTH: usize = 9;

/// Environment variable pre-filling the username field
const USERNAME_ENV: &str = "STOCKTAKE_USERNAME";

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Panel receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Auth,
    AddProduct,
    Products,
}

impl Focus {
    /// Next panel; the product panels are skipped until login succeeds
    pub fn next(&self, products_visible: bool) -> Self {
        match (self, products_visible) {
            (_, false) => Focus::Auth,
            (Focus::Auth, true) => Focus::AddProduct,
            (Focus::AddProduct, true) => Focus::Products,
            (Focus::Products, true) => Focus::Auth,
        }
    }

    pub fn prev(&self, products_visible: bool) -> Self {
        match (self, products_visible) {
            (_, false) => Focus::Auth,
            (Focus::Auth, true) => Focus::Products,
            (Focus::AddProduct, true) => Focus::Auth,
            (Focus::Products, true) => Focus::AddProduct,
        }
    }
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
    Login,
    Register,
}

impl AuthField {
    pub fn next(&self) -> Self {
        match self {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Login,
            AuthField::Login => AuthField::Register,
            AuthField::Register => AuthField::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            AuthField::Username => AuthField::Register,
            AuthField::Password => AuthField::Username,
            AuthField::Login => AuthField::Password,
            AuthField::Register => AuthField::Login,
        }
    }
}

/// Add-product form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Type,
    Sku,
    ImageUrl,
    Description,
    Quantity,
    Price,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Type,
        FormField::Sku,
        FormField::ImageUrl,
        FormField::Description,
        FormField::Quantity,
        FormField::Price,
        FormField::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name*",
            FormField::Type => "Type*",
            FormField::Sku => "SKU*",
            FormField::ImageUrl => "Image URL",
            FormField::Description => "Description",
            FormField::Quantity => "Quantity",
            FormField::Price => "Price",
            FormField::Submit => "Add Product",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Read access to the text behind a form field
pub fn form_value(form: &ProductForm, field: FormField) -> &str {
    match field {
        FormField::Name => &form.name,
        FormField::Type => &form.product_type,
        FormField::Sku => &form.sku,
        FormField::ImageUrl => &form.image_url,
        FormField::Description => &form.description,
        FormField::Quantity => &form.quantity,
        FormField::Price => &form.price,
        FormField::Submit => "",
    }
}

fn form_value_mut(form: &mut ProductForm, field: FormField) -> Option<&mut String> {
    match field {
        FormField::Name => Some(&mut form.name),
        FormField::Type => Some(&mut form.product_type),
        FormField::Sku => Some(&mut form.sku),
        FormField::ImageUrl => Some(&mut form.image_url),
        FormField::Description => Some(&mut form.description),
        FormField::Quantity => Some(&mut form.quantity),
        FormField::Price => Some(&mut form.price),
        FormField::Submit => None,
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub client: InventoryClient,

    // UI State
    pub state: AppState,
    pub focus: Focus,

    // Auth form state
    pub auth_username: String,
    pub auth_password: String,
    pub auth_focus: AuthField,

    // Add-product form state
    pub product_form: ProductForm,
    pub form_focus: FormField,

    // Product list state
    pub product_selection: usize,
    pub editing_quantity: bool,
    /// Edited quantity text per product id; cleared whenever the list reloads
    quantity_inputs: HashMap<String, String>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.api_base_url();
        debug!(%base_url, "API base URL resolved");

        let api = ApiClient::new(base_url)?;
        let auth_username = std::env::var(USERNAME_ENV).unwrap_or_default();

        Ok(Self::with_client(InventoryClient::new(api), auth_username))
    }

    pub fn with_client(client: InventoryClient, auth_username: String) -> Self {
        let auth_focus = if auth_username.is_empty() {
            AuthField::Username
        } else {
            AuthField::Password
        };

        Self {
            client,
            state: AppState::Normal,
            focus: Focus::Auth,
            auth_username,
            auth_password: String::new(),
            auth_focus,
            product_form: ProductForm::default(),
            form_focus: FormField::Name,
            product_selection: 0,
            editing_quantity: false,
            quantity_inputs: HashMap::new(),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(self.auth_username.clone(), self.auth_password.clone())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub async fn submit_register(&mut self) {
        let _ = self.client.register(&self.credentials()).await;
    }

    pub async fn submit_login(&mut self) {
        if self.client.login(&self.credentials()).await.is_ok() {
            info!(username = %self.auth_username, "Logged in from TUI");
            self.auth_password.clear();
            self.after_reload();
            self.focus = Focus::AddProduct;
        }
    }

    pub async fn submit_product(&mut self) {
        if self.client.add_product(&mut self.product_form).await.is_ok() {
            self.form_focus = FormField::Name;
            self.after_reload();
        }
    }

    pub async fn refresh_products(&mut self) {
        if self.client.load_products().await.is_ok() {
            self.after_reload();
        }
    }

    /// Submit the selected card's quantity control
    pub async fn submit_quantity(&mut self) {
        let Some(card) = self.selected_card().cloned() else {
            return;
        };
        let raw = self.quantity_input(&card).to_string();
        self.editing_quantity = false;
        if self.client.update_quantity(&card.id, &raw).await.is_ok() {
            self.after_reload();
        }
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self) {
        self.client.clear_expired_status();
    }

    /// Re-sync list state with a freshly rendered product list
    fn after_reload(&mut self) {
        self.quantity_inputs.clear();
        let count = self.client.view().cards().len();
        self.product_selection = self.product_selection.min(count.saturating_sub(1));
    }

    // =========================================================================
    // Product list
    // =========================================================================

    pub fn selected_card(&self) -> Option<&ProductCard> {
        self.client.view().cards().get(self.product_selection)
    }

    pub fn select_next(&mut self) {
        let count = self.client.view().cards().len();
        if count > 0 && self.product_selection + 1 < count {
            self.product_selection += 1;
            self.editing_quantity = false;
        }
    }

    pub fn select_prev(&mut self) {
        if self.product_selection > 0 {
            self.product_selection -= 1;
            self.editing_quantity = false;
        }
    }

    /// Current text of a card's quantity control
    pub fn quantity_input<'a>(&'a self, card: &'a ProductCard) -> &'a str {
        self.quantity_inputs
            .get(&card.id)
            .map(String::as_str)
            .unwrap_or(&card.quantity_input)
    }

    pub fn push_quantity_char(&mut self, c: char) {
        let Some(card) = self.selected_card().cloned() else {
            return;
        };
        let input = self
            .quantity_inputs
            .entry(card.id)
            .or_insert(card.quantity_input);
        if can_add_char(input.len(), MAX_QUANTITY_LENGTH, c) {
            input.push(c);
        }
    }

    pub fn pop_quantity_char(&mut self) {
        let Some(card) = self.selected_card().cloned() else {
            return;
        };
        self.quantity_inputs
            .entry(card.id)
            .or_insert(card.quantity_input)
            .pop();
    }

    /// Throw away edits to the selected card's quantity control
    pub fn cancel_quantity_edit(&mut self) {
        if let Some(id) = self.selected_card().map(|c| c.id.clone()) {
            self.quantity_inputs.remove(&id);
        }
        self.editing_quantity = false;
    }

    // =========================================================================
    // Form editing
    // =========================================================================

    pub fn push_auth_char(&mut self, c: char) {
        match self.auth_focus {
            AuthField::Username => {
                if can_add_char(self.auth_username.len(), MAX_USERNAME_LENGTH, c) {
                    self.auth_username.push(c);
                }
            }
            AuthField::Password => {
                if can_add_char(self.auth_password.len(), MAX_PASSWORD_LENGTH, c) {
                    self.auth_password.push(c);
                }
            }
            AuthField::Login | AuthField::Register => {}
        }
    }

    pub fn pop_auth_char(&mut self) {
        match self.auth_focus {
            AuthField::Username => {
                self.auth_username.pop();
            }
            AuthField::Password => {
                self.auth_password.pop();
            }
            AuthField::Login | AuthField::Register => {}
        }
    }

    pub fn push_form_char(&mut self, c: char) {
        if let Some(value) = form_value_mut(&mut self.product_form, self.form_focus) {
            if can_add_char(value.len(), MAX_FIELD_LENGTH, c) {
                value.push(c);
            }
        }
    }

    pub fn pop_form_char(&mut self) {
        if let Some(value) = form_value_mut(&mut self.product_form, self.form_focus) {
            value.pop();
        }
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character should be accepted into a field of `max_len`
pub fn can_add_char(current_len: usize, max_len: usize, c: char) -> bool {
    current_len < max_len && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
