//! API client for the inventory management REST API.
//!
//! This module provides the `ApiClient` struct with one method per endpoint.
//! Every method is a single request: there are no retries and no timeouts.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{Credentials, NewProduct, Product, QuantityUpdate, TokenResponse};

use super::ApiError;

/// API client for the inventory service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client sharing an existing connection pool
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a product's quantity endpoint, with the id escaped as one path segment
    fn quantity_url(&self, product_id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["products", product_id, "quantity"]);
        Ok(url)
    }

    /// Send a request, mapping transport failures to `ApiError::Network`
    async fn send(request: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, request = what, "Request failed to complete");
            ApiError::Network(e)
        })?;
        debug!(request = what, status = %response.status(), "Response received");
        Self::check_response(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    /// Create an account. Answers 409 when the username is taken.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/register")).json(credentials);
        Self::send(request, "register").await?;
        Ok(())
    }

    /// Exchange credentials for an access token.
    ///
    /// The login endpoint takes form fields rather than JSON.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let request = self.client.post(self.url("/login")).form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        let response = Self::send(request, "login").await?;
        let token: TokenResponse = Self::parse_json(response, "login response").await?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::InvalidResponse(
                "Login response has an empty access token".to_string(),
            ));
        }
        Ok(token)
    }

    pub async fn create_product(&self, token: &str, product: &NewProduct) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("/products"))
            .bearer_auth(token)
            .json(product);
        Self::send(request, "create product").await?;
        Ok(())
    }

    pub async fn list_products(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        let request = self.client.get(self.url("/products")).bearer_auth(token);
        let response = Self::send(request, "list products").await?;
        Self::parse_json(response, "product list").await
    }

    /// Set the on-hand quantity of one product
    pub async fn update_quantity(
        &self,
        token: &str,
        product_id: &str,
        update: &QuantityUpdate,
    ) -> Result<(), ApiError> {
        let url = self.quantity_url(product_id)?;
        let request = self.client.put(url).bearer_auth(token).json(update);
        Self::send(request, "update quantity").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("http://localhost:8080/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/products"), "http://localhost:8080/products");
    }

    #[test]
    fn test_quantity_url_escapes_product_id() {
        let client = ApiClient::new("http://localhost:8080").expect("client");
        let url = client.quantity_url("a/b?c#d").expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/products/a%2Fb%3Fc%23d/quantity"
        );

        let plain = client.quantity_url("42").expect("url");
        assert_eq!(plain.as_str(), "http://localhost:8080/products/42/quantity");
    }

    #[test]
    fn test_quantity_url_keeps_base_path() {
        let client = ApiClient::new("http://localhost:8080/api/").expect("client");
        let url = client.quantity_url("42").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/products/42/quantity");
    }

    #[test]
    fn test_quantity_url_rejects_unusable_base() {
        let client = ApiClient::new("not a url").expect("client");
        assert!(matches!(
            client.quantity_url("42"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
