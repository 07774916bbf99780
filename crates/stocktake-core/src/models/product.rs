use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Products with fewer units than this are flagged as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Image used when the add-product form leaves the URL blank
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// A product as returned by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Stock value of this product (price times units on hand)
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    pub image_url: String,
    pub description: String,
    pub quantity: i64,
    pub price: f64,
}

/// Body of `PUT /products/{id}/quantity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

impl QuantityUpdate {
    /// Parse the text of a quantity control. Only non-negative integers pass.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        match raw.trim().parse::<i64>() {
            Ok(quantity) if quantity >= 0 => Ok(Self { quantity }),
            _ => Err(ClientError::Validation(
                "Please enter a valid quantity".to_string(),
            )),
        }
    }
}

/// Raw text of the add-product form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub image_url: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
}

impl ProductForm {
    /// Validate required fields and apply defaults for the optional ones.
    ///
    /// Blank image URLs become the placeholder image. Blank or non-numeric
    /// quantity and price become 0.
    pub fn to_new_product(&self) -> Result<NewProduct, ClientError> {
        if self.name.trim().is_empty()
            || self.product_type.trim().is_empty()
            || self.sku.trim().is_empty()
        {
            return Err(ClientError::Validation(
                "Please fill in all required fields (Name, Type, SKU)".to_string(),
            ));
        }

        let quantity = parse_quantity_or_zero(&self.quantity);
        let price = parse_price_or_zero(&self.price);
        if quantity < 0 || price < 0.0 {
            return Err(ClientError::Validation(
                "Quantity and price cannot be negative".to_string(),
            ));
        }

        let image_url = if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else {
            self.image_url.trim().to_string()
        };

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            sku: self.sku.trim().to_string(),
            image_url,
            description: self.description.trim().to_string(),
            quantity,
            price,
        })
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Whole numbers parse directly; decimals are truncated toward zero.
fn parse_quantity_or_zero(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn parse_price_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            name: "Widget".to_string(),
            product_type: "Hardware".to_string(),
            sku: "WID-001".to_string(),
            image_url: String::new(),
            description: "A widget".to_string(),
            quantity: "12".to_string(),
            price: "3.50".to_string(),
        }
    }

    #[test]
    fn test_parse_product_from_api() {
        let json = r#"{"id":"65a1f0c2e4b0a1b2c3d4e5f6","name":"Widget","type":"Hardware","sku":"WID-001","image_url":"https://example.com/w.png","description":"","quantity":3,"price":9.99}"#;
        let product: Product = serde_json::from_str(json).expect("product json");
        assert_eq!(product.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(product.product_type, "Hardware");
        assert_eq!(product.quantity, 3);
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_parse_product_with_mongo_id_and_missing_optionals() {
        let json = r#"{"_id":"abc","name":"Bolt","type":"Parts","sku":"B-1"}"#;
        let product: Product = serde_json::from_str(json).expect("product json");
        assert_eq!(product.id, "abc");
        assert_eq!(product.description, "");
        assert_eq!(product.quantity, 0);
        assert_eq!(product.price, 0.0);
    }

    #[test]
    fn test_low_stock_boundary() {
        let mut product: Product =
            serde_json::from_str(r#"{"id":"1","name":"n","type":"t","sku":"s","quantity":5}"#)
                .expect("product json");
        assert!(!product.is_low_stock());
        product.quantity = 4;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_new_product_serializes_type_field() {
        let body = serde_json::to_value(filled_form().to_new_product().expect("valid form"))
            .expect("serialize");
        assert_eq!(body["type"], "Hardware");
        assert_eq!(body["quantity"], 12);
        assert_eq!(body["price"], 3.5);
        assert_eq!(body["image_url"], PLACEHOLDER_IMAGE_URL);
        assert!(body.get("product_type").is_none());
    }

    #[test]
    fn test_form_requires_name_type_and_sku() {
        for clear in [0, 1, 2] {
            let mut form = filled_form();
            match clear {
                0 => form.name = "  ".to_string(),
                1 => form.product_type.clear(),
                _ => form.sku.clear(),
            }
            assert!(matches!(
                form.to_new_product(),
                Err(ClientError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_form_defaults_quantity_and_price() {
        let mut form = filled_form();
        form.quantity = String::new();
        form.price = "abc".to_string();
        let product = form.to_new_product().expect("valid form");
        assert_eq!(product.quantity, 0);
        assert_eq!(product.price, 0.0);

        form.quantity = "7.9".to_string();
        form.image_url = "https://example.com/x.png".to_string();
        let product = form.to_new_product().expect("valid form");
        assert_eq!(product.quantity, 7);
        assert_eq!(product.image_url, "https://example.com/x.png");
    }

    #[test]
    fn test_form_rejects_negative_numbers() {
        let mut form = filled_form();
        form.quantity = "-1".to_string();
        assert!(form.to_new_product().is_err());

        let mut form = filled_form();
        form.price = "-0.01".to_string();
        assert!(form.to_new_product().is_err());
    }

    #[test]
    fn test_form_clear() {
        let mut form = filled_form();
        form.clear();
        assert_eq!(form, ProductForm::default());
    }

    #[test]
    fn test_quantity_update_parse() {
        assert_eq!(QuantityUpdate::parse("0").expect("zero").quantity, 0);
        assert_eq!(QuantityUpdate::parse(" 42 ").expect("padded").quantity, 42);
        for bad in ["", "-1", "abc", "3.5", "1e3"] {
            assert!(QuantityUpdate::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
