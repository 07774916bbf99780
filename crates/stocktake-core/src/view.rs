//! Pure transform from a product collection to what the product list shows.
//!
//! Front ends draw a `ProductListView`; nothing here touches a terminal.

use crate::models::Product;
use crate::utils::{format_currency, or_placeholder};

/// Shown instead of cards when the collection is empty
pub const EMPTY_STATE_MESSAGE: &str = "No products found. Add your first product above!";

/// Shown when a product has no description
pub const NO_DESCRIPTION: &str = "No description";

/// One product as displayed in the list
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub price: String,
    pub quantity: i64,
    pub low_stock: bool,
    pub description: String,
    /// Initial text of the card's quantity control
    pub quantity_input: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            product_type: product.product_type.clone(),
            sku: product.sku.clone(),
            price: format_currency(product.price),
            quantity: product.quantity,
            low_stock: product.is_low_stock(),
            description: or_placeholder(&product.description, NO_DESCRIPTION),
            quantity_input: product.quantity.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductListView {
    Empty { message: &'static str },
    Cards(Vec<ProductCard>),
}

impl Default for ProductListView {
    fn default() -> Self {
        render(&[])
    }
}

impl ProductListView {
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            ProductListView::Empty { .. } => &[],
            ProductListView::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ProductListView::Empty { .. })
    }
}

/// Render one card per product, in order, or the empty state.
pub fn render(products: &[Product]) -> ProductListView {
    if products.is_empty() {
        return ProductListView::Empty {
            message: EMPTY_STATE_MESSAGE,
        };
    }
    ProductListView::Cards(products.iter().map(ProductCard::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, quantity: i64, description: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {id}"),
            product_type: "Tools".to_string(),
            sku: format!("T-{id}"),
            image_url: String::new(),
            description: description.to_string(),
            quantity,
            price: 19.5,
        }
    }

    #[test]
    fn test_render_empty() {
        let view = render(&[]);
        assert_eq!(
            view,
            ProductListView::Empty {
                message: EMPTY_STATE_MESSAGE
            }
        );
        assert!(view.cards().is_empty());
        assert!(view.is_empty());
    }

    #[test]
    fn test_render_one_card_per_product() {
        let products = vec![product("1", 2, ""), product("2", 5, "Sharp"), product("3", 40, "  ")];
        let view = render(&products);
        let cards = view.cards();

        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards.iter().map(|c| c.quantity).collect::<Vec<_>>(),
            vec![2, 5, 40]
        );
        assert_eq!(
            cards.iter().map(|c| c.low_stock).collect::<Vec<_>>(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_card_fields() {
        let card = ProductCard::from(&product("9", 3, ""));
        assert_eq!(card.id, "9");
        assert_eq!(card.name, "Item 9");
        assert_eq!(card.sku, "T-9");
        assert_eq!(card.price, "$19.50");
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.quantity_input, "3");
    }
}
