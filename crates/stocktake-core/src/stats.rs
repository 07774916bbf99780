//! Summary statistics over the product collection.

use crate::models::Product;
use crate::utils::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryStats {
    pub total_count: usize,
    pub total_value: f64,
    pub low_stock_count: usize,
}

impl InventoryStats {
    /// Total stock value as shown to the user, e.g. `$25.00`
    pub fn total_value_display(&self) -> String {
        format_currency(self.total_value)
    }
}

/// Count, total value (price x quantity) and number of low-stock products.
pub fn compute_stats(products: &[Product]) -> InventoryStats {
    InventoryStats {
        total_count: products.len(),
        total_value: products.iter().fold(0.0, |acc, p| acc + p.stock_value()),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            product_type: "General".to_string(),
            sku: format!("SKU-{id}"),
            image_url: String::new(),
            description: String::new(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_compute_stats() {
        let stats = compute_stats(&[product("a", 10.0, 2), product("b", 5.0, 1)]);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_value_display(), "$25.00");
        assert_eq!(stats.low_stock_count, 2);
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, InventoryStats::default());
        assert_eq!(stats.total_value_display(), "$0.00");
    }

    #[test]
    fn test_compute_stats_order_independent() {
        let mut products = vec![
            product("a", 1.25, 8),
            product("b", 99.99, 0),
            product("c", 4.0, 5),
        ];
        let forward = compute_stats(&products);
        products.reverse();
        let backward = compute_stats(&products);

        assert_eq!(forward.total_count, backward.total_count);
        assert_eq!(forward.low_stock_count, 1);
        assert_eq!(forward.total_value_display(), backward.total_value_display());
        assert_eq!(forward.total_value_display(), "$30.00");
    }
}
