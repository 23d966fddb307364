//! Test fixtures shared across the workspace.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for the
//! test suites of dependent crates.

use crate::types::{LineItem, Order, Product, ProductId, Review, Timestamp};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Builds an order with the fields the dashboard reads.
pub fn order(city: Option<&str>, created_at: &str, items: &[(&str, u64)]) -> Order {
    Order {
        id: None,
        city: city.map(str::to_string),
        created_at: Some(Timestamp::Text(created_at.to_string())),
        products: items
            .iter()
            .map(|(id, quantity)| LineItem {
                id: ProductId::from(*id),
                quantity: *quantity,
                price: Some(10.0),
            })
            .collect(),
        ..Order::default()
    }
}

/// Builds a catalog product.
pub fn product(id: &str, title: &str) -> Product {
    Product {
        id: ProductId::from(id),
        title: title.to_string(),
        price: Some(10.0),
        in_stock: true,
        category: None,
        img: None,
        description: None,
    }
}

/// Builds a review.
pub fn review(product_name: &str, note: i64) -> Review {
    Review {
        id: None,
        product_name: product_name.to_string(),
        note: Some(note),
    }
}

/// The two-order scenario used throughout the docs: one order from Tunis in January,
/// one without a city in February, both for product `p1` ("Soap").
pub fn sample_orders() -> Vec<Order> {
    vec![
        order(Some("Tunis"), "2024-01-05", &[("p1", 2)]),
        order(None, "2024-02-10", &[("p1", 1)]),
    ]
}

/// Catalog matching [`sample_orders`].
pub fn sample_products() -> Vec<Product> {
    vec![product("p1", "Soap")]
}

/// A handful of reviews over two products, one with an out-of-range note.
pub fn sample_reviews() -> Vec<Review> {
    vec![
        review("Soap", 5),
        review("Soap", 4),
        review("Shampoo", 1),
        review("Soap", 0),
        review("Shampoo", 5),
    ]
}

/// Backend JSON bodies for the three collections, as served by the shop API.
pub mod payloads {
    /// `GET /orders`
    pub const ORDERS: &str = r#"[
        {"_id": "o1", "city": "Tunis", "createdAt": "2024-01-05T09:00:00.000Z",
         "products": [{"id": "p1", "quantity": 2, "price": 10}], "totalPrice": 20,
         "name": "Ben Ali", "prename": "Sami", "phone": "20123456", "adresse": "Rue 1", "notes": ""},
        {"_id": "o2", "city": null, "createdAt": "2024-02-10T17:45:00.000Z",
         "products": [{"id": "p1", "quantity": 1, "price": 10}], "totalPrice": 10}
    ]"#;

    /// `GET /products`
    pub const PRODUCTS: &str = r#"[
        {"_id": "p1", "title": "Soap", "price": 10, "inStock": true, "category": "hygiene",
         "img": "/uploads/soap.png", "description": "Olive oil soap"}
    ]"#;

    /// `GET /products/rates`
    pub const REVIEWS: &str = r#"[
        {"_id": "r1", "productName": "Soap", "note": 5},
        {"_id": "r2", "productName": "Soap", "note": 3}
    ]"#;
}
