//! Integration tests for the Pelussi gallery.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pelussi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round trips through file-backed storage
//! - `catalog_session` - Catalog loading, filtering and cart flow through a session
//!
//! This module holds shared fixtures: a small gallery catalog in the
//! document-store record shape.

use serde_json::{Value, json};

/// Raw catalog records covering every category and translation case.
#[must_use]
pub fn gallery_records() -> Vec<Value> {
    vec![
        json!({
            "id": "harbor-at-dawn",
            "price": 120,
            "category": "paintings",
            "available": true,
            "images": ["https://cdn.pelussi.com/harbor.jpg"],
            "translations": {
                "fr": { "title": "Port à l'aube", "description": "Huile sur toile", "tags": ["marine"] },
                "en": { "title": "Harbor at dawn", "description": "Oil on canvas", "tags": ["seascape"] }
            },
            "dimensions": "60x80 cm",
            "medium": "Oil",
            "createdAt": "2024-04-12T09:00:00Z"
        }),
        json!({
            "id": "silver-leaf-ring",
            "price": 80,
            "category": "jewelry",
            "available": true,
            "translations": {
                "en": { "title": "Silver leaf ring", "tags": ["silver"] }
            },
            "createdAt": "2024-05-02T14:00:00Z"
        }),
        json!({
            "id": "night-garden",
            "price": "45.50",
            "category": "digital",
            "available": false,
            "translations": {},
            "createdAt": "2024-06-20T18:30:00Z"
        }),
        json!({
            "id": "olive-grove",
            "price": 210,
            "category": "paintings",
            "available": true,
            "translations": {
                "de": { "title": "Olivenhain" },
                "en": { "title": "Olive grove" }
            },
            "createdAt": "2024-07-01T10:00:00Z"
        }),
        json!({
            "id": "lyon-rooftops",
            "price": 35,
            "category": "prints",
            "available": true,
            "translations": {
                "fr": { "title": "Toits de Lyon" }
            },
            "createdAt": "2024-08-15T08:00:00Z"
        }),
    ]
}

/// Records that must be rejected at the catalog boundary.
#[must_use]
pub fn invalid_records() -> Vec<Value> {
    vec![
        json!({ "id": "no-price", "category": "prints", "available": true, "createdAt": "2024-01-01T00:00:00Z" }),
        json!({ "id": "harbor-at-dawn", "price": 1, "category": "prints", "available": true, "createdAt": "2024-01-01T00:00:00Z" }),
    ]
}
