//! Catalog routes backing the products page.

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;

use axum::extract::Query;
use axum::response::Json;
use client::catalog::{self, ALL_CATEGORIES, CATEGORIES, Category, PRODUCTS, Product};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    category: Option<String>,
}

/// `GET /api/products?category=<id>`: catalog filtered by category.
/// A missing category means all products.
pub async fn list_products(Query(params): Query<ProductsQuery>) -> Json<Vec<Product>> {
    let category = params.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let products = catalog::filter_by_category(&PRODUCTS, category)
        .into_iter()
        .copied()
        .collect();
    Json(products)
}

/// `GET /api/categories`: filter choices in display order.
pub async fn list_categories() -> Json<&'static [Category]> {
    Json(&CATEGORIES)
}
