//! Static product catalog and the category filter behind the products page.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

/// Sentinel category id that selects every product.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// Filter choices in display order. The first entry is the "all" sentinel.
pub const CATEGORIES: [Category; 5] = [
    Category { id: ALL_CATEGORIES, name: "All Products" },
    Category { id: "ai", name: "AI Solutions" },
    Category { id: "web", name: "Web Development" },
    Category { id: "mobile", name: "Mobile Apps" },
    Category { id: "consulting", name: "Consulting" },
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    /// One of the non-sentinel [`CATEGORIES`] ids.
    pub category: &'static str,
    pub description: &'static str,
    /// Whole US dollars.
    pub price: u32,
    /// Average review score out of 5.
    pub rating: f32,
    pub reviews: u32,
    pub image: &'static str,
    pub features: &'static [&'static str],
}

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/300/200";

pub const PRODUCTS: [Product; 6] = [
    Product {
        id: 1,
        name: "AI Chat Assistant",
        category: "ai",
        description: "Advanced conversational AI that understands context and provides intelligent responses.",
        price: 299,
        rating: 4.8,
        reviews: 124,
        image: PLACEHOLDER_IMAGE,
        features: &[
            "Natural Language Processing",
            "Multi-language Support",
            "24/7 Availability",
            "Customizable Responses",
        ],
    },
    Product {
        id: 2,
        name: "Smart Analytics Dashboard",
        category: "ai",
        description: "Real-time data visualization and predictive analytics for business intelligence.",
        price: 499,
        rating: 4.9,
        reviews: 89,
        image: PLACEHOLDER_IMAGE,
        features: &["Real-time Data", "Predictive Analytics", "Custom Reports", "API Integration"],
    },
    Product {
        id: 3,
        name: "E-commerce Platform",
        category: "web",
        description: "Complete online store solution with payment processing and inventory management.",
        price: 799,
        rating: 4.7,
        reviews: 156,
        image: PLACEHOLDER_IMAGE,
        features: &["Payment Processing", "Inventory Management", "Order Tracking", "Mobile Responsive"],
    },
    Product {
        id: 4,
        name: "Mobile App Development",
        category: "mobile",
        description: "Cross-platform mobile applications for iOS and Android with native performance.",
        price: 1299,
        rating: 4.9,
        reviews: 67,
        image: PLACEHOLDER_IMAGE,
        features: &["Cross-platform", "Native Performance", "Push Notifications", "Offline Support"],
    },
    Product {
        id: 5,
        name: "Digital Transformation Consulting",
        category: "consulting",
        description: "Strategic guidance for modernizing your business with cutting-edge technology.",
        price: 2500,
        rating: 5.0,
        reviews: 34,
        image: PLACEHOLDER_IMAGE,
        features: &["Strategy Planning", "Technology Assessment", "Implementation Support", "Training"],
    },
    Product {
        id: 6,
        name: "API Integration Service",
        category: "web",
        description: "Seamless integration of third-party services and APIs into your existing systems.",
        price: 399,
        rating: 4.6,
        reviews: 78,
        image: PLACEHOLDER_IMAGE,
        features: &["RESTful APIs", "Webhook Support", "Documentation", "Testing Suite"],
    },
];

/// Products visible under `category`, in catalog order.
///
/// [`ALL_CATEGORIES`] returns the whole list; an id nothing belongs to
/// returns an empty list.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.category == category).collect()
}

/// Display label for a category id.
#[must_use]
pub fn category_name(id: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.id == id).map(|c| c.name)
}
