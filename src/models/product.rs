use crate::models::{Creator, NewImage, ProductImage};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String, // upper-cased Category
    pub brand: Option<String>,
    pub stock: i32,
    pub creator_id: Option<String>, // weak reference, SET NULL when the user goes away
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A product together with its images (in stored order) and its creator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub creator: Option<Creator>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub brand: Option<String>,
    pub stock: i32,
    pub creator_id: Option<String>,
    pub images: Vec<NewImage>,
}

impl NewProduct {
    pub fn into_product(self, id: Uuid, now: DateTime<Utc>) -> (Product, Vec<NewImage>) {
        let product = Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            brand: self.brand,
            stock: self.stock,
            creator_id: self.creator_id,
            created_at: now,
            updated_at: now,
        };
        (product, self.images)
    }
}

/// Validated partial update. `None` leaves the column untouched.
///
/// `brand` is doubly optional: `Some(None)` clears the brand.
/// `images`, when present, replaces the whole image set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<Option<String>>,
    pub stock: Option<i32>,
    pub images: Option<Vec<NewImage>>,
}

impl ProductChanges {
    /// Applies scalar changes in place. Images are handled by the store.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(brand) = &self.brand {
            product.brand = brand.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}
