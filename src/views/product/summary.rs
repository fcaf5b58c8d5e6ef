use super::{
    PLACEHOLDER_FEATURES, PLACEHOLDER_RATING, PLACEHOLDER_REVIEWS, PLACEHOLDER_TAGS,
    UNKNOWN_CREATOR,
};
use crate::models::ProductRecord;
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub stock: i32,
    pub tags: Vec<String>,
    pub created_by: String,
}

impl From<ProductRecord> for Summary {
    fn from(record: ProductRecord) -> Self {
        let in_stock = record.product.in_stock();
        let product = record.product;

        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            brand: product.brand.unwrap_or_default(),
            price: product.price,
            rating: PLACEHOLDER_RATING,
            reviews: PLACEHOLDER_REVIEWS,
            description: product.description,
            features: PLACEHOLDER_FEATURES.iter().map(|f| f.to_string()).collect(),
            images: record.images.into_iter().map(|image| image.url).collect(),
            in_stock,
            stock: product.stock,
            tags: PLACEHOLDER_TAGS.iter().map(|t| t.to_string()).collect(),
            created_by: record
                .creator
                .map(|creator| creator.name)
                .unwrap_or_else(|| UNKNOWN_CREATOR.to_string()),
        }
    }
}
