use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
    pub alt: String,
    pub position: i32, // 0 is the primary display image
    pub created_at: DateTime<Utc>,
}

/// Image to be attached to a product, `alt` not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub url: String,
    pub alt: Option<String>,
}

impl NewImage {
    pub fn resolve_alt(&self, product_name: &str) -> String {
        match &self.alt {
            Some(alt) if !alt.trim().is_empty() => alt.clone(),
            _ => default_alt(product_name),
        }
    }
}

pub fn default_alt(product_name: &str) -> String {
    format!("{} image", product_name)
}
