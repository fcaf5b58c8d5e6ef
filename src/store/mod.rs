//! Product store seam.
//!
//! Routes and services depend on [`ProductStore`] only, injected as
//! `web::Data<Arc<dyn ProductStore>>`. [`PgProductStore`] backs production,
//! [`MemoryProductStore`] backs tests and local runs without a database.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use crate::models::{NewProduct, ProductChanges, ProductImage, ProductRecord, User};
use crate::services::query::{ProductFilter, Window};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of products matching `filter`, ignoring any window.
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError>;

    /// One window of matching products, newest first, with images and creator.
    async fn list(
        &self,
        filter: &ProductFilter,
        window: Window,
    ) -> Result<Vec<ProductRecord>, StoreError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<ProductRecord>, StoreError>;

    /// Creates the product and its images atomically.
    async fn insert(&self, product: NewProduct) -> Result<ProductRecord, StoreError>;

    /// Applies `changes` atomically; a present image list replaces the old set.
    /// `None` when the product does not exist.
    async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>, StoreError>;

    /// `false` when the product does not exist. Images go with it.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Removes every product (and so every image). Returns (products, images).
    async fn delete_all(&self) -> Result<(u64, u64), StoreError>;

    async fn images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, StoreError>;

    /// Distinct non-empty categories, ascending.
    async fn categories(&self) -> Result<Vec<String>, StoreError>;

    /// Distinct non-empty brands, ascending.
    async fn brands(&self) -> Result<Vec<String>, StoreError>;

    /// Inserts or refreshes a user so products can point at it.
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;
}
