use super::{ProductStore, StoreError};
use crate::db;
use crate::models::{NewProduct, ProductChanges, ProductImage, ProductRecord, User};
use crate::services::query::{ProductFilter, Window};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ProductStore for PgProductStore {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError> {
        Ok(db::product::count(&self.pool, filter).await?)
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        window: Window,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(db::product::fetch_page(&self.pool, filter, window).await?)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ProductRecord>, StoreError> {
        Ok(db::product::fetch(&self.pool, id).await?)
    }

    async fn insert(&self, product: NewProduct) -> Result<ProductRecord, StoreError> {
        Ok(db::product::insert(&self.pool, product).await?)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>, StoreError> {
        Ok(db::product::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(db::product::delete(&self.pool, id).await?)
    }

    async fn delete_all(&self) -> Result<(u64, u64), StoreError> {
        Ok(db::product::delete_all(&self.pool).await?)
    }

    async fn images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, StoreError> {
        Ok(db::image::fetch_by_product(&self.pool, product_id).await?)
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        Ok(db::product::distinct_categories(&self.pool).await?)
    }

    async fn brands(&self) -> Result<Vec<String>, StoreError> {
        Ok(db::product::distinct_brands(&self.pool).await?)
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        Ok(db::user::upsert(&self.pool, user).await?)
    }
}
