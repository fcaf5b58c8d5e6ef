//! Catalog operations on top of an injected [`ProductStore`].

use crate::errors::CatalogError;
use crate::forms::{ListQuery, ProductForm, ProductUpdateForm};
use crate::models::User;
use crate::services::query;
use crate::store::ProductStore;
use crate::views::product::{Detail, Page, Summary};
use uuid::Uuid;

/// Filtered, paginated and shaped product list.
pub async fn list_products(store: &dyn ProductStore, params: &ListQuery) -> Result<Page, CatalogError> {
    let (filter, paging) = query::build(params);
    tracing::debug!(?filter, ?paging, "Listing products");

    // both sides see the same filter value; no snapshot coupling between them
    let (total, records) = futures::try_join!(
        store.count(&filter),
        store.list(&filter, paging.window())
    )?;

    Ok(Page::new(records, paging, total))
}

pub async fn get_product(store: &dyn ProductStore, id: &str) -> Result<Detail, CatalogError> {
    let id = parse_id(id)?;
    store
        .fetch(id)
        .await?
        .map(Detail::from)
        .ok_or_else(CatalogError::product_not_found)
}

pub async fn create_product(
    store: &dyn ProductStore,
    creator: &User,
    form: ProductForm,
) -> Result<Summary, CatalogError> {
    let new_product = form.into_new_product(Some(creator.id.clone()))?;

    store.save_user(creator).await?;
    let record = store.insert(new_product).await?;
    tracing::info!(product_id = %record.product.id, "Product created");

    Ok(record.into())
}

pub async fn update_product(
    store: &dyn ProductStore,
    id: &str,
    form: ProductUpdateForm,
) -> Result<Summary, CatalogError> {
    let id = parse_id(id)?;
    let changes = form.into_changes()?;

    store
        .update(id, changes)
        .await?
        .map(Summary::from)
        .ok_or_else(CatalogError::product_not_found)
}

pub async fn delete_product(store: &dyn ProductStore, id: &str) -> Result<(), CatalogError> {
    let id = parse_id(id)?;
    match store.delete(id).await? {
        true => {
            tracing::info!(product_id = %id, "Product deleted");
            Ok(())
        }
        false => Err(CatalogError::product_not_found()),
    }
}

pub async fn categories(store: &dyn ProductStore) -> Result<Vec<String>, CatalogError> {
    Ok(store.categories().await?)
}

pub async fn brands(store: &dyn ProductStore) -> Result<Vec<String>, CatalogError> {
    Ok(store.brands().await?)
}

// an id that cannot exist is simply not found
fn parse_id(id: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(id.trim()).map_err(|_| CatalogError::product_not_found())
}
