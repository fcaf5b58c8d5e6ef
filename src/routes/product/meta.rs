use crate::helpers::JsonResponse;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "List categories.", skip(store))]
#[get("/categories")]
pub async fn categories_handler(store: web::Data<Arc<dyn ProductStore>>) -> Result<impl Responder> {
    let categories = catalog::categories(store.get_ref().as_ref()).await?;

    Ok(JsonResponse::build()
        .set_item(categories)
        .ok("Categories retrieved successfully"))
}

#[tracing::instrument(name = "List brands.", skip(store))]
#[get("/brands")]
pub async fn brands_handler(store: web::Data<Arc<dyn ProductStore>>) -> Result<impl Responder> {
    let brands = catalog::brands(store.get_ref().as_ref()).await?;

    Ok(JsonResponse::build()
        .set_item(brands)
        .ok("Brands retrieved successfully"))
}
