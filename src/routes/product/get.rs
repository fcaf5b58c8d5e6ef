use crate::helpers::JsonResponse;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Get product.", skip(store))]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(String,)>,
    store: web::Data<Arc<dyn ProductStore>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let product = catalog::get_product(store.get_ref().as_ref(), &id).await?;

    Ok(JsonResponse::build()
        .set_item(product)
        .ok("Product retrieved successfully"))
}
