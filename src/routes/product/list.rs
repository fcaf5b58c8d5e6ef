use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "List products.", skip(store))]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::ListQuery>,
    store: web::Data<Arc<dyn ProductStore>>,
) -> Result<impl Responder> {
    let page = catalog::list_products(store.get_ref().as_ref(), &query).await?;

    Ok(JsonResponse::build()
        .set_item(page)
        .ok("Products retrieved successfully"))
}
