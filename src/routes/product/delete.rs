use crate::helpers::JsonResponse;
use crate::models;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Delete product.", skip(store))]
#[delete("/{id}")]
pub async fn delete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(String,)>,
    store: web::Data<Arc<dyn ProductStore>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    catalog::delete_product(store.get_ref().as_ref(), &id).await?;

    Ok(JsonResponse::<()>::build().ok("Product deleted successfully"))
}
