use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{put, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Update product.", skip(store))]
#[put("/{id}")]
pub async fn update_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(String,)>,
    form: web::Json<forms::ProductUpdateForm>,
    store: web::Data<Arc<dyn ProductStore>>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;
    let product = catalog::update_product(store.get_ref().as_ref(), &id, form.into_inner()).await?;
    tracing::info!(product_id = %id, user_id = %user.id, "Product updated");

    Ok(JsonResponse::build()
        .set_item(product)
        .ok("Product updated successfully"))
}
