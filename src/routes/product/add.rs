use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::catalog;
use crate::store::ProductStore;
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Add product.", skip(store))]
#[post("")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::ProductForm>,
    store: web::Data<Arc<dyn ProductStore>>,
) -> Result<impl Responder> {
    let product =
        catalog::create_product(store.get_ref().as_ref(), &user, form.into_inner()).await?;

    Ok(JsonResponse::build()
        .set_item(product)
        .created("Product created successfully"))
}
