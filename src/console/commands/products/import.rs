use crate::configuration::get_configuration;
use crate::console::commands::connect;
use crate::db;
use crate::forms::ProductForm;
use crate::models::NewProduct;
use actix_web::rt;
use anyhow::Context;
use std::path::PathBuf;

/// Bulk create from a JSON array of product bodies, the same shape `POST /products` takes.
///
/// Every entry is validated before anything is written, and the inserts share one
/// transaction, so either the whole file lands or none of it does.
pub struct ImportCommand {
    file: PathBuf,
    creator: String,
}

impl ImportCommand {
    pub fn new(file: PathBuf, creator: String) -> Self {
        Self { file, creator }
    }
}

fn parse(payload: &str, creator: &str) -> Result<Vec<NewProduct>, String> {
    let forms: Vec<ProductForm> =
        serde_json::from_str(payload).map_err(|err| format!("Invalid import file: {}", err))?;

    forms
        .into_iter()
        .enumerate()
        .map(|(index, form)| {
            form.into_new_product(Some(creator.to_string()))
                .map_err(|err| format!("entry {}: {}", index, err))
        })
        .collect()
}

impl ImportCommand {
    async fn import(&self, products: Vec<NewProduct>) -> Result<usize, Box<dyn std::error::Error>> {
        let settings = get_configuration()?;
        let store = connect(&settings.database).await?;

        if db::user::fetch(store.pool(), &self.creator).await?.is_none() {
            return Err(format!("Unknown user {}, run `user add` first", self.creator).into());
        }

        let ids = db::product::insert_many(store.pool(), &products).await?;
        for id in &ids {
            tracing::info!(product_id = %id, "Product imported");
        }

        Ok(ids.len())
    }
}

impl crate::console::commands::CallableTrait for ImportCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let payload = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let products = parse(&payload, &self.creator)?;

        let total = rt::System::new().block_on(self.import(products))?;
        println!("imported {} products", total);

        Ok(())
    }
}
