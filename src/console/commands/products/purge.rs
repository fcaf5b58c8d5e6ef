use crate::configuration::get_configuration;
use crate::console::commands::connect;
use crate::store::ProductStore;
use actix_web::rt;

pub struct PurgeCommand {}

impl PurgeCommand {
    pub fn new() -> Self {
        Self {}
    }
}

impl crate::console::commands::CallableTrait for PurgeCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let settings = get_configuration()?;
            let store = connect(&settings.database).await?;

            let (products, images) = store.delete_all().await?;
            tracing::warn!(products, images, "Catalog purged");
            println!("deleted {} products and {} images", products, images);

            Ok(())
        })
    }
}
