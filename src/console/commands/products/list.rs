use crate::configuration::get_configuration;
use crate::console::commands::connect;
use crate::services::query::{Paging, ProductFilter};
use crate::store::ProductStore;
use actix_web::rt;

const BATCH: u32 = 100;

pub struct ListCommand {}

impl ListCommand {
    pub fn new() -> Self {
        Self {}
    }
}

impl crate::console::commands::CallableTrait for ListCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let settings = get_configuration()?;
            let store = connect(&settings.database).await?;
            let filter = ProductFilter::default();

            let total = store.count(&filter).await?;
            let mut paging = Paging {
                page: 1,
                limit: BATCH,
            };
            loop {
                let records = store.list(&filter, paging.window()).await?;
                if records.is_empty() {
                    break;
                }
                for record in &records {
                    let product = &record.product;
                    println!(
                        "{}\t{}\t{}\t{:.2}\t{}",
                        product.id, product.name, product.category, product.price, product.stock
                    );
                }
                paging.page += 1;
            }
            println!("{} products", total);

            Ok(())
        })
    }
}
