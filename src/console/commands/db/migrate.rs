use crate::configuration::get_configuration;
use crate::console::commands::connect;
use actix_web::rt;

pub struct MigrateCommand {}

impl MigrateCommand {
    pub fn new() -> Self {
        Self {}
    }
}

impl crate::console::commands::CallableTrait for MigrateCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let settings = get_configuration()?;
            let store = connect(&settings.database).await?;

            sqlx::migrate!("./migrations").run(store.pool()).await?;
            tracing::info!(db_name = %settings.database.database_name, "Migrations applied");
            println!("migrations applied to {}", settings.database.database_name);

            Ok(())
        })
    }
}
