use crate::configuration::get_configuration;
use crate::console::commands::connect;
use crate::models::User;
use crate::store::ProductStore;
use actix_web::rt;

/// Creates or refreshes a user row, e.g. to seed the first admin.
pub struct AddCommand {
    user: User,
}

impl AddCommand {
    pub fn new(id: String, name: String, email: String, role: String) -> Self {
        Self {
            user: User {
                id,
                name,
                email,
                role,
            },
        }
    }
}

impl crate::console::commands::CallableTrait for AddCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let settings = get_configuration()?;
            let store = connect(&settings.database).await?;

            store.save_user(&self.user).await?;
            println!(
                "user {} ({}) saved with role {}",
                self.user.id, self.user.email, self.user.role
            );

            Ok(())
        })
    }
}
