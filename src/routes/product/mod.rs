mod add;
mod delete;
mod get;
mod list;
mod meta;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use list::*;
pub use meta::*;
pub use update::*;

use actix_web::{web, Scope};

/// `/products` routes. The fixed segments go before `/{id}`.
pub fn scope() -> Scope {
    web::scope("/products")
        .service(categories_handler)
        .service(brands_handler)
        .service(list_handler)
        .service(add_handler)
        .service(item_handler)
        .service(update_handler)
        .service(delete_handler)
}
