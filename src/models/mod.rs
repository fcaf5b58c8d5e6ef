mod category;
mod image;
pub mod product;
pub mod user;

pub use category::*;
pub use image::*;
pub use product::*;
pub use user::*;
