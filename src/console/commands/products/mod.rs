mod import;
mod list;
mod purge;

pub use import::*;
pub use list::*;
pub use purge::*;
