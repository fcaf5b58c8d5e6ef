pub(crate) mod json;
pub mod jwt;

pub use json::*;
