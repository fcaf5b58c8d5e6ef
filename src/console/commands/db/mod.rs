mod migrate;

pub use migrate::*;
