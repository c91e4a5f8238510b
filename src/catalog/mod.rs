pub mod repository;
pub mod json_catalog;

pub use repository::*;
pub use json_catalog::*;
