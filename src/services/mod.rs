pub mod pricing;
pub mod cart_service;

pub use pricing::*;
pub use cart_service::*;
