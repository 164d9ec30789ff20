//! Read operations for products

pub mod get;
pub mod list;

pub use get::GetProductError;
pub use list::ListProductsError;
