//! Write operations for products

pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateProductError;
pub use delete::DeleteProductError;
pub use update::UpdateProductError;
