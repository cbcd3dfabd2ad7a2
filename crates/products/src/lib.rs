//! Products and categories.
//!
//! Record types for the catalog screens, plus `ProductCatalog`, the
//! id-to-price lookup that sales and purchase orders price their lines from.

pub mod catalog;
pub mod category;
pub mod product;

pub use catalog::ProductCatalog;
pub use category::{Category, CategoryDraft};
pub use product::{PriceContext, Product, ProductDraft};
