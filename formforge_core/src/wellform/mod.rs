//! Structured-type layout: canonical member categories and the wellformer.

pub mod category;
pub mod wellformer;

pub use category::Category;
pub use wellformer::{StructuredType, wellform};
