// Formforge - model-driven Java DTO generation and structural wellforming

// Common modules
pub mod config;
pub mod error;
pub mod log;
pub mod nls;

// Source model abstraction over Java compilation units
pub mod source_model;

// Versioned API definitions
pub mod api;

// Model parsers producing normalized generation models
pub mod model;

// Source generators
pub mod generate;

// Structured-type layout and wellforming
pub mod wellform;

// Batch operations over many model types
pub mod operation;

// Re-export commonly used items for convenience
pub use api::{ApiResolver, ApiVersion, ScoutApiSpec, scout_resolver};
pub use config::FormforgeConfig;
pub use error::{FormforgeError, Result};
pub use generate::{DtoGenerator, GeneratorContext, LineDelimiter};
pub use model::{DataObjectModel, DtoModel, FormDataAnnotationDescriptor};
pub use operation::{BatchReport, OperationSettings, update_dtos, wellform_types};
pub use source_model::JavaEnvironment;
pub use wellform::wellform;
