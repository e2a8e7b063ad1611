pub mod api;
pub mod catalog;
pub mod error;
pub mod input;
pub mod pricing;
pub mod types;

pub use error::PricingError;
pub use types::*;

/// Standard result type for all pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
