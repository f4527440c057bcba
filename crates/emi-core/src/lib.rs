pub mod amortization;
pub mod error;
pub mod split;
pub mod tenure;
pub mod types;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all emi-core operations
pub type EmiResult<T> = Result<T, EmiError>;
