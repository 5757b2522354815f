pub mod error;
pub mod parse;
pub mod scenario;
pub mod strategies;
pub mod strategy;
pub mod tax;
pub mod time_value;
pub mod types;

pub use error::PropertyReturnsError;
pub use strategy::{analyse, compute, CalculationResult, Strategy, StrategyInputs};
pub use types::*;

/// Standard result type for all property-returns operations
pub type PropertyReturnsResult<T> = Result<T, PropertyReturnsError>;
