pub mod config;
pub mod error;
pub mod financing;
pub mod projection;
pub mod revenue;
pub mod time_value;
pub mod types;

#[cfg(feature = "statements")]
pub mod statements;

pub use error::ColivingError;
pub use types::*;

/// Standard result type for all coliving model operations
pub type ColivingResult<T> = Result<T, ColivingError>;
