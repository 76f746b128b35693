pub mod defaults;
pub mod merge;
pub mod model;
pub mod validation;

pub use merge::ConfigOverlay;
pub use model::{Charges, FinancingAssumptions, ModelConfig, TaxAssumptions};
pub use validation::validate_config;
