pub mod aggregation;
pub mod grid;
pub mod pricing;
