pub mod amortization;
pub mod config;
pub mod irr;
pub mod revenue;
pub mod simulate;
pub mod statements;
