pub mod scenario;
pub mod simulation;
pub mod years;

pub use scenario::{project_scenario, ScenarioFactors, ScenarioResult};
pub use simulation::{run_simulation, scenario_revenue, SimulationOutput};
pub use years::{TerminalSale, YearProjection};
