pub mod collision;
pub mod engine;

pub use collision::{resolve_fight, Destruction};
pub use engine::{SimulationConfig, SimulationEngine, SimulationReport, DEFAULT_MAX_ITERATIONS};
