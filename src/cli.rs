use crate::simulation::{SimulationConfig, DEFAULT_MAX_ITERATIONS};
use clap::Parser;
use std::path::PathBuf;

/// Number of aliens when none is given
pub const DEFAULT_ALIENS: usize = 10;

/// Map read when no file is given
pub const DEFAULT_MAP: &str = "maps/world_map";

/// CLI arguments for the invasion simulation
#[derive(Parser, Debug)]
#[command(
    name = "invasion",
    about = "👽 Reads the map of World X, simulates an alien invasion \
             and prints what is left of the world"
)]
pub struct Args {
    /// Number of alien invaders
    #[arg(value_name = "N", default_value_t = DEFAULT_ALIENS)]
    pub aliens: usize,

    /// File with the description of the world map
    #[arg(value_name = "FILE", default_value = DEFAULT_MAP)]
    pub map: PathBuf,

    /// Write destruction events and the final world here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Maximum moves per alien
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: u32,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress destruction events
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,
}

impl Args {
    /// Engine configuration selected on the command line
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            max_iterations: self.max_iterations,
            emit_events: !self.suppress_events,
        }
    }
}
