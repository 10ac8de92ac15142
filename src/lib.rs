//! # Invasion
//!
//! A simulation of mad aliens invading World X.
//!
//! This library provides the world graph (cities joined by north/south/east/west
//! roads), the map parser that builds it, and the engine that moves aliens around
//! until they are trapped or destroy each other along with the city they meet in.

pub mod alien;
pub mod cli;
pub mod direction;
pub mod error;
pub mod id;
pub mod simulation;
pub mod world;

pub use alien::Alien;
pub use cli::Args;
pub use direction::Direction;
pub use error::{InvasionError, Result};
pub use id::{AlienId, CityId};
pub use simulation::{Destruction, SimulationConfig, SimulationEngine, SimulationReport};
pub use world::{City, ParseReport, World};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Alien, AlienId, Args, City, CityId, Direction, InvasionError, Result, SimulationConfig,
        SimulationEngine, SimulationReport, World,
    };
}
