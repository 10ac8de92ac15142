use crate::id::CityId;
use std::path::PathBuf;

/// Errors raised while building or invading a world
#[derive(Debug, thiserror::Error)]
pub enum InvasionError {
    /// Reading the world map failed
    #[error("IO error while reading world map: {0}")]
    Io(#[from] std::io::Error),

    /// Writing events or the rendered world failed
    #[error("IO error while writing simulation output: {0}")]
    Output(#[source] std::io::Error),

    /// The map path points at a directory
    #[error(
        "{}: is a directory, should be a file with the description of the world map",
        .0.display()
    )]
    MapIsDirectory(PathBuf),

    /// Invalid direction string
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    /// Alien generation was asked for zero aliens
    #[error("the number of aliens to be generated needs to be positive, got {requested}")]
    NoAliensRequested { requested: usize },

    /// More aliens requested than there are cities to hold them
    #[error(
        "cannot have more aliens in the world than cities: \
         {requested} requested + {existing} existing > {cities} cities"
    )]
    TooManyAliens {
        requested: usize,
        existing: usize,
        cities: usize,
    },

    /// A city handle that does not resolve in this world
    #[error("city {0:?} does not exist in this world")]
    UnknownCity(CityId),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, InvasionError>;
