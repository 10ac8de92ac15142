pub mod city;
pub mod parser;
pub mod world;

pub use city::City;
pub use parser::{
    parse_world_file, parse_world_from_str, read_world_map, ParseReport, SkipReason, SkippedToken,
};
pub use world::World;
