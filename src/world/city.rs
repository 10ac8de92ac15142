use crate::direction::Direction;
use crate::id::{AlienId, CityId};

/// Graph node: a named city with one neighbor slot per direction
#[derive(Clone, Debug)]
pub struct City {
    name: String,
    neighbors: [Option<CityId>; 4], // indexed by Direction::index()
    resident: Option<AlienId>,
}

impl City {
    /// Create a new city with no connections and nobody in it
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            neighbors: [None; 4],
            resident: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get neighbor in a specific direction
    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Option<CityId> {
        self.neighbors[direction.index()]
    }

    /// Occupied neighbor slots, in direction order
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CityId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|id| (d, id)))
    }

    /// Alien currently standing in this city, if any
    #[inline]
    pub fn resident(&self) -> Option<AlienId> {
        self.resident
    }

    /// A city with no connections at all
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.neighbors.iter().all(Option::is_none)
    }

    #[inline]
    pub fn connection_count(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }

    /// Set or clear neighbor in a specific direction
    #[inline]
    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: Option<CityId>) {
        self.neighbors[direction.index()] = neighbor;
    }

    #[inline]
    pub(crate) fn set_resident(&mut self, resident: Option<AlienId>) {
        self.resident = resident;
    }
}
