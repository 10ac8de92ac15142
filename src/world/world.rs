use crate::alien::Alien;
use crate::direction::Direction;
use crate::error::{InvasionError, Result};
use crate::id::{AlienId, CityId};
use crate::simulation::{SimulationEngine, SimulationReport};
use crate::world::city::City;
use slotmap::SlotMap;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// World X: every surviving city and every alien still alive.
///
/// Cities and aliens live in arenas addressed by generation-checked handles;
/// they only ever refer to each other through those handles, so destroying
/// one invalidates every outstanding reference to it instead of dangling.
#[derive(Clone, Debug, Default)]
pub struct World {
    cities: SlotMap<CityId, City>,
    aliens: SlotMap<AlienId, Alien>,
    city_names: HashMap<String, CityId>,
    alien_names: HashMap<String, AlienId>,
    next_alien: usize,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the city called `name`, creating an unconnected one if needed
    pub fn create_city(&mut self, name: &str) -> CityId {
        if let Some(&id) = self.city_names.get(name) {
            return id;
        }
        let id = self.cities.insert(City::new(name));
        self.city_names.insert(name.to_string(), id);
        id
    }

    /// Connect `from` to `to` in `direction`, and `to` back to `from` in the
    /// opposite direction.
    ///
    /// Any link that either slot held before is severed on both ends, so the
    /// graph stays symmetric. Aliens standing in either city are no longer
    /// trapped afterwards.
    pub fn add_connection(&mut self, from: CityId, to: CityId, direction: Direction) -> Result<()> {
        if !self.cities.contains_key(from) {
            return Err(InvasionError::UnknownCity(from));
        }
        if !self.cities.contains_key(to) {
            return Err(InvasionError::UnknownCity(to));
        }

        let back = direction.opposite();
        if let Some(stale) = self.cities[from].neighbor(direction).filter(|&c| c != to) {
            self.sever(stale, back, from);
        }
        if let Some(stale) = self.cities[to].neighbor(back).filter(|&c| c != from) {
            self.sever(stale, direction, to);
        }

        self.cities[from].set_neighbor(direction, Some(to));
        self.cities[to].set_neighbor(back, Some(from));

        self.release_resident(from);
        self.release_resident(to);
        Ok(())
    }

    /// Place `count` new aliens, each in a different random empty city.
    ///
    /// Aliens are named by their placement index, counting from zero for the
    /// first alien this world ever placed. Fails without touching the world
    /// if `count` is zero or the cities cannot hold every alien.
    pub fn generate_aliens(
        &mut self,
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Vec<AlienId>> {
        if count == 0 {
            return Err(InvasionError::NoAliensRequested { requested: count });
        }

        let mut empty: Vec<CityId> = self
            .cities
            .iter()
            .filter_map(|(id, city)| city.resident().is_none().then_some(id))
            .collect();

        let existing = self.aliens.len();
        if existing.saturating_add(count) > self.cities.len() || count > empty.len() {
            return Err(InvasionError::TooManyAliens {
                requested: count,
                existing,
                cities: self.cities.len(),
            });
        }

        let placed = (0..count)
            .map(|_| {
                let city = empty.swap_remove(rng.usize(..empty.len()));
                self.place_alien(city)
            })
            .collect();
        Ok(placed)
    }

    /// Run the default simulation (10 000 iterations, events enabled)
    pub fn run_simulation<W: Write>(
        &mut self,
        rng: &mut fastrand::Rng,
        out: &mut W,
    ) -> Result<SimulationReport> {
        SimulationEngine::default().run_simulation(self, rng, out)
    }

    /// Pick a uniformly random connected neighbor; `None` if `city` is isolated
    #[inline]
    pub fn choose_next_city(&self, city: CityId, rng: &mut fastrand::Rng) -> Option<CityId> {
        let node = self.cities.get(city)?;

        let mut opts = [city; 4];
        let mut k = 0usize;
        for (_, neighbor) in node.neighbors() {
            if self.cities.contains_key(neighbor) {
                opts[k] = neighbor;
                k += 1;
            }
        }

        (k > 0).then(|| opts[rng.usize(..k)])
    }

    #[inline]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    #[inline]
    pub fn alien(&self, id: AlienId) -> Option<&Alien> {
        self.aliens.get(id)
    }

    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.city_names.get(name).copied()
    }

    pub fn alien_id(&self, name: &str) -> Option<AlienId> {
        self.alien_names.get(name).copied()
    }

    pub fn city_by_name(&self, name: &str) -> Option<&City> {
        self.city_id(name).and_then(|id| self.city(id))
    }

    pub fn alien_by_name(&self, name: &str) -> Option<&Alien> {
        self.alien_id(name).and_then(|id| self.alien(id))
    }

    /// Get the name of a city by handle
    pub fn city_name(&self, id: CityId) -> Option<&str> {
        self.cities.get(id).map(City::name)
    }

    /// Count surviving cities
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Count living aliens
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    pub fn cities(&self) -> impl Iterator<Item = (CityId, &City)> {
        self.cities.iter()
    }

    pub fn aliens(&self) -> impl Iterator<Item = (AlienId, &Alien)> {
        self.aliens.iter()
    }

    /// Snapshot of living alien handles, for iterating while mutating
    pub fn alien_ids(&self) -> Vec<AlienId> {
        self.aliens.keys().collect()
    }

    /// Whether any living alien can still move
    pub fn has_mobile_aliens(&self) -> bool {
        self.aliens.values().any(|a| !a.is_trapped())
    }

    /// Check graph symmetry, alien/city mutual references and name registries
    pub fn is_consistent(&self) -> bool {
        let symmetric = self.cities.iter().all(|(id, city)| {
            city.neighbors().all(|(d, n)| {
                self.cities
                    .get(n)
                    .is_some_and(|nb| nb.neighbor(d.opposite()) == Some(id))
            })
        });
        let located = self.aliens.iter().all(|(id, alien)| {
            alien
                .location()
                .and_then(|c| self.cities.get(c))
                .is_some_and(|c| c.resident() == Some(id))
        });
        let housed = self.cities.iter().all(|(id, city)| {
            city.resident().map_or(true, |a| {
                self.aliens.get(a).is_some_and(|al| al.location() == Some(id))
            })
        });
        let named = self.city_names.len() == self.cities.len()
            && self.alien_names.len() == self.aliens.len();

        symmetric && located && housed && named
    }

    /// Write the remaining world in the same format as the input map
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut line = String::with_capacity(128);
        for city in self.cities.values() {
            self.city_line(city, &mut line);
            out.write_all(line.as_bytes()).map_err(InvasionError::Output)?;
        }
        Ok(())
    }

    fn city_line(&self, city: &City, line: &mut String) {
        line.clear();
        line.push_str(city.name());
        for (direction, neighbor) in city.neighbors() {
            if let Some(neighbor) = self.cities.get(neighbor) {
                line.push(' ');
                line.push_str(direction.as_str());
                line.push('=');
                line.push_str(neighbor.name());
            }
        }
        line.push('\n');
    }

    /// Mark an alien as unable to move
    pub(crate) fn trap_alien(&mut self, id: AlienId) {
        if let Some(alien) = self.aliens.get_mut(id) {
            alien.set_trapped(true);
            debug!(alien = alien.name(), "alien trapped");
        }
    }

    /// Walk an alien into the empty city `to`; returns whether it got trapped there
    pub(crate) fn relocate_alien(&mut self, id: AlienId, to: CityId) -> bool {
        let isolated = match self.cities.get(to) {
            Some(city) => city.is_isolated(),
            None => return false,
        };
        let Some(alien) = self.aliens.get_mut(id) else {
            return false;
        };

        let from = alien.location();
        alien.move_to(to);
        if isolated {
            alien.set_trapped(true);
        }

        if let Some(old) = from.and_then(|c| self.cities.get_mut(c)) {
            old.set_resident(None);
        }
        self.cities[to].set_resident(Some(id));
        isolated
    }

    /// Remove an alien, vacating the city it stood in
    pub(crate) fn remove_alien(&mut self, id: AlienId) -> Option<Alien> {
        let mut alien = self.aliens.remove(id)?;
        if let Some(city) = alien.location().and_then(|c| self.cities.get_mut(c)) {
            if city.resident() == Some(id) {
                city.set_resident(None);
            }
        }
        alien.clear_location();
        self.alien_names.remove(alien.name());
        Some(alien)
    }

    /// Remove a city and cut every road leading into it
    pub(crate) fn destroy_city(&mut self, id: CityId) -> Option<City> {
        let city = self.cities.remove(id)?;
        for (direction, neighbor) in city.neighbors() {
            if let Some(neighbor) = self.cities.get_mut(neighbor) {
                if neighbor.neighbor(direction.opposite()) == Some(id) {
                    neighbor.set_neighbor(direction.opposite(), None);
                }
            }
        }
        if let Some(alien) = city.resident().and_then(|a| self.aliens.get_mut(a)) {
            alien.clear_location();
        }
        self.city_names.remove(city.name());
        Some(city)
    }

    fn place_alien(&mut self, city: CityId) -> AlienId {
        let name = self.next_alien.to_string();
        self.next_alien += 1;

        let trapped = self.cities[city].is_isolated();
        let id = self.aliens.insert(Alien::new(name.clone(), city, trapped));
        self.cities[city].set_resident(Some(id));
        if trapped {
            debug!(
                alien = %name,
                city = self.cities[city].name(),
                "alien placed in an isolated city"
            );
        }
        self.alien_names.insert(name, id);
        id
    }

    /// Clear `city`'s link in `direction` if it still points at `expected`
    fn sever(&mut self, city: CityId, direction: Direction, expected: CityId) {
        if let Some(node) = self.cities.get_mut(city) {
            if node.neighbor(direction) == Some(expected) {
                warn!(
                    city = node.name(),
                    %direction,
                    "connection replaced by a conflicting map entry"
                );
                node.set_neighbor(direction, None);
            }
        }
    }

    fn release_resident(&mut self, city: CityId) {
        if let Some(alien) = self.cities[city].resident().and_then(|a| self.aliens.get_mut(a)) {
            alien.set_trapped(false);
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(128);
        for city in self.cities.values() {
            self.city_line(city, &mut line);
            f.write_str(&line)?;
        }
        Ok(())
    }
}
