use crate::id::CityId;

/// A single invader: where it stands and whether it can still move
#[derive(Clone, Debug)]
pub struct Alien {
    name: String,
    location: Option<CityId>,
    trapped: bool,
    moves: u32,
}

impl Alien {
    /// Create a new alien standing in `location`
    pub fn new(name: impl Into<String>, location: CityId, trapped: bool) -> Self {
        Self {
            name: name.into(),
            location: Some(location),
            trapped,
            moves: 0,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// City the alien currently occupies; `None` once it has been destroyed
    #[inline]
    pub fn location(&self) -> Option<CityId> {
        self.location
    }

    /// Check if alien is trapped
    #[inline]
    pub fn is_trapped(&self) -> bool {
        self.trapped
    }

    /// Number of successful moves made so far
    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[inline]
    pub(crate) fn set_trapped(&mut self, trapped: bool) {
        self.trapped = trapped;
    }

    /// Move alien to new city and increment move counter
    pub(crate) fn move_to(&mut self, city: CityId) {
        self.location = Some(city);
        self.moves += 1;
    }

    pub(crate) fn clear_location(&mut self) {
        self.location = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn city_ids(n: usize) -> Vec<CityId> {
        let mut keys: SlotMap<CityId, ()> = SlotMap::with_key();
        (0..n).map(|_| keys.insert(())).collect()
    }

    #[test]
    fn test_alien_creation() {
        let ids = city_ids(1);
        let alien = Alien::new("42", ids[0], false);

        assert_eq!(alien.name(), "42");
        assert_eq!(alien.location(), Some(ids[0]));
        assert_eq!(alien.moves(), 0);
        assert!(!alien.is_trapped());
    }

    #[test]
    fn test_alien_movement() {
        let ids = city_ids(3);
        let mut alien = Alien::new("1", ids[0], false);

        alien.move_to(ids[1]);
        assert_eq!(alien.location(), Some(ids[1]));
        assert_eq!(alien.moves(), 1);

        alien.move_to(ids[2]);
        assert_eq!(alien.location(), Some(ids[2]));
        assert_eq!(alien.moves(), 2);
    }

    #[test]
    fn test_alien_state_management() {
        let ids = city_ids(1);
        let mut alien = Alien::new("7", ids[0], true);
        assert!(alien.is_trapped());

        alien.set_trapped(false);
        assert!(!alien.is_trapped());

        alien.clear_location();
        assert_eq!(alien.location(), None);
        assert_eq!(alien.moves(), 0);
    }
}
