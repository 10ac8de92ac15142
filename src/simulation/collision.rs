use crate::id::{AlienId, CityId};
use crate::world::World;
use std::fmt;
use tracing::debug;

/// A city lost to a fight between two aliens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destruction {
    pub city: String,
    /// The alien that walked in
    pub attacker: String,
    /// The alien that was already there
    pub defender: String,
}

impl fmt::Display for Destruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has been destroyed by alien {} and alien {}",
            self.city, self.attacker, self.defender
        )
    }
}

/// `attacker` walks into `city` where `defender` stands: both aliens die and
/// the city is wiped off the map along with every road into it.
///
/// Returns `None` (and changes nothing) if any of the three no longer exists.
pub fn resolve_fight(
    world: &mut World,
    city: CityId,
    attacker: AlienId,
    defender: AlienId,
) -> Option<Destruction> {
    let event = Destruction {
        city: world.city_name(city)?.to_string(),
        attacker: world.alien(attacker)?.name().to_string(),
        defender: world.alien(defender)?.name().to_string(),
    };

    world.remove_alien(attacker);
    world.remove_alien(defender);
    world.destroy_city(city);

    debug!(
        city = %event.city,
        attacker = %event.attacker,
        defender = %event.defender,
        "city destroyed"
    );
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::parse_world_from_str;

    #[test]
    fn test_destruction_message() {
        let event = Destruction {
            city: "Foo".to_string(),
            attacker: "3".to_string(),
            defender: "7".to_string(),
        };

        assert_eq!(
            event.to_string(),
            "Foo has been destroyed by alien 3 and alien 7"
        );
    }

    #[test]
    fn test_fight_removes_city_and_both_aliens() {
        let (mut world, _) = parse_world_from_str("A north=B\nB east=C\n").unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        world.generate_aliens(3, &mut rng).unwrap();

        let b = world.city_id("B").unwrap();
        let defender = world.city(b).unwrap().resident().unwrap();
        let a = world.city_id("A").unwrap();
        let attacker = world.city(a).unwrap().resident().unwrap();
        let attacker_name = world.alien(attacker).unwrap().name().to_string();
        let defender_name = world.alien(defender).unwrap().name().to_string();

        let event = resolve_fight(&mut world, b, attacker, defender).unwrap();

        assert_eq!(event.city, "B");
        assert_eq!(event.attacker, attacker_name);
        assert_eq!(event.defender, defender_name);
        assert_eq!(world.city_count(), 2);
        assert_eq!(world.alien_count(), 1);
        assert_eq!(world.city_id("B"), None);
        assert!(world.city(a).unwrap().is_isolated());
        assert_eq!(world.city(a).unwrap().resident(), None);
        assert!(world.city_by_name("C").unwrap().is_isolated());
        assert!(world.is_consistent());
    }

    #[test]
    fn test_fight_with_missing_alien_changes_nothing() {
        let (mut world, _) = parse_world_from_str("A north=B\n").unwrap();
        let mut rng = fastrand::Rng::with_seed(2);
        let ids = world.generate_aliens(2, &mut rng).unwrap();
        let a = world.city_id("A").unwrap();
        world.remove_alien(ids[1]);

        assert_eq!(resolve_fight(&mut world, a, ids[0], ids[1]), None);
        assert_eq!(world.city_count(), 2);
        assert_eq!(world.alien_count(), 1);
    }
}
