use crate::error::{InvasionError, Result};
use crate::id::AlienId;
use crate::simulation::collision::{resolve_fight, Destruction};
use crate::world::{City, World};
use colored::Colorize;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

/// Iterations an invasion lasts unless configured otherwise
pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;

/// Knobs for a simulation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of iterations; every mobile alien moves once per iteration
    pub max_iterations: u32,
    /// Write a line to the output for every destroyed city
    pub emit_events: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            emit_events: true,
        }
    }
}

/// Outcome of a simulation run
#[derive(Clone, Debug, Default)]
pub struct SimulationReport {
    /// Iterations actually executed
    pub iterations: u32,
    /// Destroyed cities, in the order they fell
    pub destructions: Vec<Destruction>,
    pub elapsed: Duration,
}

/// Drives the invasion: moves aliens, resolves fights, streams events
#[derive(Clone, Debug, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Create a new simulation engine
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the invasion for up to `max_iterations` iterations.
    ///
    /// Stops early once no alien can move: trapped aliens stay trapped and
    /// dead ones stay dead, so the remaining iterations would change nothing.
    pub fn run_simulation<W: Write>(
        &mut self,
        world: &mut World,
        rng: &mut fastrand::Rng,
        out: &mut W,
    ) -> Result<SimulationReport> {
        info!(
            aliens = world.alien_count(),
            cities = world.city_count(),
            max_iterations = self.config.max_iterations,
            "invasion started"
        );

        let sim_start = Instant::now();
        let mut report = SimulationReport::default();

        while report.iterations < self.config.max_iterations {
            if !world.has_mobile_aliens() {
                break;
            }
            self.step(world, rng, out, &mut report)?;
            report.iterations += 1;
        }

        report.elapsed = sim_start.elapsed();
        info!(
            iterations = report.iterations,
            destroyed = report.destructions.len(),
            surviving_cities = world.city_count(),
            surviving_aliens = world.alien_count(),
            "invasion finished"
        );
        Ok(report)
    }

    /// One iteration: every alien alive when it starts gets one move attempt
    pub fn step<W: Write>(
        &mut self,
        world: &mut World,
        rng: &mut fastrand::Rng,
        out: &mut W,
        report: &mut SimulationReport,
    ) -> Result<()> {
        for id in world.alien_ids() {
            self.move_alien(world, id, rng, out, report)?;
        }
        Ok(())
    }

    fn move_alien<W: Write>(
        &mut self,
        world: &mut World,
        id: AlienId,
        rng: &mut fastrand::Rng,
        out: &mut W,
        report: &mut SimulationReport,
    ) -> Result<()> {
        // Killed earlier in this iteration
        let Some(alien) = world.alien(id) else {
            return Ok(());
        };
        if alien.is_trapped() {
            return Ok(());
        }
        let Some(from) = alien.location() else {
            return Ok(());
        };

        let Some(to) = world.choose_next_city(from, rng) else {
            world.trap_alien(id);
            return Ok(());
        };
        // Road loops back into the same city
        if to == from {
            return Ok(());
        }

        match world.city(to).and_then(City::resident) {
            None => {
                world.relocate_alien(id, to);
            }
            Some(defender) => {
                if let Some(event) = resolve_fight(world, to, id, defender) {
                    self.log_destruction(out, &event)?;
                    report.destructions.push(event);
                }
            }
        }
        Ok(())
    }

    /// Stream a destruction event to the output
    #[inline]
    fn log_destruction<W: Write>(&self, out: &mut W, event: &Destruction) -> Result<()> {
        if !self.config.emit_events {
            return Ok(());
        }
        writeln!(out, "{event}").map_err(InvasionError::Output)
    }

    /// Print simulation summary to stderr
    pub fn print_summary(&self, world: &World, report: &SimulationReport, aliens: usize) {
        eprintln!(
            "\n{}\n{} {} {}\n{} {:.3} ms {} {} {} {} {}",
            "===".bright_blue().bold(),
            "👽 World X was invaded by".green().bold(),
            aliens.to_string().bright_red().bold(),
            "aliens.".green().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            report.elapsed.as_secs_f64() * 1000.0,
            "|".dimmed(),
            format!("iterations={}", report.iterations).cyan(),
            format!("destroyed={}", report.destructions.len()).cyan(),
            format!("survivors={}", world.city_count()).cyan(),
            format!("aliens_left={}", world.alien_count()).cyan(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::parse_world_from_str;

    fn world_from(src: &str) -> World {
        parse_world_from_str(src).unwrap().0
    }

    #[test]
    fn test_default_config() {
        let engine = SimulationEngine::default();

        assert_eq!(engine.config().max_iterations, 10_000);
        assert!(engine.config().emit_events);
    }

    #[test]
    fn test_neighbors_fight_on_first_move() {
        let mut world = world_from("0 north=1\n");
        let mut rng = fastrand::Rng::with_seed(42);
        world.generate_aliens(2, &mut rng).unwrap();

        let mut out = Vec::new();
        let report = world.run_simulation(&mut rng, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(report.destructions.len(), 1);
        assert_eq!(report.iterations, 1);
        assert!(
            [
                "0 has been destroyed by alien 0 and alien 1\n",
                "0 has been destroyed by alien 1 and alien 0\n",
                "1 has been destroyed by alien 0 and alien 1\n",
                "1 has been destroyed by alien 1 and alien 0\n",
            ]
            .contains(&text.as_str()),
            "unexpected output: {text:?}"
        );

        assert_eq!(world.alien_count(), 0);
        assert_eq!(world.city_count(), 1);
        let (_, survivor) = world.cities().next().unwrap();
        assert!(survivor.is_isolated());
        assert_eq!(survivor.resident(), None);
        assert!(world.is_consistent());
    }

    #[test]
    fn test_isolated_alien_stays_put() {
        let mut world = world_from("Alone\n");
        let mut rng = fastrand::Rng::with_seed(7);
        let id = world.generate_aliens(1, &mut rng).unwrap()[0];
        let start = world.alien(id).unwrap().location();

        let mut engine = SimulationEngine::new(SimulationConfig {
            max_iterations: 50,
            emit_events: true,
        });
        let mut out = Vec::new();
        let report = engine.run_simulation(&mut world, &mut rng, &mut out).unwrap();

        assert!(out.is_empty());
        assert!(report.destructions.is_empty());
        assert_eq!(world.alien_count(), 1);
        assert_eq!(world.city_count(), 1);
        let alien = world.alien(id).unwrap();
        assert!(alien.is_trapped());
        assert_eq!(alien.location(), start);
        assert_eq!(alien.moves(), 0);
    }

    #[test]
    fn test_trapped_aliens_never_move() {
        let mut world = world_from("A\nB\nC north=D\n");
        let mut rng = fastrand::Rng::with_seed(99);
        world.generate_aliens(3, &mut rng).unwrap();
        let before: Vec<_> = world
            .aliens()
            .filter(|(_, a)| a.is_trapped())
            .map(|(id, a)| (id, a.location()))
            .collect();

        let mut engine = SimulationEngine::default();
        let mut report = SimulationReport::default();
        for _ in 0..20 {
            engine.step(&mut world, &mut rng, &mut std::io::sink(), &mut report).unwrap();
            for (id, location) in &before {
                if let Some(alien) = world.alien(*id) {
                    assert!(alien.is_trapped());
                    assert_eq!(alien.location(), *location);
                }
            }
        }
    }

    #[test]
    fn test_self_loop_is_not_a_fight() {
        let mut world = world_from("Loop north=Loop\n");
        let mut rng = fastrand::Rng::with_seed(1);
        world.generate_aliens(1, &mut rng).unwrap();

        let mut engine = SimulationEngine::new(SimulationConfig {
            max_iterations: 25,
            emit_events: true,
        });
        let report = engine
            .run_simulation(&mut world, &mut rng, &mut std::io::sink())
            .unwrap();

        assert_eq!(report.iterations, 25);
        assert!(report.destructions.is_empty());
        assert_eq!(world.alien_count(), 1);
        assert_eq!(world.city_count(), 1);
    }

    #[test]
    fn test_suppressed_events_are_still_reported() {
        let mut world = world_from("A east=B\n");
        let mut rng = fastrand::Rng::with_seed(3);
        world.generate_aliens(2, &mut rng).unwrap();

        let mut engine = SimulationEngine::new(SimulationConfig {
            max_iterations: 10,
            emit_events: false,
        });
        let mut out = Vec::new();
        let report = engine.run_simulation(&mut world, &mut rng, &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(report.destructions.len(), 1);
    }

    #[test]
    fn test_counts_follow_destructions() {
        let src = "\
A north=B east=C
B east=D
C north=D east=E
D east=F
E north=F
F
G east=A
";
        let mut world = world_from(src);
        let cities = world.city_count();
        let mut rng = fastrand::Rng::with_seed(2024);
        world.generate_aliens(6, &mut rng).unwrap();

        let report = world.run_simulation(&mut rng, &mut std::io::sink()).unwrap();
        let destroyed = report.destructions.len();

        assert_eq!(world.alien_count(), 6 - 2 * destroyed);
        assert_eq!(world.city_count(), cities - destroyed);
        assert!(world.is_consistent());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut world = world_from("A east=B\n");
        let mut rng = fastrand::Rng::with_seed(5);
        world.generate_aliens(2, &mut rng).unwrap();

        let err = world.run_simulation(&mut rng, &mut BrokenPipe).unwrap_err();
        assert!(matches!(err, InvasionError::Output(_)));
    }
}
