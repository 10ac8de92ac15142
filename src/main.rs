use clap::Parser;
use colored::Colorize;
use invasion::prelude::*;
use invasion::world::parse_world_file;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut rng = if let Some(seed) = args.seed {
        fastrand::Rng::with_seed(seed)
    } else {
        fastrand::Rng::new()
    };

    // Parse world and place aliens
    let (mut world, report) = parse_world_file(&args.map)?;
    if !report.skipped.is_empty() {
        tracing::info!(skipped = report.skipped.len(), "ignored malformed map tokens");
    }
    world.generate_aliens(args.aliens, &mut rng)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(InvasionError::Output)?;
            Box::new(BufWriter::with_capacity(64 * 1024, file))
        }
        None => Box::new(BufWriter::with_capacity(64 * 1024, io::stdout().lock())),
    };

    // Run simulation, streaming destruction events
    let mut engine = SimulationEngine::new(args.simulation_config());
    let summary = engine.run_simulation(&mut world, &mut rng, &mut out)?;

    // Print results
    world.render(&mut out)?;
    out.flush().map_err(InvasionError::Output)?;
    engine.print_summary(&world, &summary, args.aliens);

    Ok(())
}
