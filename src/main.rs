//! Knight & Keys
//!
//! Finds a knight's route on an 8x8 board that collects one of three keys
//! before entering the door square, using DFS, BFS, A* or iterative
//! deepening, and compares the strategies on moves, nodes and time.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use knight_keys::scenario::{self, PRESETS};
use knight_keys::search::DEFAULT_IDS_MAX_DEPTH;
use knight_keys::{report, Algorithm, Cell, Configuration, Engine, SearchLimits, Setup};

/// Knight & Keys search lab.
#[derive(Parser)]
#[command(name = "knight-keys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one algorithm and print its move trace.
    Solve {
        #[arg(short, long, value_enum, default_value_t = Algorithm::AStar)]
        algorithm: Algorithm,
        /// Average the reported time over this many runs.
        #[arg(long, default_value_t = 1)]
        repeats: usize,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Benchmark every algorithm and print a comparison table.
    Compare {
        #[arg(long, default_value_t = knight_keys::DEFAULT_REPEATS)]
        repeats: usize,
        #[command(flatten)]
        run: RunArgs,
    },
    /// List the preset configurations.
    Presets,
}

#[derive(Args)]
struct RunArgs {
    /// Deepest limit tried by iterative deepening.
    #[arg(long, default_value_t = DEFAULT_IDS_MAX_DEPTH)]
    max_depth: u32,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    position: PositionArgs,
}

/// Where the pieces stand: a preset, a random draw, or explicit squares.
#[derive(Args, Default)]
struct PositionArgs {
    /// Use a preset configuration (see `presets`).
    #[arg(long, conflicts_with_all = ["random", "start", "keys", "door"])]
    preset: Option<String>,
    /// Place all pieces on random, distinct squares.
    #[arg(long, conflicts_with_all = ["start", "keys", "door"])]
    random: bool,
    /// Seed for `--random`.
    #[arg(long, requires = "random")]
    seed: Option<u64>,
    /// Knight square as ROW,COL.
    #[arg(long)]
    start: Option<Cell>,
    /// Key square as ROW,COL; give exactly three.
    #[arg(long = "key", num_args = 1)]
    keys: Vec<Cell>,
    /// Door square as ROW,COL.
    #[arg(long)]
    door: Option<Cell>,
}

impl PositionArgs {
    fn resolve(&self) -> Result<Configuration> {
        if let Some(id) = &self.preset {
            let preset = scenario::preset(id)?;
            log::info!("using preset {:?} ({})", preset.id, preset.name);
            return Ok(preset.configuration);
        }

        if self.random {
            let mut rng = match self.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            let config = scenario::random_configuration(&mut rng);
            log::info!("random configuration {config:?}");
            return Ok(config);
        }

        if self.start.is_none() && self.keys.is_empty() && self.door.is_none() {
            // nothing given: fall back to the first preset
            return Ok(PRESETS[0].configuration);
        }

        let mut setup = Setup::default();
        if let Some(start) = self.start {
            setup.place_start(start);
        }
        for (slot, &cell) in self.keys.iter().enumerate() {
            setup.place_key(slot, cell)?;
        }
        if let Some(door) = self.door {
            setup.place_door(door);
        }
        Ok(setup.validate()?)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve {
            algorithm,
            repeats,
            run,
        }) => run_solve(algorithm, repeats, &run),
        Some(Command::Compare { repeats, run }) => run_compare(repeats, &run),
        Some(Command::Presets) => {
            run_presets();
            Ok(())
        }
        None => {
            // default: compare all algorithms on the first preset
            let run = RunArgs {
                max_depth: DEFAULT_IDS_MAX_DEPTH,
                json: false,
                position: PositionArgs::default(),
            };
            run_compare(knight_keys::DEFAULT_REPEATS, &run)
        }
    }
}

fn engine_for(run: &RunArgs) -> Engine {
    Engine::new(SearchLimits {
        ids_max_depth: run.max_depth,
    })
}

/// Runs one algorithm and prints its trace and feedback line.
fn run_solve(algorithm: Algorithm, repeats: usize, run: &RunArgs) -> Result<()> {
    let config = run.position.resolve()?;
    let enriched = engine_for(run).benchmark(algorithm, &config, repeats);

    if run.json {
        println!("{}", report::to_json([&enriched])?);
    } else {
        println!("{}", report::format_trace(&config, &enriched));
        println!();
        println!("{}", report::feedback(&enriched));
    }
    Ok(())
}

/// Benchmarks every algorithm and prints the comparison table.
fn run_compare(repeats: usize, run: &RunArgs) -> Result<()> {
    let config = run.position.resolve()?;
    let comparison = engine_for(run).compare(&config, repeats);

    if run.json {
        println!("{}", report::to_json(&comparison.rows)?);
    } else {
        println!(
            "knight {}, keys {}, door {} (averaged over {} runs)",
            config.start,
            config
                .keys
                .placed()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            config.door,
            repeats.max(1)
        );
        println!("{}", report::format_comparison(&comparison));
    }
    Ok(())
}

/// Prints every preset with its squares.
fn run_presets() {
    for preset in &PRESETS {
        let config = &preset.configuration;
        let keys: Vec<String> = config.keys.placed().map(|cell| cell.to_string()).collect();
        println!(
            "{:<14} {:<16} knight {} keys {} door {}",
            preset.id,
            preset.name,
            config.start,
            keys.join(" "),
            config.door
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_squares_resolve() {
        let cli = Cli::try_parse_from([
            "knight-keys", "solve", "--start", "0,0", "--key", "2,1", "--key", "7,7", "--key",
            "7,6", "--door", "2,1",
        ])
        .unwrap();
        let Some(Command::Solve { algorithm, run, .. }) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(algorithm, Algorithm::AStar);
        let config = run.position.resolve().unwrap();
        assert_eq!(
            config,
            Configuration::new(
                Cell::new(0, 0),
                [Cell::new(2, 1), Cell::new(7, 7), Cell::new(7, 6)],
                Cell::new(2, 1),
            )
        );
    }

    #[test]
    fn test_missing_door_is_rejected() {
        let cli = Cli::try_parse_from([
            "knight-keys", "compare", "--start", "0,0", "--key", "2,1", "--key", "7,7", "--key",
            "7,6",
        ])
        .unwrap();
        let Some(Command::Compare { run, .. }) = cli.command else {
            panic!("expected compare");
        };
        let error = run.position.resolve().unwrap_err();
        assert_eq!(error.to_string(), "the door has not been placed");
    }

    #[test]
    fn test_fourth_key_is_rejected() {
        let args = PositionArgs {
            start: Some(Cell::new(0, 0)),
            keys: vec![Cell::new(1, 2); 4],
            door: Some(Cell::new(7, 7)),
            ..PositionArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_off_board_square_fails_to_parse() {
        assert!(Cli::try_parse_from(["knight-keys", "solve", "--start", "8,0"]).is_err());
    }

    #[test]
    fn test_algorithm_names_parse() {
        let cli = Cli::try_parse_from(["knight-keys", "solve", "-a", "ids", "--preset", "near-key"])
            .unwrap();
        let Some(Command::Solve { algorithm, .. }) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(algorithm, Algorithm::Ids);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let args = PositionArgs {
            random: true,
            seed: Some(99),
            ..PositionArgs::default()
        };
        assert_eq!(args.resolve().unwrap(), args.resolve().unwrap());
    }
}
