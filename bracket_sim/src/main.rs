//! Command-line bracket simulator.
//!
//! Registers a roster, generates a single-elimination bracket, plays every
//! match with a random winner and prints the final snapshot as JSON.

use anyhow::{Context, Error, bail};
use bracket_engine::{BracketConfig, BracketEngine, Match, export};
use log::{debug, info};
use pico_args::Arguments;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HELP: &str = "\
Simulate a single-elimination bracket with random results

USAGE:
  bracket_sim [OPTIONS] [NAME ...]

OPTIONS:
  --players    N           Register N generated players when no names are given  [default: 8]
  --seed       SEED        Seed for both pairing and results  [default: env BRACKET_SHUFFLE_SEED or random]
  --max        N           Maximum roster size  [default: env BRACKET_MAX_PARTICIPANTS or unlimited]

FLAGS:
  --pretty                 Pretty-print the JSON snapshot
  -h, --help               Print help information

ENVIRONMENT:
  BRACKET_MIN_PARTICIPANTS Minimum roster size to start (at least 2)
  BRACKET_MAX_PARTICIPANTS Maximum roster size
  BRACKET_MAX_NAME_LEN     Longest accepted name
  BRACKET_TRIM_NAMES       Trim whitespace around names (true/false)
  BRACKET_SHUFFLE_SEED     Fixed pairing seed
  RUST_LOG                 Log filter [default: info]
";

struct Args {
    players: usize,
    seed: Option<u64>,
    max: Option<usize>,
    pretty: bool,
    names: Vec<String>,
}

fn parse_args() -> Result<Args, Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let players = pargs.opt_value_from_str("--players")?.unwrap_or(8);
    let seed = pargs.opt_value_from_str("--seed")?;
    let max = pargs.opt_value_from_str("--max")?;
    let pretty = pargs.contains("--pretty");

    let names = pargs
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow::anyhow!("name is not valid UTF-8: {arg:?}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Args {
        players,
        seed,
        max,
        pretty,
        names,
    })
}

fn next_pending(engine: &BracketEngine) -> Option<Match> {
    engine.pending_matches().next().cloned()
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let args = parse_args()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let mut config = BracketConfig::from_env().context("invalid bracket configuration")?;
    if let Some(seed) = args.seed {
        config.shuffle_seed = Some(seed);
    }
    if args.max.is_some() {
        config.max_participants = args.max;
    }
    debug!("Using {config:?}");

    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut engine = BracketEngine::with_config(config)?;

    let names = if args.names.is_empty() {
        (1..=args.players).map(|i| format!("Player {i}")).collect()
    } else {
        args.names
    };
    for name in &names {
        let participant = engine
            .add_participant(name)
            .with_context(|| format!("cannot register {name:?}"))?;
        debug!("Registered {participant}");
    }

    engine.initialize_bracket()?;
    info!(
        "Bracket started with {} participants over {} rounds",
        engine.participants().len(),
        engine.round_count()
    );

    while let Some(m) = next_pending(&engine) {
        let (Some(p1), Some(p2)) = (&m.participant1, &m.participant2) else {
            bail!("match {} is pending without two participants", m.key());
        };
        let (winner, loser) = if rng.random_bool(0.5) { (p1, p2) } else { (p2, p1) };
        info!("{}: {} defeats {}", m.key(), winner.name, loser.name);
        engine.update_match(m.id, winner.id)?;
    }

    if let Some(champion) = engine.champion() {
        info!("Champion: {champion}");
    }

    let snapshot = engine.snapshot();
    let json = if args.pretty {
        export::to_json_pretty(&snapshot)?
    } else {
        export::to_json(&snapshot)?
    };
    println!("{json}");

    Ok(())
}
