//! Plays a Hold'em match between engine bots and reports the final stacks.

mod config;
mod runner;

use anyhow::Error;
use log::info;
use pico_args::Arguments;

use config::MatchConfig;
use runner::MatchRunner;

const HELP: &str = "\
Play a Hold'em match between engine bots

USAGE:
  he_match [OPTIONS]

OPTIONS:
  --players    N           Seats at the table           [default: env HE_PLAYERS or 4]
  --hands      N           Most hands to play           [default: env HE_HANDS or 1000]
  --seed       N           Seed for deck and bots       [default: env HE_SEED or random]

FLAGS:
  --json                   Print every hand and the final report as JSON lines
  -h, --help               Print help information

ENVIRONMENT:
  HE_STARTING_CHIPS        Stack each seat starts with (default 2000)
  HE_BLIND                 Big blind for the first hand (default 20)
  HE_RAISE_CAP             Raises allowed per street (default 3)
  HE_BLIND_INCREASE_EVERY  Double the blind every N hands (default 0, never)
  HE_STRATEGY              default | random | mixed
  HE_ODD_CHIP              left-of-dealer | spread
  RUST_LOG                 Log filter (default info)
";

struct Args {
    players: Option<usize>,
    hands: Option<usize>,
    seed: Option<u64>,
    json: bool,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        players: pargs.opt_value_from_str("--players")?,
        hands: pargs.opt_value_from_str("--hands")?,
        seed: pargs.opt_value_from_str("--seed")?,
        json: pargs.contains("--json"),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let config = MatchConfig::from_env(args.players, args.hands, args.seed)?;
    config.validate()?;
    info!(
        "Starting match: {} players, {} chips each, blind {}, {:?} bots",
        config.players, config.starting_chips, config.blind, config.strategy
    );

    let mut runner = MatchRunner::new(config);
    let mut print_err = None;
    let report = runner.run(|summary| {
        if args.json && print_err.is_none() {
            match serde_json::to_string(summary) {
                Ok(line) => println!("{line}"),
                Err(err) => print_err = Some(err),
            }
        }
    });
    if let Some(err) = print_err {
        return Err(err.into());
    }

    match &report.winner {
        Some(name) => info!("{name} wins after {} hands", report.hands_played),
        None => info!("Hand limit reached after {} hands", report.hands_played),
    }
    if report.hands_voided > 0 {
        info!("{} hands voided", report.hands_voided);
    }
    for standing in &report.standings {
        info!("{:>8}: {}", standing.name, standing.chips);
    }
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
