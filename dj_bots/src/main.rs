//! Plays a set of douji between bots and prints the standings.

use std::{path::PathBuf, sync::Arc};

use anyhow::Error;
use ctrlc::set_handler;
use douji::{
    Chips, HiddenCards, JsonLinesSink, MemorySink, ResultSink, SetConfig, SetRunner,
    bot::{BotDifficulty, BotTable},
};
use log::{info, warn};
use pico_args::Arguments;

const HELP: &str = "\
Play a set of douji between bots

USAGE:
  dj_bots [OPTIONS]

OPTIONS:
  --players     N           Bots at the table (2-9)       [default: 4]
  --chips       N           Starting chips per bot        [default: 1000]
  --games       N           Games before bombing extends  [default: env DOUJI_GAMES or 2]
  --hidden      1|2         Hidden cards per player       [default: env DOUJI_HIDDEN_CARDS or 1]
  --ante        N           Ante per player               [default: env DOUJI_ANTE or 1]
  --step        N           Call step                     [default: env DOUJI_STEP or 1]
  --ceiling     N           Call ceiling                  [default: env DOUJI_CEILING or 5]
  --difficulty  LEVEL       easy, standard, tag or random [default: standard]
  --seed        N           Seed for decks and bots       [default: env DOUJI_SEED or random]
  --out         PATH        Append results as JSON lines  [default: keep in memory]

FLAGS:
  -v, --verbose             Log the table after every round
  --json                    Print the final report as JSON
  -h, --help                Print help information

ENVIRONMENT:
  RUST_LOG                  Log filter [default: info]
  DOUJI_*                   Set defaults, see the options above
";

struct Args {
    players: usize,
    chips: Chips,
    difficulty: Option<BotDifficulty>,
    out: Option<PathBuf>,
    json: bool,
    config: SetConfig,
}

fn parse_hidden(value: &str) -> Result<HiddenCards, String> {
    let count: u8 = value.parse().map_err(|_| format!("not a number: {value}"))?;
    HiddenCards::try_from(count)
}

/// `None` stands for the random baseline bot.
fn parse_difficulty(value: &str) -> Result<Option<BotDifficulty>, String> {
    if value.eq_ignore_ascii_case("random") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn parse_args(mut pargs: Arguments) -> Result<Args, Error> {
    let mut config = SetConfig::from_env()?;
    if let Some(games) = pargs.opt_value_from_str("--games")? {
        config.games = games;
    }
    if let Some(hidden_cards) = pargs.opt_value_from_fn("--hidden", parse_hidden)? {
        config.hidden_cards = hidden_cards;
    }
    if let Some(ante) = pargs.opt_value_from_str("--ante")? {
        config.ante = ante;
    }
    if let Some(step) = pargs.opt_value_from_str("--step")? {
        config.step = step;
    }
    if let Some(ceiling) = pargs.opt_value_from_str("--ceiling")? {
        config.ceiling = ceiling;
    }
    if let Some(seed) = pargs.opt_value_from_str("--seed")? {
        config.seed = Some(seed);
    }
    config.verbose |= pargs.contains(["-v", "--verbose"]);

    let args = Args {
        players: pargs.opt_value_from_str("--players")?.unwrap_or(4),
        chips: pargs
            .opt_value_from_str("--chips")?
            .unwrap_or(douji::constants::DEFAULT_STARTING_CHIPS),
        difficulty: pargs
            .opt_value_from_fn("--difficulty", parse_difficulty)?
            .unwrap_or(Some(BotDifficulty::Standard)),
        out: pargs.opt_value_from_str("--out")?,
        json: pargs.contains("--json"),
        config,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("ignoring unused arguments: {remaining:?}");
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let args = parse_args(pargs)?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let sink: Arc<dyn ResultSink> = match &args.out {
        Some(path) => {
            info!("writing results to {}", path.display());
            Arc::new(JsonLinesSink::new(path))
        }
        None => Arc::new(MemorySink::new()),
    };

    let mut table = match args.config.seed {
        Some(seed) => BotTable::from_seed(seed),
        None => BotTable::new(),
    };
    let mut players = match args.difficulty {
        Some(difficulty) => table.spawn_bots(args.players, difficulty, args.chips),
        None => table.spawn_random_bots(args.players, 0.5, args.chips),
    };

    let runner = SetRunner::new(args.config, sink)?;
    info!(
        "starting set {} with {} bots over {} games",
        runner.id(),
        players.len(),
        runner.config().games
    );
    let report = runner.run(&mut players, &mut table).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("set {}", report.set_id);
    for (i, outcome) in report.games.iter().enumerate() {
        match (&outcome.winner, &outcome.reason) {
            (Some(winner), Some(reason)) => {
                println!("  game {:>2}: {winner} wins ({reason})", i + 1);
            }
            _ => println!(
                "  game {:>2}: bombed, {} carried over",
                i + 1,
                outcome.leftover_pot
            ),
        }
    }
    println!("standings:");
    for balance in &report.balances {
        println!(
            "  {:<20} {:>8}",
            balance.player_name, balance.points
        );
    }
    if report.unclaimed_pot() > 0 {
        println!("unclaimed pot: {}", report.unclaimed_pot());
    }
    for (id, stats) in table.stats() {
        println!("  {id}: {stats:?}");
    }
    for failure in &report.persistence_failures {
        warn!("game {} was not saved: {}", failure.game_id, failure.message);
    }

    Ok(())
}
