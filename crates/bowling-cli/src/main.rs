use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bowling_cli::config::BowlingConfig;
use bowling_cli::console::ConsoleLane;
use bowling_cli::{PlayerSetup, run};

#[derive(Parser, Debug)]
#[command(name = "bowling", version, about = "Keep score for a game of ten-pin bowling")]
struct Cli {
    /// Number of players (asked for when omitted)
    #[arg(short, long, conflicts_with = "names")]
    players: Option<usize>,

    /// Player name; repeat once per player to skip the name prompts
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Config file (defaults to $BOWLING_CONFIG, then ./bowling.toml)
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print the final standings as JSON once the game is over
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();

    let config = BowlingConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let setup = PlayerSetup {
        players: args.players,
        names: args.names,
    };
    let mut console = ConsoleLane::new(io::stdin().lock(), io::stdout(), config.display.clone());

    let summary = match run(&config, &setup, &mut console) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Game aborted: {e}");
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to encode summary: {e}");
                std::process::exit(1);
            },
        }
    }
}
