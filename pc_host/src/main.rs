//! Tool host binary: reads JSON tool calls from stdin and answers on stdout.
//!
//! Logs go to stderr so stdout carries nothing but responses.

use std::io::{self, BufRead, Write};

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pc_host::{HostConfig, Overrides, ToolHost};
use pico_args::Arguments;

const HELP: &str = "\
Serve poker copilot tools over stdin/stdout, one JSON object per line

USAGE:
  pc_host [OPTIONS]

OPTIONS:
  --hero       NAME        Name identifying the hero at setup  [default: env COPILOT_HERO_NAME or hero]
  --trials     N           Default equity trials               [default: env COPILOT_EQUITY_TRIALS or 1000]
  --seed       N           Seed for equity sampling            [default: env COPILOT_SEED or random]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  COPILOT_HERO_NAME        Hero name
  COPILOT_DEFAULT_CHIPS    Stack for players listed without chips
  COPILOT_EQUITY_TRIALS    Default equity trials
  COPILOT_MAX_SEATS        Seats available at setup
  COPILOT_SEED             Seed for equity sampling

REQUEST:
  {\"tool\": \"setup\", \"arguments\": {\"players\": [{\"name\": \"alice\"}]}}
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides::from_args(&mut pargs)?;
    let config = HostConfig::from_env(overrides)?;
    config.validate()?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();
    info!(
        "serving {} tools, hero {:?}, {} default trials",
        pc_host::TOOLS.len(),
        config.session.hero_name,
        config.session.equity_trials
    );

    let mut host = ToolHost::new(&config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = host.handle_line(&line);
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
