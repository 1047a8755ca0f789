//! `suid-cli`: generate identifiers, or decode one back into its fields.
//!
//! ```bash
//! suid-cli new --kind guid --group 2 --count 3
//! SUID_HOST_ID=7 suid-cli new
//! suid-cli inspect 1KZXBN0005003
//! ```

mod cli;

use clap::Parser;
use cli::command;
use cli::config::{CliArgs, CliConfig};
use cli::telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;

    let config = CliConfig::try_from(args)?;
    tracing::debug!(?config, "starting");

    let mut out = std::io::stdout().lock();
    command::run(&config, &mut out)
}
