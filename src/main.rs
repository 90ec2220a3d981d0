// Entrypoint for the CLI application.
// - Loads `.env` once at startup so API keys are in the environment.
// - Keeps `main` small: parse arguments, build the two clients and hand
//   them to the UI loop.

use clap::Parser;
use refsum::api::{PolkassemblyClient, SummaryClient};
use refsum::cli::{version_string, Cli, Command};
use refsum::ui;

fn main() -> anyhow::Result<()> {
    // Load API keys from a .env file if present; its absence is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Version => println!("{}", version_string()),
        Command::Referendum { ref_id } => {
            let source = PolkassemblyClient::from_env()?;
            let summarizer = SummaryClient::from_env()?;
            // Start the interactive menu. This call blocks until the
            // user exits.
            ui::run(&source, &summarizer, ref_id)?;
        }
    }
    Ok(())
}
