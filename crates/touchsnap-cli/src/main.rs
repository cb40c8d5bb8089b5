//! TouchSnap command line: replay recorded pointer samples through the snap
//! engine and print what each one snapped to.

mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use touchsnap_core::SnapOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snap every sample of a session file and print one JSON result per line
    Replay {
        /// Session file (viewport, shapes and samples)
        session: PathBuf,
        /// Snap options file; overrides the options stored in the session
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Print the default snap options as JSON
    Defaults,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { session, options } => {
            let options = options
                .map(|path| SnapOptions::load(&path).with_context(|| format!("loading options {}", path.display())))
                .transpose()?;
            let session = session::Session::load(&session)?;
            for result in session::replay(session, options)? {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&SnapOptions::default())?);
        }
    }
    Ok(())
}
