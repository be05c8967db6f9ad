//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;

pub use output::{output, CommandOutput};

/// Hexclash battle client.
#[derive(Parser, Debug)]
#[command(name = "hexclash", version, about = "Capture hexes by solving programming challenges")]
pub struct Cli {
    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or replace the local session
    Login(commands::login::LoginArgs),
    /// Attack a hex: solve a challenge, capture the territory
    Attack(commands::attack::AttackArgs),
    /// Show the territory map
    Map(commands::map::MapArgs),
}

/// Read one trimmed line from the terminal under a label.
pub fn prompt(term: &Term, label: &str) -> anyhow::Result<String> {
    term.write_str(&format!("{label}: "))?;
    let line = term.read_line()?;
    Ok(line.trim().to_string())
}

/// Report a fatal error and exit non-zero.
///
/// Game outcomes (a lost round, an already-owned hex, a detected conflict)
/// never reach this; they are reported by the commands and exit cleanly.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
