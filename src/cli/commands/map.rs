//! Implementation of the `hexclash map` command.
//!
//! Read-only view of the shared territory table. Pulls before reading so the
//! listing reflects the latest published state.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use crate::adapters::fs::JsonTerritoryStore;
use crate::adapters::git::GitReplica;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Faction, TerritoryTable};
use crate::domain::ports::{Replica, TerritoryStore};

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Skip the pull and list the local copy as-is
    #[arg(long)]
    pub offline: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct MapOutput {
    pub territories: TerritoryTable,
}

impl CommandOutput for MapOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Hex", "Owner", "Difficulty", "Q", "R"]);

        for territory in &self.territories.territories {
            let owner_cell = match territory.owner {
                Some(Faction::Red) => Cell::new("red").fg(Color::Red),
                Some(Faction::Blue) => Cell::new("blue").fg(Color::Blue),
                None => Cell::new("unclaimed").fg(Color::DarkGrey),
            };
            table.add_row(vec![
                Cell::new(territory.id),
                owner_cell,
                Cell::new(territory.difficulty),
                Cell::new(territory.q),
                Cell::new(territory.r),
            ]);
        }

        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: MapArgs, config: &Config, json_mode: bool) -> Result<()> {
    let repo_dir = Path::new(&config.repo.dir);
    let table_path = repo_dir.join(&config.repo.territories_path);

    if !args.offline {
        let replica = GitReplica::new(repo_dir);
        replica.pull().await?;
    }

    let store: Arc<dyn TerritoryStore> = Arc::new(JsonTerritoryStore::new());
    let territories = store.load(&table_path).await?;

    output(&MapOutput { territories }, json_mode);
    Ok(())
}
