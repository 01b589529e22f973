//! Affiliation classification command.

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use playtrace_analysis::affiliation::{AffiliationTable, PlayerAffiliation};
use serde::Serialize;

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct ClassifyArg {
    /// Path to the event dataset (.csv or .json)
    pub events: PathBuf,

    /// Tracked game titles (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "config")]
    pub tracked_games: Vec<String>,

    /// JSON config file with a "tracked_games" list
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write per-player affiliations as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AffiliationExport<'a> {
    generated_at: DateTime<Utc>,
    tracked_games: &'a [String],
    players: Vec<&'a PlayerAffiliation>,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let tracked = if let Some(path) = &arg.config {
        data::load_classify_config(path)?.tracked_games
    } else if arg.tracked_games.is_empty() {
        anyhow::bail!("no tracked titles: pass --tracked-games or --config");
    } else {
        arg.tracked_games.clone()
    };

    let events = data::load_events(&arg.events)?;
    let table = AffiliationTable::from_events(&events, &tracked);

    print_summary(&table);

    if let Some(path) = &arg.output {
        let export = AffiliationExport {
            generated_at: Utc::now(),
            tracked_games: table.tracked_titles(),
            players: table.players().collect(),
        };
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("Wrote {} player records to {}", table.len(), path.display());
    }
    Ok(())
}

fn print_summary(table: &AffiliationTable) {
    println!(
        "Affiliation Summary ({} players, {} tracked titles)",
        table.len(),
        table.tracked_titles().len(),
    );
    println!("{}", "-".repeat(44));

    println!("Players per tracked title:");
    for (idx, title) in table.tracked_titles().iter().enumerate() {
        let count = table
            .players()
            .filter(|affiliation| affiliation.flags[idx])
            .count();
        println!("  {title:<32} {count:>8}");
    }

    println!();
    println!("Player types:");
    for (label, count) in table.type_counts() {
        println!("  {label:<32} {count:>8}");
    }
}
