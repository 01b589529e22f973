//! Most-frequent-titles command.

use std::path::PathBuf;

use clap::Args;
use playtrace_analysis::frequency;

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct TopGamesArg {
    /// Path to the event dataset (.csv or .json)
    pub events: PathBuf,

    /// Number of titles to list
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,
}

pub(crate) fn run(arg: &TopGamesArg) -> anyhow::Result<()> {
    let events = data::load_events(&arg.events)?;
    for title in frequency::top_games_by_row_count(&events, arg.count) {
        println!("{title}");
    }
    Ok(())
}
