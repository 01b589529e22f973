use clap::{Parser, Subcommand};

use self::{
    classify::ClassifyArg, features::FeaturesArg, report::ReportArg, top_games::TopGamesArg,
};

mod classify;
mod features;
mod report;
mod top_games;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print dataset-level descriptive statistics
    Report(#[clap(flatten)] ReportArg),
    /// List the most frequent game titles
    TopGames(#[clap(flatten)] TopGamesArg),
    /// Flag players affiliated with a list of tracked titles
    Classify(#[clap(flatten)] ClassifyArg),
    /// Generate the per-player genre feature matrix
    Features(#[clap(flatten)] FeaturesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::TopGames(arg) => top_games::run(&arg)?,
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
    }
    Ok(())
}
