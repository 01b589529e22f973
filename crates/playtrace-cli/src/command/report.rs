//! Dataset report command.

use std::path::PathBuf;

use clap::Args;
use playtrace_analysis::report::DatasetReport;
use playtrace_events::Action;
use playtrace_stats::histogram::Histogram;

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Path to the event dataset (.csv or .json)
    pub events: PathBuf,

    /// Also render a play-time distribution histogram with this many bins
    #[arg(long)]
    pub bins: Option<usize>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let events = data::load_events(&arg.events)?;
    let report = DatasetReport::from_events(&events);
    print!("{report}");

    if let Some(bins) = arg.bins {
        let play_time: Vec<f64> = events
            .iter()
            .filter(|e| e.action == Action::Play)
            .map(|e| e.value)
            .collect();
        println!();
        print_play_time_histogram(&play_time, bins);
    }
    Ok(())
}

fn print_play_time_histogram(play_time: &[f64], bins: usize) {
    const BAR_WIDTH: u64 = 40;

    let histogram = Histogram::new(play_time.iter().copied(), bins);
    println!("Play time distribution:");
    if histogram.bins.is_empty() {
        println!("  (no data)");
        return;
    }

    let max_count = histogram
        .bins
        .iter()
        .map(|bin| bin.count)
        .max()
        .unwrap_or(0)
        .max(1);
    for bin in &histogram.bins {
        let bar_len = usize::try_from(bin.count * BAR_WIDTH / max_count).unwrap_or(0);
        println!(
            "  {:>10.1} - {:>10.1} {:>8} {}",
            bin.range.start,
            bin.range.end,
            bin.count,
            "#".repeat(bar_len),
        );
    }
}
