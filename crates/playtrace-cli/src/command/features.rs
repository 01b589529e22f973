//! Feature matrix generation command.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use playtrace_analysis::{
    features::{FeatureMatrix, PlayerFeatures},
    genre::GenreCatalog,
};
use serde::Serialize;

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct FeaturesArg {
    /// Path to the event dataset (.csv or .json)
    pub events: PathBuf,

    /// Path to the game→genre catalog JSON
    #[arg(long, required_unless_present = "stub_genre_seed")]
    pub genres: Option<PathBuf>,

    /// TESTING ONLY: assign every observed title a pseudo-random genre
    /// from this seed instead of loading a real catalog
    #[arg(long, conflicts_with = "genres")]
    pub stub_genre_seed: Option<u64>,

    /// Write the matrix to this path (.json includes metadata, anything
    /// else is CSV); prints CSV to stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FeatureExport<'a> {
    generated_at: DateTime<Utc>,
    columns: Vec<String>,
    players: &'a [PlayerFeatures],
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let events = data::load_events(&arg.events)?;

    let catalog = if let Some(seed) = arg.stub_genre_seed {
        let titles: Vec<String> = events
            .distinct_games()
            .into_iter()
            .map(str::to_string)
            .collect();
        GenreCatalog::stub(titles, seed)
    } else if let Some(path) = &arg.genres {
        data::load_catalog(path)?
    } else {
        anyhow::bail!("no genre source: pass --genres or --stub-genre-seed");
    };

    let annotated = catalog.annotate(&events);
    if annotated.dropped_rows() > 0 {
        log::info!(
            "genre join dropped {} of {} rows ({} unmapped titles)",
            annotated.dropped_rows(),
            events.len(),
            annotated.dropped.len(),
        );
    }

    let matrix = FeatureMatrix::from_annotated(&annotated.events);

    match &arg.output {
        Some(path) if has_extension(path, "json") => {
            let export = FeatureExport {
                generated_at: Utc::now(),
                columns: FeatureMatrix::column_names(),
                players: matrix.players(),
            };
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &export)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} feature rows to {}", matrix.len(), path.display());
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(BufWriter::new(file), &matrix)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} feature rows to {}", matrix.len(), path.display());
        }
        None => {
            write_csv(std::io::stdout().lock(), &matrix)?;
        }
    }
    Ok(())
}

fn write_csv<W>(writer: W, matrix: &FeatureMatrix) -> anyhow::Result<()>
where
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["player".to_string()];
    header.extend(FeatureMatrix::column_names());
    csv_writer.write_record(&header)?;

    for features in matrix.players() {
        let mut record = vec![features.player.clone()];
        record.extend(features.row().iter().map(ToString::to_string));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
