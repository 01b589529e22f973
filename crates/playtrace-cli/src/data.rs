use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use playtrace_analysis::genre::GenreCatalog;
use playtrace_events::EventTable;
use serde::Deserialize;

/// Tracked-title configuration for the classify command.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClassifyConfig {
    pub tracked_games: Vec<String>,
}

/// Loads an event dataset, dispatching on the file extension
/// (`.json` for a JSON array, anything else is treated as headerless CSV).
pub(crate) fn load_events(path: &Path) -> anyhow::Result<EventTable> {
    let table = if has_extension(path, "json") {
        playtrace_events::load_events_json(path)
    } else {
        playtrace_events::load_events_csv(path)
    }
    .with_context(|| format!("failed to load events from {}", path.display()))?;

    if table.is_empty() {
        log::warn!("dataset {} contains no events", path.display());
    }
    Ok(table)
}

/// Loads a game→genre catalog from a JSON object file.
pub(crate) fn load_catalog(path: &Path) -> anyhow::Result<GenreCatalog> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let catalog = GenreCatalog::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse genre catalog {}", path.display()))?;
    if catalog.is_empty() {
        log::warn!(
            "genre catalog {} is empty; every event row will be dropped",
            path.display()
        );
    }
    Ok(catalog)
}

/// Loads the classify configuration file.
pub(crate) fn load_classify_config(path: &Path) -> anyhow::Result<ClassifyConfig> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let config: ClassifyConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    if config.tracked_games.is_empty() {
        anyhow::bail!("config {} lists no tracked games", path.display());
    }
    Ok(config)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
