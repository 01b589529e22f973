//! Dataset-level descriptive report.
//!
//! [`DatasetReport`] computes every number once from the event table and
//! renders through `Display`; the exact labels and layout are part of the
//! reporting contract, so tests compare against the rendered text.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use playtrace_events::{Action, EventTable};
use playtrace_stats::descriptive::Summary;

/// How many titles the purchased-games ranking shows.
const TOP_PURCHASED_LEN: usize = 10;

/// Snapshot of dataset-level descriptive statistics.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    /// Total number of event rows.
    pub record_count: usize,
    /// Number of distinct players.
    pub player_count: usize,
    /// Number of distinct game titles.
    pub game_count: usize,
    /// Number of play rows.
    pub play_rows: usize,
    /// Number of purchase rows.
    pub purchase_rows: usize,
    /// Players with at least one play action.
    pub playing_players: usize,
    /// Percentage of players with play activity. The underlying ratio is
    /// rounded to two decimal places *before* scaling to a percentage;
    /// the early rounding is part of the displayed-output contract.
    pub playing_player_pct: f64,
    /// Summary of the value column over play rows (hours played).
    pub play_time: Option<Summary>,
    /// Summary of per-player distinct-games-played counts.
    pub games_played_per_player: Option<Summary>,
    /// Summary of per-player distinct-games-purchased counts.
    pub games_purchased_per_player: Option<Summary>,
    /// Top titles by distinct purchasing players, descending.
    pub top_purchased: Vec<(String, usize)>,
}

impl DatasetReport {
    /// Computes the full report from an event table.
    ///
    /// Every aggregate behaves predictably on an empty table: counts are
    /// zero and the summaries are `None`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_events(events: &EventTable) -> Self {
        let record_count = events.len();
        let player_count = events.distinct_players().len();
        let game_count = events.distinct_games().len();
        let play_rows = events.iter().filter(|e| e.action == Action::Play).count();
        let purchase_rows = record_count - play_rows;
        let playing_players = events.players_with_action(Action::Play).len();
        let playing_player_pct = if player_count == 0 {
            0.0
        } else {
            (playing_players as f64 / player_count as f64 * 100.0).round()
        };

        let play_time = Summary::new(
            events
                .iter()
                .filter(|e| e.action == Action::Play)
                .map(|e| e.value),
        );

        Self {
            record_count,
            player_count,
            game_count,
            play_rows,
            purchase_rows,
            playing_players,
            playing_player_pct,
            play_time,
            games_played_per_player: per_player_distinct_games(events, Action::Play),
            games_purchased_per_player: per_player_distinct_games(events, Action::Purchase),
            top_purchased: top_by_distinct_purchasers(events, TOP_PURCHASED_LEN),
        }
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Report")?;
        writeln!(f, "==============")?;
        writeln!(f)?;
        writeln!(f, "Number of records:          {:>10}", self.record_count)?;
        writeln!(f, "Number of unique players:   {:>10}", self.player_count)?;
        writeln!(f, "Number of games:            {:>10}", self.game_count)?;
        writeln!(f)?;
        writeln!(f, "Action counts:")?;
        writeln!(f, "  play      {:>10}", self.play_rows)?;
        writeln!(f, "  purchase  {:>10}", self.purchase_rows)?;
        writeln!(f)?;
        writeln!(
            f,
            "Players with play activity: {} ({:.1}%)",
            self.playing_players, self.playing_player_pct
        )?;
        writeln!(f)?;
        writeln!(f, "Play time (play events):")?;
        write_summary(f, self.play_time.as_ref())?;
        writeln!(f)?;
        writeln!(f, "Distinct games played per player:")?;
        write_summary(f, self.games_played_per_player.as_ref())?;
        writeln!(f)?;
        writeln!(f, "Distinct games purchased per player:")?;
        write_summary(f, self.games_purchased_per_player.as_ref())?;
        writeln!(f)?;
        writeln!(
            f,
            "Top {TOP_PURCHASED_LEN} games by distinct purchasers:"
        )?;
        for (title, count) in &self.top_purchased {
            writeln!(f, "  {title:<44} {count:>7}")?;
        }
        Ok(())
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: Option<&Summary>) -> fmt::Result {
    let Some(summary) = summary else {
        return writeln!(f, "  (no data)");
    };
    writeln!(f, "  count  {:>11}", summary.count)?;
    writeln!(f, "  mean   {:>11.2}", summary.mean)?;
    writeln!(f, "  std    {:>11.2}", summary.std_dev)?;
    writeln!(f, "  min    {:>11.2}", summary.min)?;
    writeln!(f, "  25%    {:>11.2}", summary.q1)?;
    writeln!(f, "  50%    {:>11.2}", summary.median)?;
    writeln!(f, "  75%    {:>11.2}", summary.q3)?;
    writeln!(f, "  max    {:>11.2}", summary.max)?;
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn per_player_distinct_games(events: &EventTable, action: Action) -> Option<Summary> {
    let mut games: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for event in events.iter().filter(|e| e.action == action) {
        games
            .entry(event.player.as_str())
            .or_default()
            .insert(event.game.as_str());
    }
    Summary::new(games.values().map(|set| set.len() as f64))
}

fn top_by_distinct_purchasers(events: &EventTable, n: usize) -> Vec<(String, usize)> {
    let mut purchasers: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for event in events.iter().filter(|e| e.action == Action::Purchase) {
        purchasers
            .entry(event.game.as_str())
            .or_default()
            .insert(event.player.as_str());
    }
    let mut ranked: Vec<(&str, usize)> = purchasers
        .into_iter()
        .map(|(title, players)| (title, players.len()))
        .collect();
    ranked.sort_by_key(|&(title, count)| (Reverse(count), title));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(title, count)| (title.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use playtrace_events::Event;

    use super::*;

    fn event(player: &str, game: &str, action: Action, value: f64) -> Event {
        Event {
            player: player.into(),
            game: game.into(),
            action,
            value,
        }
    }

    fn sample_table() -> EventTable {
        EventTable::new(vec![
            event("p1", "GameA", Action::Purchase, 1.0),
            event("p1", "GameA", Action::Play, 10.0),
            event("p1", "GameB", Action::Play, 30.0),
            event("p2", "GameA", Action::Purchase, 1.0),
            event("p2", "GameA", Action::Play, 2.0),
            event("p3", "GameB", Action::Purchase, 1.0),
        ])
    }

    #[test]
    fn test_counts() {
        let report = DatasetReport::from_events(&sample_table());
        assert_eq!(report.record_count, 6);
        assert_eq!(report.player_count, 3);
        assert_eq!(report.game_count, 2);
        assert_eq!(report.play_rows, 3);
        assert_eq!(report.purchase_rows, 3);
        assert_eq!(report.playing_players, 2);
    }

    #[test]
    fn test_pct_rounds_ratio_before_scaling() {
        // 2 of 3 players play: 0.6666.. rounds to 0.67, scales to 67%.
        let report = DatasetReport::from_events(&sample_table());
        assert_eq!(report.playing_player_pct, 67.0);
        let text = report.to_string();
        assert!(text.contains("Players with play activity: 2 (67.0%)"));
    }

    #[test]
    fn test_play_time_summary() {
        let report = DatasetReport::from_events(&sample_table());
        let play_time = report.play_time.unwrap();
        assert_eq!(play_time.count, 3);
        assert_eq!(play_time.mean, 14.0);
        assert_eq!(play_time.min, 2.0);
        assert_eq!(play_time.max, 30.0);
    }

    #[test]
    fn test_per_player_distinct_game_summaries() {
        let report = DatasetReport::from_events(&sample_table());
        // p1 played 2 distinct games, p2 played 1.
        let played = report.games_played_per_player.unwrap();
        assert_eq!(played.count, 2);
        assert_eq!(played.mean, 1.5);
        // p1, p2, p3 each purchased exactly one distinct game.
        let purchased = report.games_purchased_per_player.unwrap();
        assert_eq!(purchased.count, 3);
        assert_eq!(purchased.mean, 1.0);
    }

    #[test]
    fn test_top_purchased_counts_distinct_purchasers() {
        let table = EventTable::new(vec![
            // One player purchasing the same title repeatedly counts once.
            event("p1", "GameA", Action::Purchase, 1.0),
            event("p1", "GameA", Action::Purchase, 1.0),
            event("p1", "GameB", Action::Purchase, 1.0),
            event("p2", "GameB", Action::Purchase, 1.0),
        ]);
        let report = DatasetReport::from_events(&table);
        assert_eq!(
            report.top_purchased,
            vec![("GameB".to_string(), 2), ("GameA".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_table_renders_zero_counts() {
        let report = DatasetReport::from_events(&EventTable::default());
        assert_eq!(report.record_count, 0);
        assert_eq!(report.playing_player_pct, 0.0);
        assert!(report.play_time.is_none());
        assert!(report.top_purchased.is_empty());

        let text = report.to_string();
        assert!(text.contains("Number of records:"));
        assert!(text.contains("Players with play activity: 0 (0.0%)"));
        assert!(text.contains("(no data)"));
    }
}
