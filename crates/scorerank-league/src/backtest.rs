//! Rolling backtest of ScoreRank against bookmaker odds.
//!
//! # Procedure
//!
//! 1. Sort all matches by date.
//! 2. Skip the first `history` matches; they only seed the window.
//! 3. For every later match, take the `history` matches strictly before the
//!    first match played on the same date. The graph is rebuilt only when
//!    the date changes, so same-day fixtures share one model and never see
//!    each other's results.
//! 4. Skip the match if either team appears fewer than `min_appearances`
//!    times in the window, or the match has no odds.
//! 5. Predict `score(home) - score(away)` and pair it with the bookmaker's
//!    implied outcome.
//!
//! The report carries the Pearson correlation of the pairs and its square.

use std::collections::HashMap;

use chrono::NaiveDate;
use scorerank_core::{GraphError, RankConfig, ScoreGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bookie::implied_outcome;
use crate::goal_votes::rank_matches;
use crate::load::sort_by_date;
use crate::record::MatchRecord;
use crate::stats::pearson;

/// Backtest window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Matches in the rolling window (one Premier League season is 380).
    #[serde(default = "default_history")]
    pub history: usize,
    /// Appearances each team needs inside the window to be predicted.
    #[serde(default = "default_min_appearances")]
    pub min_appearances: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            history: default_history(),
            min_appearances: default_min_appearances(),
        }
    }
}

const fn default_history() -> usize {
    380
}

const fn default_min_appearances() -> usize {
    3
}

/// A single predicted match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    /// `score(home) - score(away)` from the window's graph.
    pub scorerank: f64,
    /// Bookmaker implied outcome in `[-1, 1]`.
    pub bookie: f64,
}

/// Outcome of [`run_backtest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub predictions: Vec<Prediction>,
    /// Matches used only to seed the first window.
    pub warmup: usize,
    /// Matches skipped because a team had too few appearances in the window.
    pub skipped_sparse: usize,
    /// Matches skipped for lack of odds.
    pub skipped_no_odds: usize,
    /// Number of distinct windows (one per match date) that were ranked.
    pub windows: usize,
    pub correlation: Option<f64>,
    pub r_squared: Option<f64>,
}

/// Run the rolling backtest.
///
/// # Errors
///
/// Returns [`GraphError::InvalidLeak`] if `rank` is invalid.
#[instrument(skip_all, fields(matches = matches.len(), history = config.history))]
pub fn run_backtest(
    matches: &[MatchRecord],
    rank: RankConfig,
    config: &BacktestConfig,
) -> Result<BacktestReport, GraphError> {
    rank.validate()?;

    let mut sorted = matches.to_vec();
    sort_by_date(&mut sorted);

    let mut report = BacktestReport {
        predictions: Vec::new(),
        warmup: config.history.min(sorted.len()),
        skipped_sparse: 0,
        skipped_no_odds: 0,
        windows: 0,
        correlation: None,
        r_squared: None,
    };

    let mut day_start = 0;
    let mut model: Option<Window> = None;

    for (idx, m) in sorted.iter().enumerate().skip(config.history) {
        if sorted[day_start].date != m.date {
            // The first match of this date may precede `history`.
            day_start = idx;
            while day_start > 0 && sorted[day_start - 1].date == m.date {
                day_start -= 1;
            }
        }

        let window = match model {
            Some(ref window) if window.start_idx == day_start => window,
            _ => {
                let slice = &sorted[day_start.saturating_sub(config.history)..day_start];
                debug!(date = %m.date, window = slice.len(), "ranking window");
                report.windows += 1;
                &*model.insert(Window::build(slice, rank, day_start)?)
            }
        };

        if !window.has_enough(&m.home_team, config.min_appearances)
            || !window.has_enough(&m.away_team, config.min_appearances)
        {
            report.skipped_sparse += 1;
            continue;
        }
        let Some(odds) = m.odds else {
            report.skipped_no_odds += 1;
            continue;
        };

        let scorerank = window.graph.get_score(m.home_team.as_str())?
            - window.graph.get_score(m.away_team.as_str())?;
        report.predictions.push(Prediction {
            date: m.date,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            scorerank,
            bookie: implied_outcome(&odds),
        });
    }

    let xs: Vec<f64> = report.predictions.iter().map(|p| p.scorerank).collect();
    let ys: Vec<f64> = report.predictions.iter().map(|p| p.bookie).collect();
    report.correlation = pearson(&xs, &ys);
    report.r_squared = report.correlation.map(|r| r * r);

    info!(
        predictions = report.predictions.len(),
        windows = report.windows,
        skipped_sparse = report.skipped_sparse,
        skipped_no_odds = report.skipped_no_odds,
        r_squared = report.r_squared,
        "backtest complete"
    );
    Ok(report)
}

/// A ranked graph plus appearance counts for one window.
struct Window {
    start_idx: usize,
    graph: ScoreGraph<String>,
    appearances: HashMap<String, usize>,
}

impl Window {
    fn build(
        slice: &[MatchRecord],
        rank: RankConfig,
        start_idx: usize,
    ) -> Result<Self, GraphError> {
        let mut appearances: HashMap<String, usize> = HashMap::new();
        for m in slice {
            *appearances.entry(m.home_team.clone()).or_default() += 1;
            *appearances.entry(m.away_team.clone()).or_default() += 1;
        }
        Ok(Self {
            start_idx,
            graph: rank_matches(slice, rank)?,
            appearances,
        })
    }

    fn has_enough(&self, team: &str, min: usize) -> bool {
        self.appearances.get(team).copied().unwrap_or(0) >= min.max(1)
    }
}
