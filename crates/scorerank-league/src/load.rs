//! CSV loading for match results.
//!
//! Files are read with the `csv` crate and deserialized through serde into
//! [`RawMatchRow`], then validated into [`MatchRecord`]s. Rows that cannot
//! describe a played match (blank teams, missing goals) are skipped with a
//! warning; rows that are present but malformed fail the whole load.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::record::{MatchOdds, MatchOutcome, MatchRecord, RawMatchRow, parse_match_date};

/// Errors raised while reading results files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file is not valid CSV, or a field has the wrong type.
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: unrecognised date {value:?}")]
    InvalidDate {
        path: String,
        line: u64,
        value: String,
    },

    #[error("{path}:{line}: unrecognised result {value:?} (expected H, D or A)")]
    InvalidResult {
        path: String,
        line: u64,
        value: String,
    },

    #[error("{path}:{line}: bookmaker odds must be positive numbers")]
    InvalidOdds { path: String, line: u64 },
}

impl LoadError {
    fn csv(path: &str, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_string(),
            source,
        }
    }
}

/// Read and concatenate several results files, in the order given.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered; nothing is returned from
/// earlier files in that case.
#[instrument(skip_all, fields(files = paths.len()))]
pub fn load_matches<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<MatchRecord>, LoadError> {
    let mut matches = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        matches.extend(read_matches(file, &display)?);
    }
    debug!(total = matches.len(), "combined results files");
    Ok(matches)
}

/// Read results from any reader. `source` names the input in errors and
/// logs.
///
/// # Errors
///
/// Returns a [`LoadError`] for malformed CSV, dates, results or odds.
pub fn read_matches<R: io::Read>(reader: R, source: &str) -> Result<Vec<MatchRecord>, LoadError> {
    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|e| LoadError::csv(source, e))?
        .clone();

    let mut matches = Vec::new();
    for row in csv.records() {
        let row = row.map_err(|e| LoadError::csv(source, e))?;
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawMatchRow = row
            .deserialize(Some(&headers))
            .map_err(|e| LoadError::csv(source, e))?;
        if let Some(record) = validate_row(raw, source, line)? {
            matches.push(record);
        }
    }

    debug!(source, count = matches.len(), "read matches");
    Ok(matches)
}

fn validate_row(raw: RawMatchRow, path: &str, line: u64) -> Result<Option<MatchRecord>, LoadError> {
    if raw.home_team.is_empty() || raw.away_team.is_empty() {
        warn!(path, line, "skipping row without both team names");
        return Ok(None);
    }
    let (Some(home_goals), Some(away_goals)) = (raw.home_goals, raw.away_goals) else {
        warn!(
            path,
            line,
            home = %raw.home_team,
            away = %raw.away_team,
            "skipping row without a score"
        );
        return Ok(None);
    };

    let date = parse_match_date(&raw.date).ok_or_else(|| LoadError::InvalidDate {
        path: path.to_string(),
        line,
        value: raw.date.clone(),
    })?;

    let result = match raw.result.as_deref() {
        None | Some("") => None,
        Some(code) => Some(MatchOutcome::from_code(code).ok_or_else(|| {
            LoadError::InvalidResult {
                path: path.to_string(),
                line,
                value: code.to_string(),
            }
        })?),
    };

    let odds = match (raw.odds_home, raw.odds_draw, raw.odds_away) {
        (Some(home), Some(draw), Some(away)) => Some(MatchOdds::new(home, draw, away).ok_or_else(
            || LoadError::InvalidOdds {
                path: path.to_string(),
                line,
            },
        )?),
        _ => None,
    };

    Ok(Some(MatchRecord {
        date,
        home_team: raw.home_team,
        away_team: raw.away_team,
        home_goals,
        away_goals,
        result,
        odds,
    }))
}

/// Stable sort by match date; matches on the same day keep file order.
pub fn sort_by_date(matches: &mut [MatchRecord]) {
    matches.sort_by_key(|m| m.date);
}
