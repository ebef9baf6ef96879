//! Match records as they appear in football-data style results files.
//!
//! # Columns
//!
//! | Column     | Meaning                       | Required |
//! |------------|-------------------------------|----------|
//! | `Date`     | `dd/mm/yy` or `dd/mm/yyyy`    | yes      |
//! | `HomeTeam` | home side                     | yes      |
//! | `AwayTeam` | away side                     | yes      |
//! | `FTHG`     | full-time home goals          | yes      |
//! | `FTAG`     | full-time away goals          | yes      |
//! | `FTR`      | full-time result, `H`/`D`/`A` | no       |
//! | `B365H`    | Bet365 home decimal odds      | no       |
//! | `B365D`    | Bet365 draw decimal odds      | no       |
//! | `B365A`    | Bet365 away decimal odds      | no       |
//!
//! Any other column is ignored.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MatchOutcome
// ---------------------------------------------------------------------------

/// Full-time result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    /// Derive the outcome from a scoreline.
    #[must_use]
    pub const fn from_goals(home_goals: u32, away_goals: u32) -> Self {
        if home_goals > away_goals {
            Self::HomeWin
        } else if home_goals < away_goals {
            Self::AwayWin
        } else {
            Self::Draw
        }
    }

    /// Parse the `FTR` column (`H`, `D` or `A`, case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" | "h" => Some(Self::HomeWin),
            "D" | "d" => Some(Self::Draw),
            "A" | "a" => Some(Self::AwayWin),
            _ => None,
        }
    }

    /// Single-letter code as written in results files.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::HomeWin => "H",
            Self::Draw => "D",
            Self::AwayWin => "A",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// MatchOdds
// ---------------------------------------------------------------------------

/// Decimal bookmaker odds for the three outcomes.
///
/// Construction guarantees every price is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchOdds {
    home: f64,
    draw: f64,
    away: f64,
}

impl MatchOdds {
    /// Build odds, returning `None` if any price is not a finite positive
    /// number.
    #[must_use]
    pub fn new(home: f64, draw: f64, away: f64) -> Option<Self> {
        let valid = |price: f64| price.is_finite() && price > 0.0;
        (valid(home) && valid(draw) && valid(away)).then_some(Self { home, draw, away })
    }

    #[must_use]
    pub const fn home(&self) -> f64 {
        self.home
    }

    #[must_use]
    pub const fn draw(&self) -> f64 {
        self.draw
    }

    #[must_use]
    pub const fn away(&self) -> f64 {
        self.away
    }
}

// ---------------------------------------------------------------------------
// MatchRecord
// ---------------------------------------------------------------------------

/// One played match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    /// Result column as recorded, if the file has one.
    pub result: Option<MatchOutcome>,
    /// Bet365 prices, if all three are present.
    pub odds: Option<MatchOdds>,
}

impl MatchRecord {
    /// Recorded result, falling back to the scoreline.
    #[must_use]
    pub fn outcome(&self) -> MatchOutcome {
        self.result
            .unwrap_or_else(|| MatchOutcome::from_goals(self.home_goals, self.away_goals))
    }

    /// Return `true` if `team` played in this match.
    #[must_use]
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// A row exactly as deserialized from CSV, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawMatchRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HomeTeam", default)]
    pub home_team: String,
    #[serde(rename = "AwayTeam", default)]
    pub away_team: String,
    #[serde(rename = "FTHG", default)]
    pub home_goals: Option<u32>,
    #[serde(rename = "FTAG", default)]
    pub away_goals: Option<u32>,
    #[serde(rename = "FTR", default)]
    pub result: Option<String>,
    #[serde(rename = "B365H", default)]
    pub odds_home: Option<f64>,
    #[serde(rename = "B365D", default)]
    pub odds_draw: Option<f64>,
    #[serde(rename = "B365A", default)]
    pub odds_away: Option<f64>,
}

const DATE_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

/// Parse a results-file date, accepting two- and four-digit years.
#[must_use]
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Order matters: `%Y` would read "14" as the year 14.
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
