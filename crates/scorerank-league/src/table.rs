//! Conventional league table and its agreement with ScoreRank.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{MatchOutcome, MatchRecord};
use crate::stats::spearman;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// One team's line in the league table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TableRow {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32, points: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.points += points;
        match points {
            POINTS_FOR_WIN => self.won += 1,
            POINTS_FOR_DRAW => self.drawn += 1,
            _ => self.lost += 1,
        }
    }
}

/// Build the league table: 3 points for a win, 1 each for a draw.
///
/// The recorded result decides the points when the file has one; otherwise
/// the scoreline does. Rows are ordered by points, then team name.
#[must_use]
pub fn points_table(matches: &[MatchRecord]) -> Vec<TableRow> {
    let mut rows: HashMap<&str, TableRow> = HashMap::new();

    for m in matches {
        let (home_points, away_points) = match m.outcome() {
            MatchOutcome::HomeWin => (POINTS_FOR_WIN, 0),
            MatchOutcome::Draw => (POINTS_FOR_DRAW, POINTS_FOR_DRAW),
            MatchOutcome::AwayWin => (0, POINTS_FOR_WIN),
        };
        rows.entry(m.home_team.as_str())
            .or_insert_with(|| TableRow::new(&m.home_team))
            .record(m.home_goals, m.away_goals, home_points);
        rows.entry(m.away_team.as_str())
            .or_insert_with(|| TableRow::new(&m.away_team))
            .record(m.away_goals, m.home_goals, away_points);
    }

    let mut table: Vec<TableRow> = rows.into_values().collect();
    table.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.team.cmp(&b.team)));
    table
}

/// Where a team sits in the table and in the ScoreRank ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionComparison {
    pub team: String,
    pub points: u32,
    /// 1-based.
    pub table_position: usize,
    pub score: f64,
    /// 1-based.
    pub score_position: usize,
}

impl PositionComparison {
    /// Positive when ScoreRank rates the team higher than the table does.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn movement(&self) -> isize {
        self.table_position as isize - self.score_position as isize
    }
}

/// Side-by-side table and ScoreRank positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableComparison {
    /// In table order.
    pub rows: Vec<PositionComparison>,
    /// Spearman correlation between points and score (average ranks for
    /// ties); `None` for fewer than two teams or a flat table.
    pub spearman: Option<f64>,
}

/// Compare a league table with a ScoreRank ranking (highest score first).
///
/// Teams missing from `ranking` are left out.
#[must_use]
pub fn compare_with_table(table: &[TableRow], ranking: &[(String, f64)]) -> TableComparison {
    let score_positions: HashMap<&str, (usize, f64)> = ranking
        .iter()
        .enumerate()
        .map(|(idx, (team, score))| (team.as_str(), (idx + 1, *score)))
        .collect();

    let rows: Vec<PositionComparison> = table
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            score_positions
                .get(row.team.as_str())
                .map(|&(score_position, score)| PositionComparison {
                    team: row.team.clone(),
                    points: row.points,
                    table_position: idx + 1,
                    score,
                    score_position,
                })
        })
        .collect();

    let points: Vec<f64> = rows.iter().map(|r| f64::from(r.points)).collect();
    let scores: Vec<f64> = rows.iter().map(|r| r.score).collect();

    TableComparison {
        spearman: spearman(&points, &scores),
        rows,
    }
}
