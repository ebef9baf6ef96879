//! `scorerank table`: league table next to ScoreRank positions.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use scorerank_league::{
    PositionComparison, TableComparison, TableRow, compare_with_table, points_table, rank_matches,
};
use serde::Serialize;

use super::rank::team_width;
use super::{MatchInput, RankOverrides};
use crate::config::ProjectConfig;
use crate::output::{OutputMode, fmt_coefficient, pretty_kv, pretty_section, render_mode};

/// Arguments for `scorerank table`.
#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: MatchInput,

    #[command(flatten)]
    pub rank: RankOverrides,
}

/// Report payload for `scorerank table`.
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: Vec<TableRow>,
    pub comparison: TableComparison,
}

impl TableReport {
    /// Comparison rows alongside the table row they came from.
    fn paired(&self) -> impl Iterator<Item = (&TableRow, &PositionComparison)> {
        self.comparison.rows.iter().filter_map(|cmp| {
            self.table
                .get(cmp.table_position.saturating_sub(1))
                .map(|row| (row, cmp))
        })
    }
}

/// Execute `scorerank table`.
pub fn run_table(args: &TableArgs, project: &ProjectConfig, output: OutputMode) -> Result<()> {
    let config = args.rank.apply(project.rank);
    let matches = args.input.load()?;

    let table = points_table(&matches);
    let graph = rank_matches(&matches, config)?;
    let comparison = compare_with_table(&table, &graph.ranked_scores()?);

    let report = TableReport { table, comparison };
    render_mode(output, &report, render_table_text, render_table_pretty)
}

fn render_table_text(report: &TableReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "pos\tteam\tplayed\tpoints\tscore_pos\tscore")?;
    for (row, cmp) in report.paired() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{:.6}",
            cmp.table_position, row.team, row.played, row.points, cmp.score_position, cmp.score
        )?;
    }
    Ok(())
}

fn render_table_pretty(report: &TableReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "League table vs ScoreRank")?;
    let width = team_width(report.table.iter().map(|r| r.team.as_str()));

    writeln!(
        w,
        "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}  {:>3} {:>8} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "Pts", "SR", "Score", "+/-"
    )?;
    for (row, cmp) in report.paired() {
        writeln!(
            w,
            "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}  {:>3} {:>8.4} {:>+4}",
            cmp.table_position,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.points,
            cmp.score_position,
            cmp.score,
            cmp.movement(),
        )?;
    }
    writeln!(w)?;
    pretty_kv(w, "spearman", fmt_coefficient(report.comparison.spearman))
}
