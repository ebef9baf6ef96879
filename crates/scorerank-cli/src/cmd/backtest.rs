//! `scorerank backtest`: rolling-window predictions against bookmaker odds.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use scorerank_core::RankConfig;
use scorerank_league::{BacktestConfig, BacktestReport, run_backtest};
use serde::Serialize;

use super::{MatchInput, RankOverrides};
use crate::config::ProjectConfig;
use crate::output::{OutputMode, fmt_coefficient, pretty_kv, pretty_section, render_mode};

/// Arguments for `scorerank backtest`.
#[derive(Args, Debug)]
pub struct BacktestArgs {
    #[command(flatten)]
    pub input: MatchInput,

    #[command(flatten)]
    pub rank: RankOverrides,

    /// Matches in the rolling history window.
    #[arg(long)]
    pub history: Option<usize>,

    /// Appearances each team needs in the window to be predicted.
    #[arg(long)]
    pub min_appearances: Option<usize>,

    /// List every prediction, not just the summary.
    #[arg(long)]
    pub predictions: bool,
}

impl BacktestArgs {
    fn backtest_config(&self, base: BacktestConfig) -> BacktestConfig {
        BacktestConfig {
            history: self.history.unwrap_or(base.history),
            min_appearances: self.min_appearances.unwrap_or(base.min_appearances),
        }
    }
}

/// Report payload for `scorerank backtest`.
#[derive(Debug, Serialize)]
pub struct BacktestOutput {
    pub rank: RankConfig,
    pub backtest: BacktestConfig,
    #[serde(flatten)]
    pub report: BacktestReport,
    #[serde(skip)]
    show_predictions: bool,
}

/// Execute `scorerank backtest`.
pub fn run_backtest_cmd(
    args: &BacktestArgs,
    project: &ProjectConfig,
    output: OutputMode,
) -> Result<()> {
    let rank = args.rank.apply(project.rank);
    let backtest = args.backtest_config(project.backtest);
    let matches = args.input.load()?;

    let report = run_backtest(&matches, rank, &backtest)?;
    let payload = BacktestOutput {
        rank,
        backtest,
        report,
        show_predictions: args.predictions,
    };
    render_mode(output, &payload, render_backtest_text, render_backtest_pretty)
}

fn render_backtest_text(out: &BacktestOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if out.show_predictions {
        writeln!(w, "date\thome\taway\tscorerank\tbookie")?;
        for p in &out.report.predictions {
            writeln!(
                w,
                "{}\t{}\t{}\t{:.6}\t{:.6}",
                p.date, p.home_team, p.away_team, p.scorerank, p.bookie
            )?;
        }
        return Ok(());
    }
    let report = &out.report;
    writeln!(w, "predictions\t{}", report.predictions.len())?;
    writeln!(w, "correlation\t{}", fmt_coefficient(report.correlation))?;
    writeln!(w, "r_squared\t{}", fmt_coefficient(report.r_squared))
}

fn render_backtest_pretty(out: &BacktestOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let report = &out.report;
    pretty_section(w, "Backtest")?;
    pretty_kv(
        w,
        "window",
        format!(
            "{} matches · {} appearance(s) per team",
            out.backtest.history, out.backtest.min_appearances
        ),
    )?;
    pretty_kv(w, "warmup", report.warmup.to_string())?;
    pretty_kv(w, "windows built", report.windows.to_string())?;
    pretty_kv(w, "predictions", report.predictions.len().to_string())?;
    pretty_kv(
        w,
        "skipped",
        format!(
            "{} sparse · {} without odds",
            report.skipped_sparse, report.skipped_no_odds
        ),
    )?;
    pretty_kv(w, "correlation", fmt_coefficient(report.correlation))?;
    pretty_kv(w, "r squared", fmt_coefficient(report.r_squared))?;

    if out.show_predictions && !report.predictions.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{:<10}  {:<20}  {:<20}  {:>9}  {:>9}",
            "Date", "Home", "Away", "ScoreRank", "Bookie"
        )?;
        for p in &report.predictions {
            writeln!(
                w,
                "{:<10}  {:<20}  {:<20}  {:>9.4}  {:>9.4}",
                p.date.to_string(),
                p.home_team,
                p.away_team,
                p.scorerank,
                p.bookie
            )?;
        }
    }
    Ok(())
}
