//! `scorerank rank`: the ScoreRank table.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use scorerank_core::{GraphState, RankConfig};
use scorerank_league::rank_matches;
use serde::Serialize;

use super::{MatchInput, RankOverrides};
use crate::config::ProjectConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `scorerank rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: MatchInput,

    #[command(flatten)]
    pub rank: RankOverrides,

    /// Show only the first N teams.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankedTeam {
    pub position: usize,
    pub team: String,
    pub score: f64,
}

/// Report payload for `scorerank rank`.
#[derive(Debug, Serialize)]
pub struct RankReport {
    pub matches: usize,
    pub teams: usize,
    pub config: RankConfig,
    pub state: GraphState,
    pub total_score: f64,
    pub ranking: Vec<RankedTeam>,
}

/// Execute `scorerank rank`.
pub fn run_rank(args: &RankArgs, project: &ProjectConfig, output: OutputMode) -> Result<()> {
    let config = args.rank.apply(project.rank);
    let matches = args.input.load()?;
    let graph = rank_matches(&matches, config)?;

    let ranking = graph
        .ranked_scores()?
        .into_iter()
        .take(args.top.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, (team, score))| RankedTeam {
            position: idx + 1,
            team,
            score,
        })
        .collect();

    let report = RankReport {
        matches: matches.len(),
        teams: graph.len(),
        config,
        state: graph.state(),
        total_score: graph.total_score(),
        ranking,
    };

    render_mode(output, &report, render_rank_text, render_rank_pretty)
}

fn render_rank_text(report: &RankReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.ranking {
        writeln!(w, "{}\t{}\t{:.6}", row.position, row.team, row.score)?;
    }
    Ok(())
}

fn render_rank_pretty(report: &RankReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "ScoreRank")?;
    pretty_kv(w, "matches", report.matches.to_string())?;
    pretty_kv(w, "teams", report.teams.to_string())?;
    pretty_kv(
        w,
        "model",
        format!(
            "leak {} · {:?} baseline · {} passes",
            report.config.leak, report.config.baseline, report.config.iterations
        ),
    )?;
    writeln!(w)?;

    let width = team_width(report.ranking.iter().map(|r| r.team.as_str()));
    writeln!(w, "{:>3}  {:<width$}  {:>9}", "#", "Team", "Score")?;
    for row in &report.ranking {
        writeln!(w, "{:>3}  {:<width$}  {:>9.4}", row.position, row.team, row.score)?;
    }
    Ok(())
}

/// Column width for team names, never narrower than the header.
pub fn team_width<'a>(teams: impl Iterator<Item = &'a str>) -> usize {
    teams.map(str::len).max().unwrap_or(0).max(4)
}
