//! `scorerank convergence`: how each team's score moves pass by pass.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use scorerank_core::{ConvergenceTrace, IterationReport, RankConfig};
use scorerank_league::build_goal_graph;
use serde::Serialize;

use super::rank::team_width;
use super::{MatchInput, RankOverrides};
use crate::config::ProjectConfig;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `scorerank convergence`.
#[derive(Args, Debug)]
pub struct ConvergenceArgs {
    #[command(flatten)]
    pub input: MatchInput,

    #[command(flatten)]
    pub rank: RankOverrides,
}

#[derive(Debug, Serialize)]
pub struct TeamSeries {
    pub team: String,
    /// Score after redistribution, then after every pass.
    pub scores: Vec<f64>,
}

/// Report payload for `scorerank convergence`.
#[derive(Debug, Serialize)]
pub struct ConvergenceReport {
    pub config: RankConfig,
    /// Teams in final ranking order.
    pub teams: Vec<TeamSeries>,
    pub passes: Vec<IterationReport>,
}

/// Execute `scorerank convergence`.
pub fn run_convergence(
    args: &ConvergenceArgs,
    project: &ProjectConfig,
    output: OutputMode,
) -> Result<()> {
    let config = args.rank.apply(project.rank);
    let matches = args.input.load()?;
    let mut graph = build_goal_graph(&matches, config)?;
    let trace = ConvergenceTrace::record(&mut graph, config.iterations)?;

    let teams = trace
        .final_ranking()
        .iter()
        .filter_map(|(team, _)| {
            trace.series(team).map(|scores| TeamSeries {
                team: team.clone(),
                scores,
            })
        })
        .collect();

    let report = ConvergenceReport {
        config,
        teams,
        passes: trace.reports,
    };

    render_mode(output, &report, render_convergence_text, render_convergence_pretty)
}

fn render_convergence_text(report: &ConvergenceReport, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "team")?;
    for pass in 0..=report.passes.len() {
        write!(w, "\t{pass}")?;
    }
    writeln!(w)?;

    for row in &report.teams {
        write!(w, "{}", row.team)?;
        for score in &row.scores {
            write!(w, "\t{score:.6}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn render_convergence_pretty(report: &ConvergenceReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Convergence")?;
    let width = team_width(report.teams.iter().map(|t| t.team.as_str()));

    write!(w, "{:<width$}", "Team")?;
    for pass in 0..=report.passes.len() {
        write!(w, "  {pass:>8}")?;
    }
    writeln!(w)?;

    for row in &report.teams {
        write!(w, "{:<width$}", row.team)?;
        for score in &row.scores {
            write!(w, "  {score:>8.4}")?;
        }
        writeln!(w)?;
    }

    writeln!(w)?;
    write!(w, "{:<width$}  {:>8}", "L1 delta", "")?;
    for pass in &report.passes {
        write!(w, "  {:>8.4}", pass.l1_delta)?;
    }
    writeln!(w)?;
    if let Some(last) = report.passes.last().filter(|p| p.sink_count > 0) {
        writeln!(
            w,
            "\n{} team(s) conceded no goals; their score is not propagated.",
            last.sink_count
        )?;
    }
    Ok(())
}
