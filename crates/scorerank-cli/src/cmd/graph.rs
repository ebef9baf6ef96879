//! `scorerank graph`: structure of the goal-vote graph.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use scorerank_core::GraphStats;
use scorerank_league::build_goal_graph;
use serde::Serialize;

use super::MatchInput;
use crate::config::ProjectConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render, render_mode};

/// Arguments for `scorerank graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub input: MatchInput,

    /// Emit Graphviz DOT instead of statistics.
    #[arg(long)]
    pub dot: bool,
}

/// One accumulated goal vote: `from` conceded `weight` goals to `to`.
#[derive(Debug, Serialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

/// Report payload for `scorerank graph`.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub stats: GraphStats,
    pub edges: Vec<EdgeRow>,
}

#[derive(Debug, Serialize)]
struct DotReport {
    dot: String,
}

/// Execute `scorerank graph`.
pub fn run_graph(args: &GraphArgs, project: &ProjectConfig, output: OutputMode) -> Result<()> {
    let matches = args.input.load()?;
    let graph = build_goal_graph(&matches, project.rank)?;

    if args.dot {
        let report = DotReport {
            dot: graph.to_dot(),
        };
        return render(output, &report, |r, w| write!(w, "{}", r.dot));
    }

    let mut edges: Vec<EdgeRow> = graph
        .edges()
        .map(|(from, to, weight)| EdgeRow {
            from: from.clone(),
            to: to.clone(),
            weight,
        })
        .collect();
    edges.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.from.cmp(&b.from)));

    let report = GraphReport {
        stats: GraphStats::from_graph(&graph),
        edges,
    };
    render_mode(output, &report, render_graph_text, render_graph_pretty)
}

fn render_graph_text(report: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    for edge in &report.edges {
        writeln!(w, "{}\t{}\t{}", edge.from, edge.to, edge.weight)?;
    }
    Ok(())
}

fn render_graph_pretty(report: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    pretty_section(w, "Goal-vote graph")?;
    pretty_kv(w, "teams", s.vertex_count.to_string())?;
    pretty_kv(w, "edges", s.edge_count.to_string())?;
    pretty_kv(w, "total goals", s.total_weight.to_string())?;
    pretty_kv(w, "density", format!("{:.3}", s.density))?;
    pretty_kv(w, "components", s.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "sinks", s.sink_count.to_string())?;
    pretty_kv(w, "sources", s.source_count.to_string())?;
    pretty_kv(w, "isolated", s.isolated_count.to_string())?;
    pretty_kv(w, "max conceded", s.max_out_weight.to_string())?;
    pretty_kv(w, "max scored", s.max_in_weight.to_string())?;
    if s.has_sinks() {
        writeln!(
            w,
            "\nTeams that conceded nothing keep their score out of circulation."
        )?;
    }
    Ok(())
}
