//! Turning match results into a goal-vote graph.
//!
//! Every goal is a vote cast by the conceding side for the scoring side:
//!
//! ```text
//! Arsenal 2-1 Chelsea   ⇒   Arsenal ──1──▶ Chelsea
//!                           Chelsea ──2──▶ Arsenal
//! ```
//!
//! Both edges are always added, so a goalless draw still registers the two
//! teams (as sinks for that fixture).

use scorerank_core::{GraphError, RankConfig, ScoreGraph};
use tracing::{debug, instrument};

use crate::record::MatchRecord;

/// Build the goal-vote graph for `matches`. Scores are left uninitialized.
///
/// # Errors
///
/// Returns [`GraphError::InvalidLeak`] if `config` is invalid.
pub fn build_goal_graph(
    matches: &[MatchRecord],
    config: RankConfig,
) -> Result<ScoreGraph<String>, GraphError> {
    let mut graph = ScoreGraph::new(config)?;
    for m in matches {
        graph.add_edge(m.home_team.as_str(), m.away_team.as_str(), i64::from(m.away_goals))?;
        graph.add_edge(m.away_team.as_str(), m.home_team.as_str(), i64::from(m.home_goals))?;
    }
    debug!(matches = matches.len(), teams = graph.len(), "built goal-vote graph");
    Ok(graph)
}

/// Build the graph, redistribute, and run `config.iterations` passes.
///
/// # Errors
///
/// Returns [`GraphError::InvalidLeak`] if `config` is invalid.
#[instrument(skip_all, fields(matches = matches.len(), iterations = config.iterations))]
pub fn rank_matches(
    matches: &[MatchRecord],
    config: RankConfig,
) -> Result<ScoreGraph<String>, GraphError> {
    let mut graph = build_goal_graph(matches, config)?;
    graph.redistribute();
    graph.iterate_n(config.iterations)?;
    Ok(graph)
}
