//! End-to-end propagation tests over hand-built and seeded random graphs.
//!
//! # Test Strategy
//!
//! 1. Build small league-shaped graphs by hand and check the lifecycle
//!    (`add_edge` → `redistribute` → `iterate_n` → `ranked_scores`).
//! 2. Generate seeded random goal-vote graphs and check invariants that
//!    must hold for any input: scratch is cleared, no score goes negative,
//!    the leak floor is respected, and the ranking is sorted.
//! 3. Compare repeated runs on identical input for determinism.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scorerank_core::{BaselineMode, GraphError, GraphState, GraphStats, RankConfig, ScoreGraph};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EPSILON: f64 = 1e-9;

/// Record one match the way the goal-vote model does: every goal conceded
/// is a vote from the conceding side to the scoring side.
fn play(graph: &mut ScoreGraph<String>, home: &str, away: &str, home_goals: i64, away_goals: i64) {
    graph.add_edge(home, away, away_goals).unwrap();
    graph.add_edge(away, home, home_goals).unwrap();
}

/// A tiny four-team round robin where `Leeds` wins everything.
fn mini_league(config: RankConfig) -> ScoreGraph<String> {
    let mut g = ScoreGraph::new(config).unwrap();
    play(&mut g, "Leeds", "Derby", 3, 0);
    play(&mut g, "Leeds", "Hull", 2, 1);
    play(&mut g, "Leeds", "Stoke", 4, 1);
    play(&mut g, "Derby", "Hull", 1, 1);
    play(&mut g, "Derby", "Stoke", 2, 2);
    play(&mut g, "Hull", "Stoke", 0, 1);
    g
}

/// Random goal-vote graph: `matches` fixtures between `teams` teams with
/// goal counts in `0..=max_goals`.
fn random_league(
    seed: u64,
    teams: usize,
    matches: usize,
    max_goals: i64,
) -> Vec<(String, String, i64, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..teams).map(|i| format!("t{i}")).collect();

    let mut fixtures = Vec::with_capacity(matches);
    while fixtures.len() < matches {
        let home = rng.gen_range(0..teams);
        let away = rng.gen_range(0..teams);
        if home == away {
            continue;
        }
        fixtures.push((
            names[home].clone(),
            names[away].clone(),
            rng.gen_range(0..=max_goals),
            rng.gen_range(0..=max_goals),
        ));
    }
    fixtures
}

fn build(config: RankConfig, fixtures: &[(String, String, i64, i64)]) -> ScoreGraph<String> {
    let mut g = ScoreGraph::new(config).unwrap();
    for (home, away, hg, ag) in fixtures {
        play(&mut g, home, away, *hg, *ag);
    }
    g
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn dominant_team_ranks_first() {
    let mut g = mini_league(RankConfig::default());
    g.redistribute();
    g.iterate_n(5).unwrap();

    let ranked = g.ranked_scores().unwrap();
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].0, "Leeds");
    assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn full_lifecycle_states() {
    let mut g = mini_league(RankConfig::default());
    assert_eq!(g.state(), GraphState::Uninitialized);
    assert!(matches!(g.ranked_scores(), Err(GraphError::UninitializedScore { .. })));

    g.redistribute();
    assert_eq!(g.state(), GraphState::Redistributed);
    assert!((g.total_score() - 4.0).abs() < EPSILON);

    g.iterate_n(3).unwrap();
    assert_eq!(g.state(), GraphState::Iterated(3));

    play(&mut g, "Leeds", "Wigan", 1, 0);
    assert_eq!(g.state(), GraphState::Uninitialized);
    assert!(g.iterate().is_err());

    g.redistribute();
    assert_eq!(g.ranked_scores().unwrap().len(), 5);
}

#[test]
fn unknown_team_is_not_found() {
    let mut g = mini_league(RankConfig::default());
    g.redistribute();
    let err = g.get_score("Arsenal").unwrap_err();
    assert_eq!(err.code(), scorerank_core::ErrorCode::EntityNotFound);
    assert!(err.to_string().contains("Arsenal"));
}

#[test]
fn invalid_leak_rejected_at_construction() {
    let err = ScoreGraph::<String>::new(RankConfig::constant(1.5)).unwrap_err();
    assert!(matches!(err, GraphError::InvalidLeak(_)));
}

#[test]
fn goalless_draw_adds_teams_without_votes() {
    let mut g: ScoreGraph<String> = ScoreGraph::default();
    play(&mut g, "Hull", "Stoke", 0, 0);

    let stats = GraphStats::from_graph(&g);
    assert_eq!(stats.vertex_count, 2);
    assert_eq!(stats.total_weight, 0);

    g.redistribute();
    g.iterate().unwrap();
    // Both are sinks: only the leak term survives.
    assert!((g.get_score("Hull").unwrap() - 0.2).abs() < EPSILON);
    assert!((g.get_score("Stoke").unwrap() - 0.2).abs() < EPSILON);
}

// ---------------------------------------------------------------------------
// Random graph invariants
// ---------------------------------------------------------------------------

#[test]
fn random_graphs_keep_scores_bounded_and_scratch_clear() {
    for seed in 0..40_u64 {
        let fixtures = random_league(seed, 12, 40, 4);
        let mut g = build(RankConfig::default(), &fixtures);
        g.redistribute();

        for report in g.iterate_n(8).unwrap() {
            assert!(report.l1_delta.is_finite(), "seed {seed}");
            assert!(report.trapped_mass >= 0.0, "seed {seed}");
        }

        let floor = 0.2 * g.baseline_term();
        for vertex in g.vertices() {
            let score = vertex.score().unwrap();
            assert!(score >= floor - EPSILON, "seed {seed}: {score} below leak floor");
            assert!(vertex.scratch() == 0.0, "seed {seed}: scratch not cleared");
        }
    }
}

#[test]
fn normalized_total_never_exceeds_one() {
    for seed in 100..130_u64 {
        let fixtures = random_league(seed, 8, 20, 3);
        let mut g = build(RankConfig::normalized(0.15), &fixtures);
        g.redistribute();
        for report in g.iterate_n(10).unwrap() {
            assert!(report.total_score <= 1.0 + EPSILON, "seed {seed}");
        }
        assert_eq!(g.config().baseline, BaselineMode::Normalized);
    }
}

#[test]
fn identical_input_gives_identical_ranking() {
    let fixtures = random_league(7, 20, 120, 5);

    let mut first = build(RankConfig::default(), &fixtures);
    first.redistribute();
    first.iterate_n(6).unwrap();

    let mut second = build(RankConfig::default(), &fixtures);
    second.redistribute();
    second.iterate_n(6).unwrap();

    assert_eq!(first.ranked_scores().unwrap(), second.ranked_scores().unwrap());
}

#[test]
fn rerun_after_redistribute_matches_first_run() {
    let fixtures = random_league(11, 10, 50, 4);
    let mut g = build(RankConfig::default(), &fixtures);

    g.redistribute();
    g.iterate_n(5).unwrap();
    let first = g.ranked_scores().unwrap();

    g.redistribute();
    g.iterate_n(5).unwrap();
    assert_eq!(first, g.ranked_scores().unwrap());
}

#[test]
fn convergence_on_strongly_connected_league() {
    // A double round robin with at least one goal each way is strongly
    // connected and sink-free, so the iteration is a contraction.
    const GOALS: [i64; 3] = [1, 2, 3];
    let teams = ["A", "B", "C", "D", "E"];
    let mut g: ScoreGraph<String> = ScoreGraph::new(RankConfig::normalized(0.15)).unwrap();
    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate() {
            if i != j {
                play(&mut g, home, away, GOALS[i % 3], GOALS[j % 2]);
            }
        }
    }

    g.redistribute();
    let outcome = g.iterate_until(1e-12, 1_000).unwrap();
    assert!(outcome.converged);
    assert!((g.total_score() - 1.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Serialized shapes
// ---------------------------------------------------------------------------

#[test]
fn lifecycle_state_serializes_as_tagged_object() {
    let mut g = mini_league(RankConfig::default());
    assert_eq!(
        serde_json::to_value(g.state()).unwrap(),
        json!({ "state": "uninitialized" })
    );

    g.redistribute();
    assert_eq!(
        serde_json::to_value(g.state()).unwrap(),
        json!({ "state": "redistributed" })
    );

    g.iterate_n(3).unwrap();
    assert_eq!(
        serde_json::to_value(g.state()).unwrap(),
        json!({ "state": "iterated", "iterations": 3 })
    );
}

#[test]
fn iteration_report_serializes_flat() {
    let mut g = mini_league(RankConfig::default());
    g.redistribute();
    let report = g.iterate().unwrap();

    let v = serde_json::to_value(report).unwrap();
    let mut keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["iteration", "l1_delta", "sink_count", "total_score", "trapped_mass"]
    );
    assert_eq!(v["iteration"], 1);
    assert_eq!(v["sink_count"], 0);
    // No sinks: four teams keep a total of four.
    assert!((v["total_score"].as_f64().unwrap() - 4.0).abs() < 1e-9);
    assert!(v["trapped_mass"].as_f64().unwrap().abs() < 1e-12);
}

#[test]
fn convergence_serializes_outcome() {
    let mut g = mini_league(RankConfig::default());
    g.redistribute();
    let outcome = g.iterate_until(1e-9, 500).unwrap();

    let v = serde_json::to_value(outcome).unwrap();
    assert_eq!(v["converged"], true);
    assert!(v["iterations"].as_u64().unwrap() <= 500);
    assert!(v["last_delta"].as_f64().unwrap() < 1e-9);
}
