//! Per-pass ranking snapshots for convergence reporting.
//!
//! A [`ConvergenceTrace`] answers "how many passes until the table settles?"
//! by recording the full ranking before every pass and after the last one.

use serde::Serialize;

use super::propagate::IterationReport;
use crate::error::GraphError;
use crate::graph::{Entity, ScoreGraph};

/// Ranking at one point of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<K> {
    /// Passes completed when the snapshot was taken (0 = after redistribution).
    pub iteration: usize,
    /// `(entity, score)` pairs, highest score first.
    pub ranking: Vec<(K, f64)>,
}

/// Snapshots plus per-pass reports for a sequence of passes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceTrace<K> {
    /// `iterations + 1` snapshots: the starting ranking and one per pass.
    pub snapshots: Vec<Snapshot<K>>,
    /// One report per pass.
    pub reports: Vec<IterationReport>,
}

impl<K: Entity> ConvergenceTrace<K> {
    /// Redistribute `graph`, then run `iterations` passes while recording a
    /// snapshot before each pass and after the last.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the underlying passes (not expected
    /// after a fresh redistribution).
    pub fn record(graph: &mut ScoreGraph<K>, iterations: usize) -> Result<Self, GraphError> {
        graph.redistribute();

        let mut snapshots = Vec::with_capacity(iterations + 1);
        let mut reports = Vec::with_capacity(iterations);

        snapshots.push(Snapshot {
            iteration: 0,
            ranking: graph.ranked_scores()?,
        });

        for _ in 0..iterations {
            let report = graph.iterate()?;
            snapshots.push(Snapshot {
                iteration: report.iteration,
                ranking: graph.ranked_scores()?,
            });
            reports.push(report);
        }

        Ok(Self { snapshots, reports })
    }

    /// Ranking after the last recorded pass.
    #[must_use]
    pub fn final_ranking(&self) -> &[(K, f64)] {
        self.snapshots
            .last()
            .map_or(&[][..], |snapshot| snapshot.ranking.as_slice())
    }

    /// Score of `key` at every snapshot, or `None` if it never appears.
    #[must_use]
    pub fn series(&self, key: &K) -> Option<Vec<f64>> {
        self.snapshots
            .iter()
            .map(|snapshot| {
                snapshot
                    .ranking
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|&(_, score)| score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::RankConfig;

    #[test]
    fn records_start_and_every_pass() {
        let mut g: ScoreGraph<String> = ScoreGraph::new(RankConfig::constant(0.2)).unwrap();
        g.add_edge("A", "B", 3).unwrap();
        g.add_edge("B", "A", 1).unwrap();

        let trace = ConvergenceTrace::record(&mut g, 4).unwrap();
        assert_eq!(trace.snapshots.len(), 5);
        assert_eq!(trace.reports.len(), 4);
        assert_eq!(trace.snapshots[0].iteration, 0);
        assert_eq!(trace.snapshots[4].iteration, 4);

        let series = trace.series(&"A".to_string()).unwrap();
        assert_eq!(series.len(), 5);
        assert!((series[0] - 1.0).abs() < 1e-12);
        assert_eq!(trace.final_ranking(), g.ranked_scores().unwrap().as_slice());
    }

    #[test]
    fn unknown_series_is_none() {
        let mut g: ScoreGraph<String> = ScoreGraph::default();
        g.add_edge("A", "B", 1).unwrap();
        let trace = ConvergenceTrace::record(&mut g, 1).unwrap();
        assert!(trace.series(&"Z".to_string()).is_none());
    }
}
