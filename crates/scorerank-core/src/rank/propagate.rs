//! Two-phase ScoreRank propagation.
//!
//! # Algorithm
//!
//! Each pass runs two phases over the whole vertex set:
//!
//! ```text
//! push:   for each vertex V with W_out > 0, for each neighbor N (weight w):
//!             N.scratch += V.score / W_out * w
//! commit: for each vertex V:
//!             V.score   = (1 - leak) * V.scratch + leak * baseline
//!             V.scratch = 0
//! ```
//!
//! The push phase reads scores and writes only scratch accumulators; the
//! commit phase writes only each vertex's own score. No vertex can observe a
//! neighbor's updated score within the same pass, so the result does not
//! depend on visiting order.
//!
//! # Sinks
//!
//! A vertex with zero outgoing weight sends nothing during the push phase.
//! Its score is neither forwarded nor spread across the graph, so under
//! `leak < 1` that mass leaves the system each pass. The amount is reported
//! as [`IterationReport::trapped_mass`].

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::GraphError;
use crate::graph::{Entity, ScoreGraph};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Summary of one propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationReport {
    /// Passes completed since the last redistribution, including this one.
    pub iteration: usize,
    /// L1 norm of the score change made by this pass.
    pub l1_delta: f64,
    /// Sum of all scores after the pass.
    pub total_score: f64,
    /// Score held by sinks at the start of the pass (not propagated).
    pub trapped_mass: f64,
    /// Number of sinks (vertices with zero outgoing weight).
    pub sink_count: usize,
}

/// Outcome of [`ScoreGraph::iterate_until`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Convergence {
    /// Number of passes performed.
    pub iterations: usize,
    /// Whether the L1 delta dropped below the tolerance within `max_iter`.
    pub converged: bool,
    /// L1 delta of the last pass (0.0 if no pass ran).
    pub last_delta: f64,
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

impl<K: Entity> ScoreGraph<K> {
    /// Baseline term for the current vertex count and configured mode.
    #[must_use]
    pub fn baseline_term(&self) -> f64 {
        self.config.baseline.term(self.vertices.len())
    }

    /// Reset every score to the baseline term and clear scratch accumulators.
    ///
    /// Calling it twice in a row leaves the same state as calling it once.
    #[instrument(skip(self), fields(vertices = self.vertices.len()))]
    pub fn redistribute(&mut self) {
        let baseline = self.baseline_term();
        for vertex in &mut self.vertices {
            vertex.score = Some(baseline);
            vertex.scratch = 0.0;
        }
        self.initialized = true;
        self.iterations = 0;
        debug!(baseline, "redistributed scores");
    }

    /// Run exactly one propagation pass over all vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UninitializedScore`] if any vertex has no score.
    /// The check runs before any state is touched, so a failed call leaves
    /// every score and scratch accumulator as it was.
    #[instrument(skip(self), fields(vertices = self.vertices.len(), pass = self.iterations + 1))]
    pub fn iterate(&mut self) -> Result<IterationReport, GraphError> {
        let previous = self.current_scores()?;
        let leak = self.config.leak;
        let baseline = self.baseline_term();

        // Phase 1: push. Reads `previous`, writes only scratch.
        let mut trapped_mass = 0.0;
        let mut sink_count = 0;
        for (idx, &score) in previous.iter().enumerate() {
            let out_total = self.vertices[idx].outgoing_total();
            if out_total == 0 {
                trapped_mass += score;
                sink_count += 1;
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let share = score / out_total as f64;

            // Detach the map so neighbors (including this vertex on a
            // self-loop) can be written while it is walked.
            let outgoing = std::mem::take(&mut self.vertices[idx].outgoing);
            for (&neighbor, &weight) in &outgoing {
                #[allow(clippy::cast_precision_loss)]
                let sent = share * weight as f64;
                self.vertices[neighbor.index()].scratch += sent;
                trace!(
                    from = ?self.vertices[idx].key(),
                    to = ?self.vertices[neighbor.index()].key(),
                    sent,
                    "pushed score"
                );
            }
            self.vertices[idx].outgoing = outgoing;
        }

        // Phase 2: commit. Each vertex writes only its own score.
        let mut l1_delta = 0.0;
        let mut total_score = 0.0;
        for (vertex, old) in self.vertices.iter_mut().zip(&previous) {
            let new = (1.0 - leak).mul_add(vertex.scratch, leak * baseline);
            l1_delta += (new - old).abs();
            total_score += new;
            vertex.score = Some(new);
            vertex.scratch = 0.0;
        }

        self.iterations += 1;
        debug!(l1_delta, total_score, trapped_mass, "completed pass");

        Ok(IterationReport {
            iteration: self.iterations,
            l1_delta,
            total_score,
            trapped_mass,
            sink_count,
        })
    }

    /// Run [`iterate`](Self::iterate) exactly `count` times, in sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UninitializedScore`] if the graph has not been
    /// redistributed since its last new vertex. No pass runs in that case.
    pub fn iterate_n(&mut self, count: usize) -> Result<Vec<IterationReport>, GraphError> {
        let mut reports = Vec::with_capacity(count);
        for _ in 0..count {
            reports.push(self.iterate()?);
        }
        Ok(reports)
    }

    /// Iterate until the L1 delta of a pass drops below `tolerance`, or
    /// `max_iter` passes have run.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UninitializedScore`] under the same conditions
    /// as [`iterate`](Self::iterate).
    pub fn iterate_until(
        &mut self,
        tolerance: f64,
        max_iter: usize,
    ) -> Result<Convergence, GraphError> {
        let mut outcome = Convergence {
            iterations: 0,
            converged: false,
            last_delta: 0.0,
        };

        for _ in 0..max_iter {
            let report = self.iterate()?;
            outcome.iterations += 1;
            outcome.last_delta = report.l1_delta;
            if report.l1_delta < tolerance {
                outcome.converged = true;
                break;
            }
        }

        Ok(outcome)
    }

    /// Snapshot of every score in insertion order, failing on the first
    /// unscored vertex.
    fn current_scores(&self) -> Result<Vec<f64>, GraphError> {
        self.vertices
            .iter()
            .map(|vertex| {
                vertex
                    .score()
                    .ok_or_else(|| GraphError::uninitialized(vertex.key()))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
