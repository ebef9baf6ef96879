//! Per-entity adjacency and score state.
//!
//! A [`Vertex`] never points at another vertex directly. Neighbors are
//! recorded by [`VertexId`], a dense index into the owning graph's vertex
//! store, so the graph stays a plain tree of owned data with no reference
//! cycles between vertices.

use std::collections::BTreeMap;

/// Dense index of a vertex inside its owning [`ScoreGraph`](super::ScoreGraph).
///
/// Ids are assigned in insertion order and never reused; vertices are never
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of the vertex in the graph's insertion order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entity with its accumulated goal votes and current score.
///
/// Adjacency maps are ordered by [`VertexId`] so propagation visits
/// neighbors in insertion order, which keeps floating-point summation
/// reproducible across runs.
#[derive(Debug, Clone)]
pub struct Vertex<K> {
    key: K,
    /// `None` until the graph is redistributed.
    pub(crate) score: Option<f64>,
    /// Mass received during the current propagation pass; zero between passes.
    pub(crate) scratch: f64,
    pub(crate) outgoing: BTreeMap<VertexId, u64>,
    incoming: BTreeMap<VertexId, u64>,
    outgoing_total: u64,
    incoming_total: u64,
}

impl<K> Vertex<K> {
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            score: None,
            scratch: 0.0,
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
            outgoing_total: 0,
            incoming_total: 0,
        }
    }

    /// Record `weight` more votes sent from this vertex to `neighbor`.
    ///
    /// Repeated calls for the same neighbor accumulate. A zero weight still
    /// creates the map entry (a 0-0 draw is a real fixture) but leaves the
    /// total unchanged. The graph checks both totals for overflow first.
    pub(crate) fn add_outgoing(&mut self, neighbor: VertexId, weight: u64) {
        self.outgoing_total += weight;
        *self.outgoing.entry(neighbor).or_insert(0) += weight;
    }

    /// Mirror of [`add_outgoing`](Self::add_outgoing) for the receiving side.
    pub(crate) fn add_incoming(&mut self, neighbor: VertexId, weight: u64) {
        self.incoming_total += weight;
        *self.incoming.entry(neighbor).or_insert(0) += weight;
    }

    /// The entity this vertex represents.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Current score, or `None` before the first redistribution.
    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        self.score
    }

    /// Scratch accumulator. Always zero outside of a propagation pass.
    #[must_use]
    pub const fn scratch(&self) -> f64 {
        self.scratch
    }

    /// Outgoing neighbors and their accumulated weights.
    #[must_use]
    pub const fn outgoing(&self) -> &BTreeMap<VertexId, u64> {
        &self.outgoing
    }

    /// Incoming neighbors and their accumulated weights.
    #[must_use]
    pub const fn incoming(&self) -> &BTreeMap<VertexId, u64> {
        &self.incoming
    }

    /// Sum of all outgoing weights; the denominator used when pushing score.
    #[must_use]
    pub const fn outgoing_total(&self) -> u64 {
        self.outgoing_total
    }

    /// Sum of all incoming weights.
    #[must_use]
    pub const fn incoming_total(&self) -> u64 {
        self.incoming_total
    }

    /// Accumulated weight from this vertex to `neighbor` (zero if no edge).
    #[must_use]
    pub fn weight_to(&self, neighbor: VertexId) -> u64 {
        self.outgoing.get(&neighbor).copied().unwrap_or(0)
    }

    /// A sink has no outgoing weight and keeps its score out of propagation.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        self.outgoing_total == 0
    }
}
