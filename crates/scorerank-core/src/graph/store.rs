//! The vertex arena and its structural operations.
//!
//! [`ScoreGraph`] stores vertices densely in insertion order and keeps a
//! key → [`VertexId`] index next to them. Adjacency maps inside each
//! [`Vertex`] refer to neighbors by id, so every neighbor reference is
//! guaranteed to resolve inside the same arena.

#![allow(clippy::module_name_repetitions)]

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use super::Entity;
use super::vertex::{Vertex, VertexId};
use crate::error::GraphError;
use crate::rank::RankConfig;

// ---------------------------------------------------------------------------
// GraphState
// ---------------------------------------------------------------------------

/// Where a graph is in its scoring lifecycle.
///
/// ```text
/// Uninitialized ──redistribute──▶ Redistributed ──iterate──▶ Iterated(1) ──▶ Iterated(2) …
///       ▲                                                          │
///       └──────────────── add_node / add_edge (new entity) ────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "iterations", rename_all = "snake_case")]
pub enum GraphState {
    /// At least one vertex has no score yet.
    Uninitialized,
    /// Every vertex holds the baseline term; no propagation pass has run.
    Redistributed,
    /// `n` propagation passes have run since the last redistribution.
    Iterated(usize),
}

// ---------------------------------------------------------------------------
// ScoreGraph
// ---------------------------------------------------------------------------

/// Directed, weighted graph of entities with ScoreRank state.
///
/// The graph is append-only: vertices are created lazily by
/// [`add_node`](Self::add_node) or [`add_edge`](Self::add_edge) and never
/// removed. Scores change only through [`redistribute`](Self::redistribute)
/// and [`iterate`](Self::iterate).
#[derive(Debug, Clone)]
pub struct ScoreGraph<K> {
    pub(crate) vertices: Vec<Vertex<K>>,
    index: HashMap<K, VertexId>,
    pub(crate) config: RankConfig,
    /// True once `redistribute` has run and no vertex was added since.
    pub(crate) initialized: bool,
    /// Propagation passes since the last redistribution.
    pub(crate) iterations: usize,
}

impl<K: Entity> Default for ScoreGraph<K> {
    fn default() -> Self {
        Self::with_valid_config(RankConfig::default())
    }
}

impl<K: Entity> ScoreGraph<K> {
    /// Create an empty graph with the given ranking configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidLeak`] if `config.leak` is outside
    /// `[0, 1]`.
    pub fn new(config: RankConfig) -> Result<Self, GraphError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RankConfig) -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            config,
            initialized: false,
            iterations: 0,
        }
    }

    /// The ranking configuration this graph was created with.
    #[must_use]
    pub const fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Return `true` if no entity has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Return `true` if `key` has been added.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Register `key` as a vertex and return its id.
    ///
    /// Idempotent: an existing vertex keeps its adjacency and score. A new
    /// vertex starts without a score, which puts the graph back into
    /// [`GraphState::Uninitialized`] until the next redistribution.
    pub fn add_node(&mut self, key: impl Into<K>) -> VertexId {
        let key = key.into();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = VertexId(self.vertices.len());
        debug!(entity = ?key, id = id.index(), "added vertex");
        self.index.insert(key.clone(), id);
        self.vertices.push(Vertex::new(key));
        self.initialized = false;
        id
    }

    /// [`add_node`](Self::add_node), then [`redistribute`](Self::redistribute)
    /// so the graph is immediately scorable again.
    ///
    /// Redistribution resets every score, including those of vertices that
    /// were already propagated.
    pub fn add_node_and_redistribute(&mut self, key: impl Into<K>) -> VertexId {
        let id = self.add_node(key);
        self.redistribute();
        id
    }

    /// Record `weight` votes from `from` to `to`, creating either endpoint if
    /// needed.
    ///
    /// Multiple edges between the same ordered pair accumulate. Self-loops
    /// are allowed: the vertex becomes its own neighbor.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] for a negative weight and
    /// [`GraphError::WeightOverflow`] when the source's outgoing total or the
    /// destination's incoming total would overflow. Nothing is added in
    /// either case, not even the endpoints.
    pub fn add_edge(
        &mut self,
        from: impl Into<K>,
        to: impl Into<K>,
        weight: i64,
    ) -> Result<(), GraphError> {
        let from = from.into();
        let to = to.into();
        let Ok(votes) = u64::try_from(weight) else {
            return Err(GraphError::InvalidWeight {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
                weight,
            });
        };

        // Map entries never exceed their totals, so checking totals suffices.
        let out_total = self
            .id_of(&from)
            .map_or(0, |id| self.vertices[id.0].outgoing_total());
        let in_total = self
            .id_of(&to)
            .map_or(0, |id| self.vertices[id.0].incoming_total());
        if out_total.checked_add(votes).is_none() || in_total.checked_add(votes).is_none() {
            return Err(GraphError::WeightOverflow {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
                weight: votes,
            });
        }

        let from_id = self.add_node(from);
        let to_id = self.add_node(to);

        self.vertices[from_id.0].add_outgoing(to_id, votes);
        self.vertices[to_id.0].add_incoming(from_id, votes);

        debug!(
            from = ?self.vertices[from_id.0].key(),
            to = ?self.vertices[to_id.0].key(),
            weight = votes,
            "added edge"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Look up the id assigned to `key`.
    pub fn id_of<Q>(&self, key: &Q) -> Option<VertexId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Look up the vertex for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if `key` was never added.
    pub fn vertex<Q>(&self, key: &Q) -> Result<&Vertex<K>, GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.id_of(key)
            .map(|id| &self.vertices[id.0])
            .ok_or_else(|| GraphError::not_found(key))
    }

    /// Look up a vertex by id.
    #[must_use]
    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex<K>> {
        self.vertices.get(id.0)
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<K>> + '_ {
        self.vertices.iter()
    }

    /// All accumulated edges as `(from, to, weight)`, grouped by source in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K, u64)> + '_ {
        self.vertices.iter().flat_map(move |vertex| {
            vertex
                .outgoing()
                .iter()
                .map(move |(id, &weight)| (vertex.key(), self.vertices[id.0].key(), weight))
        })
    }

    /// Accumulated weight on the edge `from → to` (zero if absent).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFound`] if either endpoint was never added.
    pub fn edge_weight<Q>(&self, from: &Q, to: &Q) -> Result<u64, GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let source = self.vertex(from)?;
        let target = self.id_of(to).ok_or_else(|| GraphError::not_found(to))?;
        Ok(source.weight_to(target))
    }

    /// Current score of `key`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if `key` was never added.
    /// - [`GraphError::UninitializedScore`] if the vertex was added after the
    ///   last redistribution (or none has happened yet).
    pub fn get_score<Q>(&self, key: &Q) -> Result<f64, GraphError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.vertex(key)?
            .score()
            .ok_or_else(|| GraphError::uninitialized(key))
    }

    /// All `(entity, score)` pairs, highest score first.
    ///
    /// Equal scores keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UninitializedScore`] naming the first vertex
    /// without a score.
    pub fn ranked_scores(&self) -> Result<Vec<(K, f64)>, GraphError> {
        let mut ranked = self
            .vertices
            .iter()
            .map(|vertex| {
                vertex
                    .score()
                    .map(|score| (vertex.key().clone(), score))
                    .ok_or_else(|| GraphError::uninitialized(vertex.key()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked)
    }

    /// Sum of all defined scores. Diagnostic only; propagation never reads it.
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.vertices.iter().filter_map(Vertex::score).sum()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GraphState {
        if !self.initialized {
            GraphState::Uninitialized
        } else if self.iterations == 0 {
            GraphState::Redistributed
        } else {
            GraphState::Iterated(self.iterations)
        }
    }
}

impl<K: Entity> fmt::Display for ScoreGraph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScoreGraph with {} vertices", self.vertices.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
