//! Append-only accumulation of vertices, weights and edges.

use std::collections::HashSet;
use std::iter;

use log::debug;

use crate::error::{ArgumentError, StableSetError};
use crate::{DEFAULT_WEIGHT, DuplicatePolicy, Instance, Phase, VertexId, Weight};

/// Outcome of a successful [`GraphBuilder::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsertion {
    /// The edge was stored.
    Inserted,
    /// The edge already existed and the policy was `Skip`.
    Skipped,
}

/// Mutable staging area for a graph, frozen once by [`GraphBuilder::build`].
///
/// Every mutator validates its input completely before touching any state,
/// so a failed call leaves the builder exactly as it was. After `build` the
/// builder is inert: it keeps its data but every mutator, and `build`
/// itself, fails with [`StableSetError::InvalidState`].
///
/// # Examples
/// ```
/// use stableset_core::{DuplicatePolicy, EdgeInsertion, GraphBuilder, VertexId};
///
/// # fn main() -> Result<(), stableset_core::StableSetError> {
/// let mut builder = GraphBuilder::new();
/// let a = builder.add_vertex(4)?;
/// let b = builder.add_vertex(1)?;
/// assert_eq!(builder.add_edge(a, b, DuplicatePolicy::Skip)?, EdgeInsertion::Inserted);
/// assert_eq!(builder.add_edge(b, a, DuplicatePolicy::Skip)?, EdgeInsertion::Skipped);
/// assert_eq!(builder.number_of_edges(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    weights: Vec<Weight>,
    edges: Vec<(VertexId, VertexId)>,
    edge_set: HashSet<(VertexId, VertexId)>,
    unweighted: bool,
    built: bool,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices added so far.
    #[must_use]
    pub const fn number_of_vertices(&self) -> usize {
        self.weights.len()
    }

    /// Number of edges stored so far, including parallel edges.
    #[must_use]
    pub const fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether [`set_unweighted`](Self::set_unweighted) has been called.
    #[must_use]
    pub const fn is_unweighted(&self) -> bool {
        self.unweighted
    }

    /// Current lifecycle phase: `Building` until `build` succeeds, `Built`
    /// afterwards.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.built {
            Phase::Built
        } else {
            Phase::Building
        }
    }

    /// Weight of `vertex` as the solver will see it.
    ///
    /// Returns `1` for every vertex once the builder is unweighted, whatever
    /// weight is stored.
    #[must_use]
    pub fn weight(&self, vertex: VertexId) -> Option<Weight> {
        let stored = self.weights.get(vertex.get()).copied();
        if self.unweighted {
            stored.map(|_| DEFAULT_WEIGHT)
        } else {
            stored
        }
    }

    /// Append `count` vertices of weight `1` with contiguous ids starting at
    /// the current vertex count.
    ///
    /// # Errors
    /// `InvalidState` after `build`; `ResourceExhausted` if the storage
    /// cannot grow.
    pub fn add_vertices(&mut self, count: usize) -> Result<(), StableSetError> {
        self.ensure_building("add vertices")?;
        if count == 0 {
            return Ok(());
        }
        self.weights
            .try_reserve(count)
            .map_err(|_| StableSetError::ResourceExhausted { what: "vertices" })?;
        self.weights.extend(iter::repeat_n(DEFAULT_WEIGHT, count));
        Ok(())
    }

    /// Append one vertex and return its id.
    ///
    /// # Errors
    /// `InvalidState` after `build`; `InvalidArgument` for a negative weight;
    /// `ResourceExhausted` if the storage cannot grow.
    pub fn add_vertex(&mut self, weight: Weight) -> Result<VertexId, StableSetError> {
        self.ensure_building("add a vertex")?;
        ensure_non_negative(weight)?;
        self.weights
            .try_reserve(1)
            .map_err(|_| StableSetError::ResourceExhausted { what: "vertices" })?;
        let id = VertexId::new(self.weights.len());
        self.weights.push(weight);
        Ok(id)
    }

    /// Overwrite the weight of an existing vertex.
    ///
    /// # Errors
    /// `InvalidState` after `build`; `NotFound` for an unknown vertex;
    /// `InvalidArgument` for a negative weight.
    pub fn set_weight(&mut self, vertex: VertexId, weight: Weight) -> Result<(), StableSetError> {
        self.ensure_building("set a weight")?;
        let len = self.weights.len();
        let slot = self
            .weights
            .get_mut(vertex.get())
            .ok_or_else(|| not_found(vertex, len))?;
        ensure_non_negative(weight)?;
        *slot = weight;
        Ok(())
    }

    /// Add the undirected edge `{u, v}` under `policy`.
    ///
    /// # Errors
    /// `InvalidState` after `build`; `NotFound` if either endpoint is
    /// unknown; `InvalidArgument` for a self-loop; `AlreadyExists` for a
    /// duplicate under [`DuplicatePolicy::Reject`]; `ResourceExhausted` if
    /// the storage cannot grow. The builder is unchanged on every error.
    pub fn add_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        policy: DuplicatePolicy,
    ) -> Result<EdgeInsertion, StableSetError> {
        self.ensure_building("add an edge")?;
        self.ensure_exists(u)?;
        self.ensure_exists(v)?;
        if u == v {
            return Err(ArgumentError::SelfLoop(u).into());
        }
        let key = (u.min(v), u.max(v));
        if policy.checks_duplicates() && self.edge_set.contains(&key) {
            return match policy {
                DuplicatePolicy::Reject => Err(StableSetError::AlreadyExists { u, v }),
                DuplicatePolicy::Skip | DuplicatePolicy::Ignore => Ok(EdgeInsertion::Skipped),
            };
        }
        self.edges
            .try_reserve(1)
            .map_err(|_| StableSetError::ResourceExhausted { what: "edges" })?;
        self.edge_set
            .try_reserve(1)
            .map_err(|_| StableSetError::ResourceExhausted { what: "edges" })?;
        self.edges.push(key);
        self.edge_set.insert(key);
        Ok(EdgeInsertion::Inserted)
    }

    /// Treat every vertex as weight `1`, now and for later weight updates.
    ///
    /// # Errors
    /// `InvalidState` after `build`.
    pub fn set_unweighted(&mut self) -> Result<(), StableSetError> {
        self.ensure_building("set unweighted")?;
        self.unweighted = true;
        Ok(())
    }

    /// Freeze the accumulated graph into an independent [`Instance`].
    ///
    /// Only the first call succeeds; the builder keeps its data but becomes
    /// inert.
    ///
    /// # Errors
    /// `InvalidState` if the builder was already built.
    pub fn build(&mut self) -> Result<Instance, StableSetError> {
        self.ensure_building("build")?;
        let weights = if self.unweighted {
            vec![DEFAULT_WEIGHT; self.weights.len()]
        } else {
            self.weights.clone()
        };
        let instance = Instance::from_parts(weights, &self.edges);
        self.built = true;
        debug!(
            "built instance with {} vertices and {} edges (unweighted: {})",
            instance.number_of_vertices(),
            instance.number_of_edges(),
            self.unweighted
        );
        Ok(instance)
    }

    const fn ensure_building(&self, operation: &'static str) -> Result<(), StableSetError> {
        if self.built {
            Err(StableSetError::invalid_state(operation, Phase::Built))
        } else {
            Ok(())
        }
    }

    fn ensure_exists(&self, vertex: VertexId) -> Result<(), StableSetError> {
        if vertex.get() < self.weights.len() {
            Ok(())
        } else {
            Err(not_found(vertex, self.weights.len()))
        }
    }
}

fn not_found(vertex: VertexId, len: usize) -> StableSetError {
    StableSetError::NotFound {
        vertex: i64::try_from(vertex.get()).unwrap_or(i64::MAX),
        len,
    }
}

const fn ensure_non_negative(weight: Weight) -> Result<(), StableSetError> {
    if weight < 0 {
        Err(StableSetError::InvalidArgument(
            ArgumentError::NegativeWeight(weight),
        ))
    } else {
        Ok(())
    }
}
