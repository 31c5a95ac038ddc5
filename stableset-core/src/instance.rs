//! Immutable, solver-ready graphs.

use std::collections::HashSet;

use crate::error::ProtocolError;
use crate::{Objective, VertexId, Weight};

/// A frozen graph produced once by [`GraphBuilder::build`](crate::GraphBuilder::build).
///
/// The instance owns its own copy of the weights and adjacency, so nothing
/// done to the builder afterwards can affect it. Weights are stored as the
/// engine must see them: if the builder was unweighted every weight is `1`.
/// Neighbour lists are sorted and free of parallel edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    weights: Vec<Weight>,
    adjacency: Vec<Vec<VertexId>>,
    number_of_edges: usize,
}

impl Instance {
    pub(crate) fn from_parts(weights: Vec<Weight>, edges: &[(VertexId, VertexId)]) -> Self {
        let mut adjacency = vec![Vec::new(); weights.len()];
        for &(u, v) in edges {
            if let Some(list) = adjacency.get_mut(u.get()) {
                list.push(v);
            }
            if let Some(list) = adjacency.get_mut(v.get()) {
                list.push(u);
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Self {
            weights,
            adjacency,
            number_of_edges: edges.len(),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub const fn number_of_vertices(&self) -> usize {
        self.weights.len()
    }

    /// Number of stored edges, counting parallel edges added under
    /// [`DuplicatePolicy::Ignore`](crate::DuplicatePolicy::Ignore).
    #[must_use]
    pub const fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }

    /// Whether the instance has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of `vertex`, or `None` if it does not exist.
    #[must_use]
    pub fn weight(&self, vertex: VertexId) -> Option<Weight> {
        self.weights.get(vertex.get()).copied()
    }

    /// All weights, indexed by vertex id.
    #[must_use]
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Sorted, distinct neighbours of `vertex`; empty if it does not exist.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency
            .get(vertex.get())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct neighbours of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbors(vertex).len()
    }

    /// Whether an edge joins `u` and `v`.
    #[must_use]
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Sum of all vertex weights.
    #[must_use]
    pub fn total_weight(&self) -> Objective {
        self.weights.iter().copied().map(Objective::from).sum()
    }

    /// Sum of the weights of `vertices`; ids outside the instance count as
    /// zero.
    #[must_use]
    pub fn weight_of(&self, vertices: &[VertexId]) -> Objective {
        vertices
            .iter()
            .filter_map(|&v| self.weight(v))
            .map(Objective::from)
            .sum()
    }

    /// Whether `vertices` is a stable set of this instance.
    #[must_use]
    pub fn is_stable_set(&self, vertices: &[VertexId]) -> bool {
        self.check_stable_set(vertices).is_ok()
    }

    /// Check that `vertices` are in range, distinct and pairwise
    /// non-adjacent, reporting the first violation.
    pub(crate) fn check_stable_set(&self, vertices: &[VertexId]) -> Result<(), ProtocolError> {
        let mut seen = HashSet::with_capacity(vertices.len());
        for &vertex in vertices {
            if vertex.get() >= self.number_of_vertices() {
                return Err(ProtocolError::VertexOutOfRange {
                    vertex,
                    len: self.number_of_vertices(),
                });
            }
            if !seen.insert(vertex) {
                return Err(ProtocolError::DuplicateVertex(vertex));
            }
        }
        for &u in vertices {
            if let Some(&v) = self.neighbors(u).iter().find(|v| seen.contains(v)) {
                return Err(ProtocolError::NotStable { u, v });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn id(index: usize) -> VertexId {
        VertexId::new(index)
    }

    #[fixture]
    fn path() -> Instance {
        Instance::from_parts(vec![1, 2, 3], &[(id(0), id(1)), (id(1), id(2)), (id(0), id(1))])
    }

    #[rstest]
    fn parallel_edges_are_counted_but_not_repeated(path: Instance) {
        assert_eq!(path.number_of_edges(), 3);
        assert_eq!(path.neighbors(id(1)), &[id(0), id(2)]);
        assert_eq!(path.degree(id(0)), 1);
    }

    #[rstest]
    fn adjacency_is_symmetric(path: Instance) {
        assert!(path.are_adjacent(id(0), id(1)));
        assert!(path.are_adjacent(id(1), id(0)));
        assert!(!path.are_adjacent(id(0), id(2)));
    }

    #[rstest]
    fn unknown_vertices_have_no_weight_or_neighbours(path: Instance) {
        assert_eq!(path.weight(id(7)), None);
        assert!(path.neighbors(id(7)).is_empty());
    }

    #[rstest]
    #[case(vec![0, 2], Ok(()))]
    #[case(vec![], Ok(()))]
    #[case(vec![0, 1], Err(ProtocolError::NotStable { u: id(0), v: id(1) }))]
    #[case(vec![2, 2], Err(ProtocolError::DuplicateVertex(id(2))))]
    #[case(vec![3], Err(ProtocolError::VertexOutOfRange { vertex: id(3), len: 3 }))]
    fn stable_set_check_reports_first_violation(
        path: Instance,
        #[case] vertices: Vec<usize>,
        #[case] expected: Result<(), ProtocolError>,
    ) {
        let ids: Vec<VertexId> = vertices.into_iter().map(VertexId::new).collect();
        assert_eq!(path.check_stable_set(&ids), expected);
    }

    #[rstest]
    fn weight_sums_use_the_objective_type(path: Instance) {
        assert_eq!(path.total_weight(), 6);
        assert_eq!(path.weight_of(&[id(0), id(2)]), 4);
    }
}
