//! Exact branch-and-bound for the maximum-weight stable set.

use std::cmp::Reverse;

use log::{trace, warn};
use stableset_core::{Instance, Objective, VertexId};

use crate::greedy;

/// Outcome of a branch-and-bound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExactOutcome {
    pub(crate) vertices: Vec<VertexId>,
    /// Whether the search was cut short by the node limit, in which case the
    /// vertices are the best set seen so far rather than a proven optimum.
    pub(crate) truncated: bool,
}

/// Maximise the selected weight exactly, starting from the `gwmin` set as
/// the incumbent. `node_limit` caps the number of explored nodes.
pub(crate) fn branch_and_bound(instance: &Instance, node_limit: Option<u64>) -> ExactOutcome {
    let incumbent = greedy::gwmin(instance);
    let mut search = Search {
        instance,
        best_weight: instance.weight_of(&incumbent),
        best: incumbent,
        nodes: 0,
        node_limit,
        truncated: false,
    };

    let mut candidates: Vec<VertexId> = (0..instance.number_of_vertices())
        .map(VertexId::new)
        .collect();
    candidates.sort_by_key(|&v| Reverse(instance.weight(v).unwrap_or(0)));
    search.branch(&mut Vec::new(), 0, &candidates);

    if search.truncated {
        warn!(
            "exact search stopped after {} nodes; returning the best set found",
            search.nodes
        );
    } else {
        trace!("exact search proved optimality in {} nodes", search.nodes);
    }
    let mut vertices = search.best;
    vertices.sort_unstable();
    ExactOutcome {
        vertices,
        truncated: search.truncated,
    }
}

struct Search<'a> {
    instance: &'a Instance,
    best: Vec<VertexId>,
    best_weight: Objective,
    nodes: u64,
    node_limit: Option<u64>,
    truncated: bool,
}

impl Search<'_> {
    /// Recursion depth is bounded by `candidates.len()`; each level owns its
    /// filtered candidate list.
    fn branch(
        &mut self,
        chosen: &mut Vec<VertexId>,
        chosen_weight: Objective,
        candidates: &[VertexId],
    ) {
        if self.truncated {
            return;
        }
        if self.node_limit.is_some_and(|limit| self.nodes >= limit) {
            self.truncated = true;
            return;
        }
        self.nodes = self.nodes.saturating_add(1);

        if chosen_weight > self.best_weight {
            self.best_weight = chosen_weight;
            self.best.clone_from(chosen);
        }

        let Some((&pivot, rest)) = candidates.split_first() else {
            return;
        };
        let remaining: Objective = candidates.iter().map(|&v| self.weight(v)).sum();
        if chosen_weight.saturating_add(remaining) <= self.best_weight {
            return;
        }

        let compatible: Vec<VertexId> = rest
            .iter()
            .copied()
            .filter(|&v| !self.instance.are_adjacent(pivot, v))
            .collect();
        chosen.push(pivot);
        self.branch(
            chosen,
            chosen_weight.saturating_add(self.weight(pivot)),
            &compatible,
        );
        chosen.pop();

        self.branch(chosen, chosen_weight, rest);
    }

    fn weight(&self, vertex: VertexId) -> Objective {
        self.instance.weight(vertex).map_or(0, Objective::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stableset_core::test_support::{four_cycle, triangle, weighted_graph};

    #[rstest]
    fn finds_the_optimum_where_greedy_falls_short() {
        // gwmin picks the centre (weight 5) while the leaves together weigh 6.
        let instance = weighted_graph(&[5, 2, 2, 2], &[(0, 1), (0, 2), (0, 3)])
            .build()
            .expect("build should succeed");
        assert_eq!(instance.weight_of(&greedy::gwmin(&instance)), 5);

        let outcome = branch_and_bound(&instance, None);
        assert!(!outcome.truncated);
        assert_eq!(
            outcome.vertices,
            vec![VertexId::new(1), VertexId::new(2), VertexId::new(3)]
        );
    }

    #[rstest]
    fn optimum_on_fixtures() {
        let cycle = four_cycle().build().expect("build should succeed");
        assert_eq!(cycle.weight_of(&branch_and_bound(&cycle, None).vertices), 35);

        let tri = triangle().build().expect("build should succeed");
        assert_eq!(branch_and_bound(&tri, None).vertices, vec![VertexId::new(2)]);
    }

    #[rstest]
    fn node_limit_keeps_the_incumbent() {
        let instance = weighted_graph(&[5, 2, 2, 2], &[(0, 1), (0, 2), (0, 3)])
            .build()
            .expect("build should succeed");
        let outcome = branch_and_bound(&instance, Some(0));
        assert!(outcome.truncated);
        assert_eq!(outcome.vertices, vec![VertexId::new(0)]);
        assert!(instance.is_stable_set(&outcome.vertices));
    }
}
