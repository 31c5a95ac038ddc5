//! Owned solve results.

use std::time::Duration;

use crate::{Instance, Objective, VertexId};

/// Outcome of a solve: feasibility, the selected stable set and the elapsed
/// time.
///
/// The vertex sequence is always owned and bounds-checked. An infeasible
/// result never carries vertices; the constructors make any other
/// combination unrepresentable.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use stableset_core::{SolveResult, VertexId};
///
/// let result = SolveResult::feasible(vec![VertexId::new(2)], Duration::from_millis(3));
/// assert!(result.is_feasible());
/// assert_eq!(result.len(), 1);
///
/// let none = SolveResult::infeasible(Duration::ZERO);
/// assert!(none.vertices().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    feasible: bool,
    vertices: Vec<VertexId>,
    solve_time: Duration,
}

impl SolveResult {
    /// A feasible result selecting `vertices`.
    #[must_use]
    pub const fn feasible(vertices: Vec<VertexId>, solve_time: Duration) -> Self {
        Self {
            feasible: true,
            vertices,
            solve_time,
        }
    }

    /// A result reporting that no stable set was found.
    #[must_use]
    pub const fn infeasible(solve_time: Duration) -> Self {
        Self {
            feasible: false,
            vertices: Vec::new(),
            solve_time,
        }
    }

    /// Whether the engine found a stable set.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// The selected vertices in the order the engine reported them.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of selected vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether no vertex was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Wall-clock time spent solving.
    #[must_use]
    pub const fn solve_time(&self) -> Duration {
        self.solve_time
    }

    /// Total weight of the selected vertices in `instance`.
    #[must_use]
    pub fn weight(&self, instance: &Instance) -> Objective {
        instance.weight_of(&self.vertices)
    }

    /// Consume the result, keeping only the vertices.
    ///
    /// ```
    /// use std::time::Duration;
    /// use stableset_core::{SolveResult, VertexId};
    ///
    /// let result = SolveResult::feasible(vec![VertexId::new(0)], Duration::ZERO);
    /// assert_eq!(result.into_vertices(), vec![VertexId::new(0)]);
    /// ```
    #[must_use]
    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }
}
