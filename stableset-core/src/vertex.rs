//! Vertex identifiers and weights.

use std::fmt;

/// Weight of a single vertex, used as an objective coefficient.
pub type Weight = i64;

/// Sum of vertex weights.
///
/// Wider than [`Weight`] so that summing every vertex of an instance cannot
/// overflow.
pub type Objective = i128;

/// Weight given to vertices that were added without an explicit weight.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Dense vertex identifier in `[0, N)`, assigned in insertion order.
///
/// # Examples
/// ```
/// use stableset_core::VertexId;
///
/// let id = VertexId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VertexId(usize);

impl VertexId {
    /// Wrap a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<VertexId> for usize {
    fn from(id: VertexId) -> Self {
        id.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
