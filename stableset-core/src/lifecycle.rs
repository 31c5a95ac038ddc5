//! Lifecycle phases of a builder → instance → result chain.

use std::fmt;

/// Where a chain currently sits in its lifecycle.
///
/// Phases only move forward: mutations are allowed while `Building`,
/// `build` moves to `Built`, a solve moves to `Solved`, and disposal moves to
/// `Released`. Operations invoked out of order fail with
/// [`StableSetError::InvalidState`](crate::StableSetError::InvalidState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// The builder accepts mutations.
    Building,
    /// The builder has been frozen into an instance.
    Built,
    /// The instance has been solved at least once.
    Solved,
    /// Every native resource of the chain has been released.
    Released,
}

impl Phase {
    /// Whether builder mutations are still permitted.
    #[must_use]
    pub const fn accepts_mutations(self) -> bool {
        matches!(self, Self::Building)
    }

    /// Whether an instance exists that can be solved.
    #[must_use]
    pub const fn can_solve(self) -> bool {
        matches!(self, Self::Built | Self::Solved)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Built => "built",
            Self::Solved => "solved",
            Self::Released => "released",
        };
        f.write_str(name)
    }
}
