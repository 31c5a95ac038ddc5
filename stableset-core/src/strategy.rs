//! Opaque selector of external algorithm variants.

use std::fmt;

/// Small integer choosing among the external engine's algorithms.
///
/// The core never interprets the value; it is forwarded verbatim to the
/// engine. The named constants document the values understood by the native
/// engine.
///
/// # Examples
/// ```
/// use stableset_core::Strategy;
///
/// let strategy = Strategy::from_raw(5);
/// assert_eq!(strategy, Strategy::EXACT);
/// assert_eq!(Strategy::DEFAULT.as_raw(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Strategy(i32);

impl Strategy {
    /// Greedy selection by `w(v) / (deg(v) + 1)`.
    pub const GREEDY_GWMIN: Self = Self(1);
    /// Greedy deletion by `w(v) / (deg(v) (deg(v) + 1))`.
    pub const GREEDY_GWMAX: Self = Self(2);
    /// Greedy selection by `w(v) / w(N[v])`.
    pub const GREEDY_GWMIN2: Self = Self(3);
    /// Best greedy result improved by local search.
    pub const GREEDY_STRONG: Self = Self(4);
    /// Exact branch-and-bound.
    pub const EXACT: Self = Self(5);
    /// Strategy used when a caller does not choose one.
    pub const DEFAULT: Self = Self::GREEDY_GWMIN;

    /// Wrap a raw selector.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw selector.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
