//! Duplicate-edge handling for [`GraphBuilder::add_edge`](crate::GraphBuilder::add_edge).

use std::fmt;

use crate::error::{ArgumentError, StableSetError};

/// How `add_edge` treats an edge that is already present.
///
/// The discriminants match the `check_duplicate` integer of the C ABI.
///
/// # Examples
/// ```
/// use stableset_core::DuplicatePolicy;
///
/// assert_eq!(DuplicatePolicy::try_from(2), Ok(DuplicatePolicy::Reject));
/// assert_eq!(DuplicatePolicy::DEFAULT, DuplicatePolicy::Ignore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DuplicatePolicy {
    /// No check; parallel edges may be stored.
    #[default]
    Ignore = 0,
    /// Check, and treat a duplicate as a successful no-op.
    Skip = 1,
    /// Check, and fail with `AlreadyExists` on a duplicate.
    Reject = 2,
}

impl DuplicatePolicy {
    /// Policy used when a caller does not choose one.
    pub const DEFAULT: Self = Self::Ignore;

    /// The C ABI encoding of this policy.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Whether the builder must look for an existing edge first.
    #[must_use]
    pub const fn checks_duplicates(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

impl TryFrom<i32> for DuplicatePolicy {
    type Error = StableSetError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Ignore),
            1 => Ok(Self::Skip),
            2 => Ok(Self::Reject),
            other => Err(ArgumentError::UnknownDuplicatePolicy(other).into()),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ignore => "ignore",
            Self::Skip => "skip",
            Self::Reject => "reject",
        };
        f.write_str(name)
    }
}
