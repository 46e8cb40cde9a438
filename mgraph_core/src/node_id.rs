use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned identifier of a node inside a [`Graph`](crate::Graph).
///
/// Ids are unique within one graph but carry no meaning across graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId {
    /// The underlying raw integer id.
    inner: u32,
}

impl NodeId {
    /// Creates a node id from a raw integer.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.inner
    }

    /// The id following this one, or `None` past `u32::MAX`.
    #[must_use]
    pub(crate) const fn checked_next(self) -> Option<Self> {
        match self.inner.checked_add(1) {
            Some(inner) => Some(Self { inner }),
            None => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self { inner: id }
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.inner
    }
}

/// Which edges a connectivity walk follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing edges only.
    Forward,
    /// Follow incoming edges only.
    Backward,
    /// Follow edges in both directions.
    TwoWay,
}

impl Direction {
    /// Whether the walk follows outgoing edges.
    #[must_use]
    pub const fn follows_outputs(self) -> bool {
        matches!(self, Self::Forward | Self::TwoWay)
    }

    /// Whether the walk follows incoming edges.
    #[must_use]
    pub const fn follows_inputs(self) -> bool {
        matches!(self, Self::Backward | Self::TwoWay)
    }
}

/// Selects edges among the parallel edges of one ordered node pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSelector {
    /// Every edge between the pair.
    All,
    /// Only the n-th edge (0-based, in encounter order) between the pair.
    Nth(usize),
}
