//! Configuration for the subgraph search.
//!
//! Two knobs change what a search returns, and one changes how it gets there:
//! - order: which pattern node the search extends with when no node borders
//!   the current partial mapping.
//! - dedupe: how `enumerate_all` collapses results (every distinct mapping,
//!   or one result per set of covered target nodes).
//! - limit: a cap on how many embeddings `enumerate_all` collects.
//!
//! Quick examples
//!
//! Default behaviour (storage order, every mapping, no cap):
//! ```
//! use mgraph_subgraph::Config;
//! let cfg = Config::default();
//! ```
//!
//! Collapse automorphisms of the pattern and stop after ten results:
//! ```
//! use mgraph_subgraph::{Config, DedupeMode};
//! let cfg = Config::default()
//!     .with_dedupe(DedupeMode::TargetSet)
//!     .with_limit(10);
//! ```

use mgraph_core::NodeId;
use serde::{Deserialize, Serialize};

/// Search configuration.
///
/// - order:
///     - `None` => fall back to pattern storage order.
///     - `Some(ids)` => try pattern nodes in this order first. Ids that are
///       not in the pattern are ignored and pattern nodes that are not listed
///       come afterwards in storage order.
/// - dedupe:
///     - Controls how `enumerate_all` deduplicates its results.
/// - limit:
///     - `None` => enumerate the whole search space.
///     - `Some(n)` => stop after `n` embeddings were found (before dedupe).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pattern node order for extensions outside the frontier.
    pub order: Option<Vec<NodeId>>,
    /// How to deduplicate enumerated embeddings.
    pub dedupe: DedupeMode,
    /// Cap on the number of enumerated embeddings.
    pub limit: Option<usize>,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(order: Option<Vec<NodeId>>, dedupe: DedupeMode, limit: Option<usize>) -> Self {
        Self {
            order,
            dedupe,
            limit,
        }
    }

    /// Same configuration with an explicit pattern node order.
    #[must_use]
    pub fn with_order(mut self, order: impl IntoIterator<Item = NodeId>) -> Self {
        self.order = Some(order.into_iter().collect());
        self
    }

    /// Same configuration with another dedupe mode.
    #[must_use]
    pub const fn with_dedupe(mut self, dedupe: DedupeMode) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Same configuration with a result cap.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Control how enumerated embeddings are deduplicated.
///
/// - Full:
///     Two embeddings are distinct if any pattern node maps to a different
///     target node.
/// - TargetSet:
///     Two embeddings are the same if they cover the same SET of target
///     nodes, regardless of which pattern node maps where (collapses
///     automorphisms of the pattern).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DedupeMode {
    /// Keep every distinct mapping.
    #[default]
    Full,
    /// Keep one embedding per covered target node set.
    TargetSet,
}
