//! VF2 subgraph isomorphism over [`mgraph_core`] multigraphs.
//!
//! [`find_embedding`] answers "where does this pattern occur in that graph"
//! with the first embedding found; [`SubgraphMatcher`] exposes the search
//! directly, including enumeration of every embedding under a [`Config`].
//!
//! ```
//! use mgraph_core::{Decl, Graph, NodeId};
//! use mgraph_subgraph::find_embedding;
//!
//! let pattern: Graph<&str, &str> = Graph::create([Decl::Node(NodeId::new(1), "A")]).unwrap();
//! let target: Graph<&str, &str> = Graph::create([
//!     Decl::Node(NodeId::new(10), "A"),
//!     Decl::Node(NodeId::new(20), "B"),
//!     Decl::Edge(NodeId::new(10), NodeId::new(20), "e"),
//! ])
//! .unwrap();
//!
//! let embedding = find_embedding(&pattern, &target).unwrap();
//! assert_eq!(embedding.into_parts(), (vec![NodeId::new(1)], vec![NodeId::new(10)]));
//! ```

mod config;
mod embedding;
mod feasibility;
mod matcher;
mod state;

pub use config::{Config, DedupeMode};
pub use embedding::Embedding;
pub use matcher::SubgraphMatcher;

use mgraph_core::Graph;

/// First embedding of `pattern` into `target` with attribute equality on
/// nodes and edges.
#[must_use]
pub fn find_embedding<N: PartialEq, E: PartialEq>(
    pattern: &Graph<N, E>,
    target: &Graph<N, E>,
) -> Option<Embedding> {
    find_embedding_by(pattern, target, |a: &N, b: &N| a == b, |a: &E, b: &E| a == b)
}

/// First embedding of `pattern` into `target` under custom comparators.
///
/// `node_comp(pattern_attr, target_attr)` and `edge_comp(pattern_attr,
/// target_attr)` decide attribute compatibility; the two graphs may carry
/// different attribute types.
#[must_use]
pub fn find_embedding_by<N1, E1, N2, E2>(
    pattern: &Graph<N1, E1>,
    target: &Graph<N2, E2>,
    node_comp: impl Fn(&N1, &N2) -> bool,
    edge_comp: impl Fn(&E1, &E2) -> bool,
) -> Option<Embedding> {
    let config = Config::default();
    SubgraphMatcher::new(pattern, target, node_comp, edge_comp, &config).find_first()
}
