//! Directed multigraph store.
//!
//! A [`Graph`] holds nodes keyed by caller-assigned [`NodeId`]s in insertion
//! order, plus an ordered list of edges that may repeat between the same pair
//! of nodes. On top of the store this crate provides traversal helpers,
//! depth-first topological sorting, connectivity extraction, removal of
//! cycle-closing edges toward a sink, and a DOT dump for debugging.
//!
//! Algorithms that revisit adjacency work on a [`GraphIndex`], a dense
//! positional fan-in/fan-out view built once per call.

mod acyclic;
mod dot;
mod error;
mod graph;
mod index;
mod node_id;
mod order;
mod traverse;

pub use dot::Dot;
pub use error::{GraphError, Result};
pub use graph::{Decl, Edge, Graph};
pub use index::GraphIndex;
pub use node_id::{Direction, EdgeSelector, NodeId};
