//! Flat node/edge storage for directed multigraphs.
//!
//! Nodes live in an insertion-ordered map keyed by [`NodeId`]; edges live in a
//! plain vector in encounter order. Every positional operation in this crate
//! ("the k-th outgoing edge", "the n-th parallel edge") counts in that order.

mod compose;
mod wire;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{EdgeSelector, GraphError, NodeId, Result};

/// A directed edge with an opaque attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<E> {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Caller-owned payload.
    pub attr: E,
}

impl<E> Edge<E> {
    /// Creates an edge.
    pub const fn new(from: NodeId, to: NodeId, attr: E) -> Self {
        Self { from, to, attr }
    }

    /// Whether this edge connects `from` to `to`.
    #[inline]
    #[must_use]
    pub fn connects(&self, from: NodeId, to: NodeId) -> bool {
        self.from == from && self.to == to
    }
}

/// One argument of [`Graph::create`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl<N, E> {
    /// A node id and its attribute.
    Node(NodeId, N),
    /// An edge `from -> to` and its attribute.
    Edge(NodeId, NodeId, E),
}

/// A mutable directed multigraph.
///
/// Node ids are unique. Edges must reference existing nodes when they are
/// inserted, but removing a node does not cascade: call
/// [`Graph::cleanup_loose_edges`] afterwards when dangling edges matter.
///
/// Deserialization goes through [`Graph::from_parts`], so a document with a
/// repeated node id or an edge to an absent node is rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "wire::GraphParts<N, E>",
    bound(deserialize = "N: Deserialize<'de>, E: Deserialize<'de>")
)]
pub struct Graph<N, E> {
    nodes: IndexMap<NodeId, N>,
    edges: Vec<Edge<E>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Builds a graph from a list of node and edge declarations.
    ///
    /// Declarations may come in any order; edges are checked against the full
    /// node set once every declaration has been read.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if two nodes share an id and
    /// [`GraphError::NodeNotFound`] if an edge names an undeclared node.
    pub fn create(decls: impl IntoIterator<Item = Decl<N, E>>) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for decl in decls {
            match decl {
                Decl::Node(id, attr) => nodes.push((id, attr)),
                Decl::Edge(from, to, attr) => edges.push((from, to, attr)),
            }
        }
        Self::from_parts(nodes, edges)
    }

    /// Builds a graph from separate node and edge lists.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::create`].
    pub fn from_parts(
        nodes: impl IntoIterator<Item = (NodeId, N)>,
        edges: impl IntoIterator<Item = (NodeId, NodeId, E)>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for (id, attr) in nodes {
            graph.append_node(id, attr)?;
        }
        for (from, to, attr) in edges {
            graph.append_edge(from, to, attr)?;
        }
        Ok(graph)
    }

    pub(crate) fn from_storage(nodes: IndexMap<NodeId, N>, edges: Vec<Edge<E>>) -> Self {
        Self { nodes, edges }
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges, parallel and dangling edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has neither nodes nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Nodes with their attributes, in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.nodes.iter().map(|(id, attr)| (*id, attr))
    }

    /// Node ids in storage order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes.keys().copied()
    }

    /// Edges in encounter order.
    #[must_use]
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    /// Attribute of a node, if present.
    #[must_use]
    pub fn node_attr(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(&id)
    }

    /// Mutable attribute of a node, if present.
    pub fn node_attr_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(&id)
    }

    /// Storage position of a node.
    #[must_use]
    pub fn node_position(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Node stored at a position.
    #[must_use]
    pub fn node_at(&self, position: usize) -> Option<(NodeId, &N)> {
        self.nodes.get_index(position).map(|(id, attr)| (*id, attr))
    }

    /// Whether a node with this id is stored.
    #[must_use]
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Appends a node.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if `id` is already stored.
    pub fn append_node(&mut self, id: NodeId, attr: N) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(id, attr);
        Ok(())
    }

    /// Appends an edge. Parallel edges are allowed.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if either endpoint is absent.
    pub fn append_edge(&mut self, from: NodeId, to: NodeId, attr: E) -> Result<()> {
        self.require_node(from)?;
        self.require_node(to)?;
        self.edges.push(Edge::new(from, to, attr));
        Ok(())
    }

    /// Removes a node and returns its attribute. Edges are left in place.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `id` is absent.
    pub fn remove_node(&mut self, id: NodeId) -> Result<N> {
        self.nodes
            .shift_remove(&id)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Whether at least one edge goes from `from` to `to`.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(from, to))
    }

    /// Number of parallel edges from `from` to `to`.
    #[must_use]
    pub fn edge_count_between(&self, from: NodeId, to: NodeId) -> usize {
        self.edges.iter().filter(|e| e.connects(from, to)).count()
    }

    /// Attribute of the `nth` parallel edge from `from` to `to`.
    #[must_use]
    pub fn edge_attr(&self, from: NodeId, to: NodeId, nth: usize) -> Option<&E> {
        self.edges
            .iter()
            .filter(|e| e.connects(from, to))
            .nth(nth)
            .map(|e| &e.attr)
    }

    /// Removes edges between an ordered pair and returns how many went away.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if the pair has no edge and
    /// [`GraphError::EdgeIndexOutOfRange`] if [`EdgeSelector::Nth`] points
    /// past the last parallel edge.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, which: EdgeSelector) -> Result<usize> {
        if !self.has_edge(from, to) {
            return Err(GraphError::EdgeNotFound { from, to });
        }

        match which {
            EdgeSelector::All => {
                let before = self.edges.len();
                self.edges.retain(|e| !e.connects(from, to));
                Ok(before - self.edges.len())
            }
            EdgeSelector::Nth(index) => {
                let position = self
                    .edges
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.connects(from, to))
                    .nth(index)
                    .map(|(pos, _)| pos)
                    .ok_or(GraphError::EdgeIndexOutOfRange { from, to, index })?;
                self.edges.remove(position);
                Ok(1)
            }
        }
    }

    /// Removes edges by their position in [`Graph::edges`].
    ///
    /// Positions may repeat and come in any order.
    pub(crate) fn remove_edges_at(&mut self, mut positions: Vec<usize>) {
        positions.sort_unstable();
        positions.dedup();
        for position in positions.into_iter().rev() {
            if position < self.edges.len() {
                self.edges.remove(position);
            }
        }
    }

    /// A fresh id: one past the largest stored id, or 0 for an empty graph.
    ///
    /// # Errors
    ///
    /// [`GraphError::IdSpaceExhausted`] if `u32::MAX` is already stored.
    pub fn gen_node_id(&self) -> Result<NodeId> {
        match self.nodes.keys().max() {
            Some(max) => max.checked_next().ok_or(GraphError::IdSpaceExhausted),
            None => Ok(NodeId::new(0)),
        }
    }

    /// `count` consecutive fresh ids starting at [`Graph::gen_node_id`].
    fn fresh_node_ids(&self, count: usize) -> Result<Vec<NodeId>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let first = self.gen_node_id()?.raw();
        let last = u32::try_from(count - 1)
            .ok()
            .and_then(|span| first.checked_add(span))
            .ok_or(GraphError::IdSpaceExhausted)?;
        Ok((first..=last).map(NodeId::new).collect())
    }

    /// Removes every edge with an endpoint that is no longer stored.
    ///
    /// Returns the number of removed edges.
    pub fn cleanup_loose_edges(&mut self) -> usize {
        let before = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|e| nodes.contains_key(&e.from) && nodes.contains_key(&e.to));
        let removed = before - self.edges.len();
        if removed > 0 {
            trace!("removed {} loose edges", removed);
        }
        removed
    }

    /// Copies the graph, transforming every node and edge attribute.
    pub fn map<N2, E2>(
        &self,
        mut node_fn: impl FnMut(&N) -> N2,
        mut edge_fn: impl FnMut(&E) -> E2,
    ) -> Graph<N2, E2> {
        Graph {
            nodes: self
                .nodes
                .iter()
                .map(|(id, attr)| (*id, node_fn(attr)))
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| Edge::new(e.from, e.to, edge_fn(&e.attr)))
                .collect(),
        }
    }

    /// Copies the graph, transforming node attributes only.
    pub fn map_nodes<N2>(&self, node_fn: impl FnMut(&N) -> N2) -> Graph<N2, E>
    where
        E: Clone,
    {
        self.map(node_fn, E::clone)
    }

    /// Copies the graph, transforming edge attributes only.
    pub fn map_edges<E2>(&self, edge_fn: impl FnMut(&E) -> E2) -> Graph<N, E2>
    where
        N: Clone,
    {
        self.map(N::clone, edge_fn)
    }

    fn require_node(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(id))
        }
    }

    pub(crate) fn edges_mut(&mut self) -> &mut Vec<Edge<E>> {
        &mut self.edges
    }
}
