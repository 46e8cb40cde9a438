//! Edge walking over the raw node and edge storage.

use std::collections::HashSet;
use std::ops::ControlFlow;

use crate::{Graph, NodeId};

impl<N, E> Graph<N, E> {
    /// Number of edges leaving `node`.
    #[must_use]
    pub fn out_edge_count(&self, node: NodeId) -> usize {
        self.edges().iter().filter(|e| e.from == node).count()
    }

    /// Number of edges entering `node`.
    #[must_use]
    pub fn in_edge_count(&self, node: NodeId) -> usize {
        self.edges().iter().filter(|e| e.to == node).count()
    }

    /// Target of the `k`-th edge leaving `node`.
    #[must_use]
    pub fn out_edge(&self, node: NodeId, k: usize) -> Option<NodeId> {
        self.edges()
            .iter()
            .filter(|e| e.from == node)
            .nth(k)
            .map(|e| e.to)
    }

    /// Source of the `k`-th edge entering `node`.
    #[must_use]
    pub fn in_edge(&self, node: NodeId, k: usize) -> Option<NodeId> {
        self.edges()
            .iter()
            .filter(|e| e.to == node)
            .nth(k)
            .map(|e| e.from)
    }

    /// Visits every node in storage order until the visitor breaks.
    ///
    /// The graph cannot be mutated while the walk is in progress.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &N) -> ControlFlow<()>) {
        for (id, attr) in self.nodes() {
            if visit(id, attr).is_break() {
                break;
            }
        }
    }

    /// Visits every edge in encounter order until the visitor breaks.
    pub fn traverse_edges(&self, mut visit: impl FnMut(NodeId, NodeId, &E) -> ControlFlow<()>) {
        for edge in self.edges() {
            if visit(edge.from, edge.to, &edge.attr).is_break() {
                break;
            }
        }
    }

    /// Visits the source of every edge entering `node`.
    ///
    /// The source attribute is `None` when the edge dangles.
    pub fn traverse_inputs(
        &self,
        node: NodeId,
        mut visit: impl FnMut(NodeId, Option<&N>, &E) -> ControlFlow<()>,
    ) {
        for edge in self.edges().iter().filter(|e| e.to == node) {
            if visit(edge.from, self.node_attr(edge.from), &edge.attr).is_break() {
                return;
            }
        }
    }

    /// Visits the target of every edge leaving `node`.
    ///
    /// The target attribute is `None` when the edge dangles.
    pub fn traverse_outputs(
        &self,
        node: NodeId,
        mut visit: impl FnMut(NodeId, Option<&N>, &E) -> ControlFlow<()>,
    ) {
        for edge in self.edges().iter().filter(|e| e.from == node) {
            if visit(edge.to, self.node_attr(edge.to), &edge.attr).is_break() {
                return;
            }
        }
    }

    /// Nodes without incoming edges, in storage order.
    ///
    /// A dangling edge still counts as incoming for its stored target.
    #[must_use]
    pub fn source_nodes(&self) -> Vec<NodeId> {
        let targets: HashSet<NodeId> = self.edges().iter().map(|e| e.to).collect();
        self.node_ids().filter(|id| !targets.contains(id)).collect()
    }

    /// Nodes without outgoing edges, in storage order.
    #[must_use]
    pub fn sink_nodes(&self) -> Vec<NodeId> {
        let sources: HashSet<NodeId> = self.edges().iter().map(|e| e.from).collect();
        self.node_ids().filter(|id| !sources.contains(id)).collect()
    }
}
