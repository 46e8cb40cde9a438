//! Positional adjacency view over a [`Graph`].
//!
//! Algorithms that walk the graph repeatedly (ordering, connectivity, cycle
//! elimination, subgraph matching) work on dense node positions instead of
//! caller ids. Each node position maps to its fan-in and fan-out lists of
//! `(neighbour position, edge position)` in edge encounter order, so parallel
//! edges show up once per edge.

use contracts::debug_requires;

use crate::{Graph, NodeId};

type AdjacencyList = Vec<Vec<(usize, usize)>>;

/// Immutable fan-in/fan-out index borrowed from a graph.
///
/// Edges with an endpoint that is no longer stored are left out.
#[derive(Debug)]
pub struct GraphIndex<'g, N, E> {
    graph: &'g Graph<N, E>,
    /// Outgoing `(target position, edge position)` per node position.
    fanout: AdjacencyList,
    /// Incoming `(source position, edge position)` per node position.
    fanin: AdjacencyList,
}

impl<'g, N, E> GraphIndex<'g, N, E> {
    /// Builds the index for `graph`.
    #[must_use]
    pub fn build(graph: &'g Graph<N, E>) -> Self {
        let node_count = graph.node_count();
        let mut fanout: AdjacencyList = vec![Vec::new(); node_count];
        let mut fanin: AdjacencyList = vec![Vec::new(); node_count];

        for (edge_pos, edge) in graph.edges().iter().enumerate() {
            let (Some(from), Some(to)) = (graph.node_position(edge.from), graph.node_position(edge.to))
            else {
                continue;
            };
            fanout[from].push((to, edge_pos));
            fanin[to].push((from, edge_pos));
        }

        Self {
            graph,
            fanout,
            fanin,
        }
    }

    /// The indexed graph.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph<N, E> {
        self.graph
    }

    /// Number of indexed nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.fanout.len()
    }

    /// Position of a node id.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.graph.node_position(id)
    }

    /// Node id stored at a position.
    ///
    /// # Panics
    ///
    /// If `node` is not a valid position.
    #[must_use]
    pub fn node_id(&self, node: usize) -> NodeId {
        self.node(node).0
    }

    /// Node attribute stored at a position.
    ///
    /// # Panics
    ///
    /// If `node` is not a valid position.
    #[must_use]
    pub fn node_attr(&self, node: usize) -> &'g N {
        self.node(node).1
    }

    fn node(&self, node: usize) -> (NodeId, &'g N) {
        match self.graph.node_at(node) {
            Some(entry) => entry,
            None => panic!("node position {node} out of range"),
        }
    }

    /// Outgoing `(target position, edge position)` pairs of a node.
    #[debug_requires(node < self.fanout.len())]
    #[must_use]
    pub fn fanout(&self, node: usize) -> &[(usize, usize)] {
        &self.fanout[node]
    }

    /// Incoming `(source position, edge position)` pairs of a node.
    #[debug_requires(node < self.fanin.len())]
    #[must_use]
    pub fn fanin(&self, node: usize) -> &[(usize, usize)] {
        &self.fanin[node]
    }

    /// Whether at least one edge goes from position `from` to position `to`.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.fanout[from].iter().any(|&(target, _)| target == to)
    }

    /// Attributes of every parallel edge from position `from` to position `to`.
    pub fn edge_attrs(&self, from: usize, to: usize) -> impl Iterator<Item = &'g E> + '_ {
        let edges = self.graph.edges();
        self.fanout[from]
            .iter()
            .filter(move |&&(target, _)| target == to)
            .map(move |&(_, edge_pos)| &edges[edge_pos].attr)
    }
}
