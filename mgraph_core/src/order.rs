//! Depth-first ordering and connected-subgraph extraction.

use indexmap::IndexMap;

use crate::{Direction, Graph, GraphError, GraphIndex, NodeId, Result};

impl<N, E> Graph<N, E> {
    /// Node ids in topological order.
    ///
    /// Depth-first search starts from every node without incoming edges, in
    /// storage order, and each node is placed in front of everything finished
    /// before it. Nodes that cannot be reached from such a root (for instance
    /// the members of a cycle with no entry point) are left out. On cyclic
    /// input the result only orders the acyclic part reachable from the roots.
    #[must_use]
    pub fn topsort_ids(&self) -> Vec<NodeId> {
        let index = GraphIndex::build(self);
        let node_count = index.num_nodes();

        let mut in_degree = vec![0usize; node_count];
        for edge in self.edges() {
            if let Some(to) = self.node_position(edge.to) {
                in_degree[to] += 1;
            }
        }

        let mut visited = vec![false; node_count];
        let mut finished = Vec::with_capacity(node_count);
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..node_count {
            if in_degree[root] != 0 || visited[root] {
                continue;
            }
            visited[root] = true;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, cursor) = *frame;
                match index.fanout(node).get(cursor) {
                    Some(&(next, _)) => {
                        frame.1 += 1;
                        if !visited[next] {
                            visited[next] = true;
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        finished.push(index.node_id(node));
                        stack.pop();
                    }
                }
            }
        }

        finished.reverse();
        finished
    }

    /// Copy of the graph with nodes in topological order.
    ///
    /// See [`Graph::topsort_ids`] for which nodes are kept. Edges are copied
    /// unchanged.
    #[must_use]
    pub fn topsort(&self) -> Self
    where
        N: Clone,
        E: Clone,
    {
        let nodes: IndexMap<NodeId, N> = self
            .topsort_ids()
            .into_iter()
            .filter_map(|id| self.node_attr(id).map(|attr| (id, attr.clone())))
            .collect();
        Self::from_storage(nodes, self.edges().to_vec())
    }

    /// Node attributes in topological order.
    #[must_use]
    pub fn topsort_attr(&self) -> Vec<&N> {
        self.topsort_ids()
            .into_iter()
            .filter_map(|id| self.node_attr(id))
            .collect()
    }

    /// Nodes reachable from `node` in `direction`, `node` included.
    ///
    /// The result holds the reached nodes ordered by id and only the edges
    /// running between them.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `node` is absent.
    pub fn subgraph_node_conn(&self, node: NodeId, direction: Direction) -> Result<Self>
    where
        N: Clone,
        E: Clone,
    {
        let index = GraphIndex::build(self);
        let seed = index.index_of(node).ok_or(GraphError::NodeNotFound(node))?;

        let mut visited = vec![false; index.num_nodes()];
        let mut pending = vec![seed];
        visited[seed] = true;

        while let Some(current) = pending.pop() {
            let outputs = direction
                .follows_outputs()
                .then(|| index.fanout(current))
                .unwrap_or_default();
            let inputs = direction
                .follows_inputs()
                .then(|| index.fanin(current))
                .unwrap_or_default();

            for &(other, _) in outputs.iter().chain(inputs) {
                if !visited[other] {
                    visited[other] = true;
                    pending.push(other);
                }
            }
        }

        let mut reached: Vec<NodeId> = (0..index.num_nodes())
            .filter(|&pos| visited[pos])
            .map(|pos| index.node_id(pos))
            .collect();
        reached.sort_unstable();

        let nodes: IndexMap<NodeId, N> = reached
            .into_iter()
            .filter_map(|id| self.node_attr(id).map(|attr| (id, attr.clone())))
            .collect();
        let mut subgraph = Self::from_storage(nodes, self.edges().to_vec());
        subgraph.cleanup_loose_edges();
        Ok(subgraph)
    }
}
