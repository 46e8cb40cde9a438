//! Back-edge removal toward a designated sink.

use tracing::debug;

use crate::{Graph, GraphIndex, NodeId};

/// Walk state of a node.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl<N, E> Graph<N, E> {
    /// Breaks the cycles found while walking incoming edges from `main`.
    ///
    /// `None` picks the first sink node. Every predecessor met while it is
    /// still an ancestor on the walk closes a cycle; the edge from that
    /// predecessor to the node being expanded is removed. Returns the
    /// removed `(from, to)` pairs in edge storage order.
    ///
    /// The graph is left untouched when it has no edges, has no sink, or
    /// when `main` is absent or has no incoming edge. Cycles that cannot
    /// reach `main` are not inspected.
    pub fn enforce_acyclic(&mut self, main: Option<NodeId>) -> Vec<(NodeId, NodeId)> {
        if self.edges().is_empty() {
            return Vec::new();
        }
        let Some(main) = main.or_else(|| self.sink_nodes().first().copied()) else {
            return Vec::new();
        };

        let closing = {
            let index = GraphIndex::build(self);
            let Some(root) = index.index_of(main) else {
                return Vec::new();
            };
            if index.fanin(root).is_empty() {
                return Vec::new();
            }
            closing_edges(&index, root)
        };

        let removed: Vec<(NodeId, NodeId)> = closing
            .iter()
            .map(|&pos| (self.edges()[pos].from, self.edges()[pos].to))
            .collect();
        for (from, to) in &removed {
            debug!(%from, %to, %main, "removing cycle-closing edge");
        }
        self.remove_edges_at(closing);
        removed
    }
}

/// Positions of the edges that close a cycle on the incoming walk from
/// `root`, sorted ascending.
fn closing_edges<N, E>(index: &GraphIndex<'_, N, E>, root: usize) -> Vec<usize> {
    let mut marks = vec![Mark::Unvisited; index.num_nodes()];
    let mut closing = Vec::new();
    let mut stack = vec![(root, 0usize)];
    marks[root] = Mark::OnStack;

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        let Some(&(pred, edge_pos)) = index.fanin(node).get(cursor) else {
            marks[node] = Mark::Done;
            stack.pop();
            continue;
        };
        frame.1 += 1;

        match marks[pred] {
            Mark::OnStack => closing.push(edge_pos),
            Mark::Done => {}
            Mark::Unvisited if index.fanin(pred).is_empty() => marks[pred] = Mark::Done,
            Mark::Unvisited => {
                marks[pred] = Mark::OnStack;
                stack.push((pred, 0));
            }
        }
    }

    closing.sort_unstable();
    closing
}
