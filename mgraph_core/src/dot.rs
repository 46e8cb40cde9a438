//! Graphviz DOT rendering for debugging.

use std::fmt;

use crate::{Graph, NodeId};

type NodeLabel<'a, N> = Box<dyn Fn(NodeId, &N) -> String + 'a>;
type EdgeLabel<'a, E> = Box<dyn Fn(NodeId, NodeId, &E) -> String + 'a>;

/// DOT view of a graph with optional label callbacks.
///
/// Nodes are drawn as boxes labelled with their id unless a node label is
/// set. Edges carry a label only when an edge label is set.
///
/// ```
/// use mgraph_core::{Decl, Dot, Graph, NodeId};
///
/// let g: Graph<&str, u8> = Graph::create([
///     Decl::Node(NodeId::new(1), "a"),
///     Decl::Node(NodeId::new(2), "b"),
///     Decl::Edge(NodeId::new(1), NodeId::new(2), 7),
/// ])
/// .unwrap();
/// let dot = Dot::new(&g)
///     .node_label(|_, attr| (*attr).to_owned())
///     .to_string();
/// assert!(dot.contains("1 [label=\"a\"];"));
/// assert!(dot.contains("1 -> 2;"));
/// ```
pub struct Dot<'a, N, E> {
    graph: &'a Graph<N, E>,
    node_label: Option<NodeLabel<'a, N>>,
    edge_label: Option<EdgeLabel<'a, E>>,
}

impl<'a, N, E> Dot<'a, N, E> {
    /// Renders `graph` with default labels.
    #[must_use]
    pub const fn new(graph: &'a Graph<N, E>) -> Self {
        Self {
            graph,
            node_label: None,
            edge_label: None,
        }
    }

    /// Labels each node with `label(id, attr)`.
    #[must_use]
    pub fn node_label(mut self, label: impl Fn(NodeId, &N) -> String + 'a) -> Self {
        self.node_label = Some(Box::new(label));
        self
    }

    /// Labels each edge with `label(from, to, attr)`.
    #[must_use]
    pub fn edge_label(mut self, label: impl Fn(NodeId, NodeId, &E) -> String + 'a) -> Self {
        self.edge_label = Some(Box::new(label));
        self
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

impl<N, E> fmt::Display for Dot<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph debug {{")?;
        writeln!(f, "    node [shape=box];")?;

        for (id, attr) in self.graph.nodes() {
            let label = self
                .node_label
                .as_ref()
                .map_or_else(|| id.to_string(), |label| label(id, attr));
            writeln!(f, "    {id} [label=\"{}\"];", escape(&label))?;
        }

        for edge in self.graph.edges() {
            write!(f, "    {} -> {}", edge.from, edge.to)?;
            if let Some(label) = &self.edge_label {
                let text = label(edge.from, edge.to, &edge.attr);
                write!(f, " [label=\"{}\"]", escape(&text))?;
            }
            writeln!(f, ";")?;
        }

        write!(f, "}}")
    }
}

impl<N, E> Graph<N, E> {
    /// DOT text with id labels and unlabelled edges.
    #[must_use]
    pub fn debug_dot(&self) -> String {
        Dot::new(self).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Dot;
    use crate::{Decl, Graph, NodeId};

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn sample() -> Graph<&'static str, &'static str> {
        Graph::create([
            Decl::Node(n(4), "say \"hi\""),
            Decl::Node(n(2), "plain"),
            Decl::Edge(n(4), n(2), "x\"y"),
            Decl::Edge(n(2), n(2), "loop"),
        ])
        .unwrap()
    }

    #[test]
    fn default_rendering() {
        assert_eq!(
            sample().debug_dot(),
            "digraph debug {\n    node [shape=box];\n    4 [label=\"4\"];\n    2 [label=\"2\"];\n    4 -> 2;\n    2 -> 2;\n}"
        );
    }

    #[test]
    fn labels_are_escaped() {
        let g = sample();
        let dot = Dot::new(&g)
            .node_label(|id, attr| format!("{id}: {attr}"))
            .edge_label(|_, _, attr| (*attr).to_owned())
            .to_string();
        assert!(dot.contains("    4 [label=\"4: say \\\"hi\\\"\"];\n"));
        assert!(dot.contains("    4 -> 2 [label=\"x\\\"y\"];\n"));
        assert!(dot.contains("    2 -> 2 [label=\"loop\"];\n"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn empty_graph() {
        let g: Graph<(), ()> = Graph::new();
        assert_eq!(g.debug_dot(), "digraph debug {\n    node [shape=box];\n}");
    }
}
