#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::OnceLock;

use mgraph_core::{Graph, NodeId};
use mgraph_subgraph::Embedding;
use quickcheck::{Arbitrary, Gen};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn n(id: u32) -> NodeId {
    NodeId::new(id)
}

/// Random multigraph with small attribute alphabets so matches are likely.
pub fn arbitrary_graph(g: &mut Gen, max_nodes: usize, max_edges: usize) -> Graph<u8, u8> {
    let node_count = usize::arbitrary(g) % max_nodes + 1;
    let mut graph = Graph::new();
    for i in 0..node_count as u32 {
        graph.append_node(n(3 * i + 1), u8::arbitrary(g) % 3).unwrap();
    }
    let edge_count = usize::arbitrary(g) % (max_edges + 1);
    for _ in 0..edge_count {
        let from = (usize::arbitrary(g) % node_count) as u32;
        let to = (usize::arbitrary(g) % node_count) as u32;
        graph
            .append_edge(n(3 * from + 1), n(3 * to + 1), u8::arbitrary(g) % 2)
            .unwrap();
    }
    graph
}

/// Unrelated pattern and target graphs.
#[derive(Clone, Debug)]
pub struct PatternTarget {
    pub pattern: Graph<u8, u8>,
    pub target: Graph<u8, u8>,
}

impl Arbitrary for PatternTarget {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            pattern: arbitrary_graph(g, 3, 3),
            target: arbitrary_graph(g, 6, 10),
        }
    }
}

/// A target graph and the subgraph it induces on a random node subset.
#[derive(Clone, Debug)]
pub struct InducedPair {
    pub pattern: Graph<u8, u8>,
    pub target: Graph<u8, u8>,
}

impl Arbitrary for InducedPair {
    fn arbitrary(g: &mut Gen) -> Self {
        let target = arbitrary_graph(g, 6, 10);
        let kept: HashSet<NodeId> = target
            .node_ids()
            .filter(|_| bool::arbitrary(g))
            .collect();
        let pattern = Graph::from_parts(
            target
                .nodes()
                .filter(|(id, _)| kept.contains(id))
                .map(|(id, attr)| (id, *attr)),
            target
                .edges()
                .iter()
                .filter(|e| kept.contains(&e.from) && kept.contains(&e.to))
                .map(|e| (e.from, e.to, e.attr)),
        )
        .unwrap();
        Self { pattern, target }
    }
}

/// Whether `embedding` is a valid embedding of `pattern` into `target`.
pub fn is_sound<N: PartialEq, E: PartialEq>(
    pattern: &Graph<N, E>,
    target: &Graph<N, E>,
    embedding: &Embedding,
) -> bool {
    let images: HashSet<NodeId> = embedding.target.iter().copied().collect();
    if embedding.len() != pattern.node_count() || images.len() != embedding.len() {
        return false;
    }

    let nodes_match = embedding
        .pairs()
        .all(|(p, t)| matches!((pattern.node_attr(p), target.node_attr(t)), (Some(a), Some(b)) if a == b));

    let edges_covered = pattern.edges().iter().all(|edge| {
        match (embedding.target_of(edge.from), embedding.target_of(edge.to)) {
            (Some(from), Some(to)) => target
                .edges()
                .iter()
                .any(|t| t.connects(from, to) && t.attr == edge.attr),
            _ => false,
        }
    });

    nodes_match && edges_covered
}
