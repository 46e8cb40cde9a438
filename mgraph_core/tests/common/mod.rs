#![allow(dead_code)]

use std::sync::OnceLock;

use mgraph_core::{Graph, NodeId};
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

/// Acyclic graph whose storage order is shuffled against its rank order.
#[derive(Clone, Debug)]
pub struct ArbitraryDag(pub Graph<u32, u8>);

impl Arbitrary for ArbitraryDag {
    fn arbitrary(g: &mut Gen) -> Self {
        let node_count = usize::arbitrary(g) % 8 + 1;

        // node of rank r has id 2r + 1; edges only run from lower to higher rank
        let mut storage: Vec<(u32, usize)> =
            (0..node_count).map(|rank| (u32::arbitrary(g), rank)).collect();
        storage.sort_unstable();

        let mut graph = Graph::new();
        for &(_, rank) in &storage {
            let rank = rank as u32;
            graph.append_node(n(2 * rank + 1), rank).unwrap();
        }

        let edge_count = usize::arbitrary(g) % 12;
        for _ in 0..edge_count {
            let a = (usize::arbitrary(g) % node_count) as u32;
            let b = (usize::arbitrary(g) % node_count) as u32;
            if a == b {
                continue;
            }
            let (lo, hi) = (a.min(b), a.max(b));
            graph
                .append_edge(n(2 * lo + 1), n(2 * hi + 1), u8::arbitrary(g))
                .unwrap();
        }
        Self(graph)
    }
}

/// Any graph, cycles and self-loops included, plus one of its node ids.
#[derive(Clone, Debug)]
pub struct ArbitraryRooted(pub Graph<u8, u8>, pub NodeId);

impl Arbitrary for ArbitraryRooted {
    fn arbitrary(g: &mut Gen) -> Self {
        let node_count = usize::arbitrary(g) % 8 + 1;
        let mut graph = Graph::new();
        for id in 0..node_count as u32 {
            graph.append_node(n(id * 5), u8::arbitrary(g)).unwrap();
        }
        let edge_count = usize::arbitrary(g) % 14;
        for _ in 0..edge_count {
            let a = (usize::arbitrary(g) % node_count) as u32;
            let b = (usize::arbitrary(g) % node_count) as u32;
            graph.append_edge(n(a * 5), n(b * 5), u8::arbitrary(g)).unwrap();
        }
        let root = n((usize::arbitrary(g) % node_count) as u32 * 5);
        Self(graph, root)
    }
}
