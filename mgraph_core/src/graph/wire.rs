//! Validated deserialization for [`Graph`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::{Edge, Graph};
use crate::{GraphError, NodeId};

/// Serialized shape of a [`Graph`]; checked by [`Graph::from_parts`] on the way in.
#[derive(Deserialize)]
#[serde(bound(deserialize = "N: Deserialize<'de>, E: Deserialize<'de>"))]
pub(super) struct GraphParts<N, E> {
    #[serde(deserialize_with = "node_entries")]
    nodes: Vec<(NodeId, N)>,
    edges: Vec<Edge<E>>,
}

impl<N, E> TryFrom<GraphParts<N, E>> for Graph<N, E> {
    type Error = GraphError;

    fn try_from(parts: GraphParts<N, E>) -> Result<Self, Self::Error> {
        let edges = parts.edges.into_iter().map(|e| (e.from, e.to, e.attr));
        Self::from_parts(parts.nodes, edges)
    }
}

/// Reads the node map entry by entry so a repeated id is not silently dropped.
fn node_entries<'de, N, D>(deserializer: D) -> Result<Vec<(NodeId, N)>, D::Error>
where
    N: Deserialize<'de>,
    D: Deserializer<'de>,
{
    struct Entries<N>(PhantomData<N>);

    impl<'de, N: Deserialize<'de>> Visitor<'de> for Entries<N> {
        type Value = Vec<(NodeId, N)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from node id to node attribute")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries(PhantomData))
}
