//! Attribute lookups, node merging and graph composition.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use super::{Edge, Graph};
use crate::{GraphError, NodeId, Result};

impl<N: PartialEq, E> Graph<N, E> {
    /// First node, in storage order, whose attribute equals `attr`.
    #[must_use]
    pub fn node_by_attr(&self, attr: &N) -> Option<NodeId> {
        self.nodes()
            .find(|(_, candidate)| *candidate == attr)
            .map(|(id, _)| id)
    }

    /// Appends a node under a generated id, keeping attributes unique.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateAttr`] if some node already carries `attr` and
    /// [`GraphError::IdSpaceExhausted`] if no fresh id is left.
    pub fn append_node_attr(&mut self, attr: N) -> Result<NodeId> {
        if self.node_by_attr(&attr).is_some() {
            return Err(GraphError::DuplicateAttr);
        }
        let id = self.gen_node_id()?;
        self.append_node(id, attr)?;
        Ok(id)
    }

    /// Appends an edge between the nodes found by their attributes.
    ///
    /// # Errors
    ///
    /// [`GraphError::AttrNotFound`] if either attribute is not carried by any node.
    pub fn append_edge_attr(&mut self, from_attr: &N, to_attr: &N, attr: E) -> Result<()> {
        let from = self.node_by_attr(from_attr).ok_or(GraphError::AttrNotFound)?;
        let to = self.node_by_attr(to_attr).ok_or(GraphError::AttrNotFound)?;
        self.append_edge(from, to, attr)
    }
}

impl<N, E: PartialEq> Graph<N, E> {
    /// Rewrites every `from -> to` edge attribute equal to `old` to `new`.
    ///
    /// Returns the number of rewritten edges.
    pub fn replace_edge_attr(&mut self, from: NodeId, to: NodeId, old: &E, new: E) -> usize
    where
        E: Clone,
    {
        let mut rewritten = 0;
        for edge in self.edges_mut() {
            if edge.connects(from, to) && edge.attr == *old {
                edge.attr = new.clone();
                rewritten += 1;
            }
        }
        rewritten
    }
}

impl<N, X: PartialEq, Y: PartialEq> Graph<N, (X, Y)> {
    /// Removes the first `from -> to` edge whose pair attribute equals `attr`
    /// component by component.
    ///
    /// Returns `Ok(false)` when the pair has edges but none carries `attr`.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] only when the pair has no edge at all.
    pub fn remove_edge_by_attr(&mut self, from: NodeId, to: NodeId, attr: &(X, Y)) -> Result<bool> {
        if !self.has_edge(from, to) {
            return Err(GraphError::EdgeNotFound { from, to });
        }
        let position = self
            .edges()
            .iter()
            .position(|e| e.connects(from, to) && e.attr.0 == attr.0 && e.attr.1 == attr.1);
        match position {
            Some(pos) => {
                self.edges_mut().remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<N, E> Graph<N, E> {
    /// Copies `subgraph` into this graph under freshly generated ids.
    ///
    /// `sub_to_graph` edges go from a subgraph node (old subgraph id) to a node
    /// of this graph; `graph_to_sub` edges go the other way. Returns the
    /// old-id to new-id translation.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if a subgraph edge or an inter-graph edge
    /// names a node that does not exist on its side, and
    /// [`GraphError::IdSpaceExhausted`] if the subgraph nodes do not fit above
    /// the largest stored id. Nothing is merged then.
    pub fn append_subgraph(
        &mut self,
        subgraph: &Self,
        sub_to_graph: &[(NodeId, NodeId, E)],
        graph_to_sub: &[(NodeId, NodeId, E)],
    ) -> Result<HashMap<NodeId, NodeId>>
    where
        N: Clone,
        E: Clone,
    {
        for edge in subgraph.edges() {
            subgraph.require_node(edge.from)?;
            subgraph.require_node(edge.to)?;
        }
        for (sub_id, graph_id, _) in sub_to_graph {
            subgraph.require_node(*sub_id)?;
            self.require_node(*graph_id)?;
        }
        for (graph_id, sub_id, _) in graph_to_sub {
            self.require_node(*graph_id)?;
            subgraph.require_node(*sub_id)?;
        }

        let fresh = self.fresh_node_ids(subgraph.node_count())?;
        let mut ids_new = HashMap::with_capacity(fresh.len());
        for ((sub_id, attr), new_id) in subgraph.nodes().zip(fresh) {
            self.nodes.insert(new_id, attr.clone());
            ids_new.insert(sub_id, new_id);
        }

        let translated = subgraph
            .edges()
            .iter()
            .map(|e| Edge::new(ids_new[&e.from], ids_new[&e.to], e.attr.clone()))
            .chain(
                sub_to_graph
                    .iter()
                    .map(|(sub_id, graph_id, attr)| Edge::new(ids_new[sub_id], *graph_id, attr.clone())),
            )
            .chain(
                graph_to_sub
                    .iter()
                    .map(|(graph_id, sub_id, attr)| Edge::new(*graph_id, ids_new[sub_id], attr.clone())),
            );
        self.edges_mut().extend(translated);

        debug!(
            "appended subgraph: {} nodes, {} internal edges, {} inter-graph edges",
            subgraph.node_count(),
            subgraph.edge_count(),
            sub_to_graph.len() + graph_to_sub.len()
        );
        Ok(ids_new)
    }

    /// Merges the listed nodes into one new node carrying `attr`.
    ///
    /// Every edge endpoint naming a merged node is rewired to the new node and
    /// edges that become self-loops through this rewiring are dropped, so the
    /// result may hold parallel edges. Returns the id of the new node, which
    /// is appended last.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if an id is absent or listed twice and
    /// [`GraphError::IdSpaceExhausted`] if no fresh id is left. The graph is
    /// unchanged on error.
    pub fn replace(&mut self, ids: &[NodeId], attr: N) -> Result<NodeId> {
        if let Some(dup) = ids.iter().copied().duplicates().next() {
            return Err(GraphError::NodeNotFound(dup));
        }
        for id in ids {
            self.require_node(*id)?;
        }

        let new_id = self.gen_node_id()?;
        let merged: HashSet<NodeId> = ids.iter().copied().collect();
        for id in ids {
            self.remove_node(*id)?;
        }

        let before = self.edge_count();
        self.edges_mut().retain_mut(|edge| {
            let from_merged = merged.contains(&edge.from);
            let to_merged = merged.contains(&edge.to);
            if from_merged {
                edge.from = new_id;
            }
            if to_merged {
                edge.to = new_id;
            }
            !((from_merged || to_merged) && edge.from == edge.to)
        });
        let dropped = before - self.edge_count();

        self.nodes.insert(new_id, attr);
        debug!(
            "merged {} nodes into {}, dropped {} self-loops",
            ids.len(),
            new_id,
            dropped
        );
        Ok(new_id)
    }

    /// Moves every `from -> to` edge to `new_from -> new_to`.
    ///
    /// Returns the number of moved edges.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] if the pair has no edge and
    /// [`GraphError::NodeNotFound`] if a new endpoint is absent.
    pub fn reconnect_edges(
        &mut self,
        from: NodeId,
        to: NodeId,
        new_from: NodeId,
        new_to: NodeId,
    ) -> Result<usize> {
        if !self.has_edge(from, to) {
            return Err(GraphError::EdgeNotFound { from, to });
        }
        self.require_node(new_from)?;
        self.require_node(new_to)?;

        let mut moved = 0;
        for edge in self.edges_mut() {
            if edge.connects(from, to) {
                edge.from = new_from;
                edge.to = new_to;
                moved += 1;
            }
        }
        Ok(moved)
    }
}
