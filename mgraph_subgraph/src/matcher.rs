use std::collections::HashSet;
use std::ops::ControlFlow;

use itertools::Itertools;
use mgraph_core::{Graph, GraphIndex};
use tracing::{debug, trace};

use crate::feasibility::is_feasible_pair;
use crate::state::State;
use crate::{Config, DedupeMode, Embedding};

/// VF2 search for embeddings of a pattern graph into a target graph.
///
/// An embedding maps every pattern node to a distinct target node accepted
/// by `node_comp`. Every pattern edge needs a target edge between the images
/// whose attributes cover it under `edge_comp`, and every target edge
/// between two images needs some pattern edge in the same direction. Target
/// nodes outside the image are unconstrained.
pub struct SubgraphMatcher<'p, 't, 'cfg, N1, E1, N2, E2, NC, EC> {
    pattern_index: GraphIndex<'p, N1, E1>,
    target_index: GraphIndex<'t, N2, E2>,
    node_comp: NC,
    edge_comp: EC,
    config: &'cfg Config,
    /// Every pattern position, configured order first.
    fallback_order: Vec<usize>,
}

impl<'p, 't, 'cfg, N1, E1, N2, E2, NC, EC> SubgraphMatcher<'p, 't, 'cfg, N1, E1, N2, E2, NC, EC>
where
    NC: Fn(&N1, &N2) -> bool,
    EC: Fn(&E1, &E2) -> bool,
{
    /// Prepares a search of `pattern` inside `target`.
    pub fn new(
        pattern: &'p Graph<N1, E1>,
        target: &'t Graph<N2, E2>,
        node_comp: NC,
        edge_comp: EC,
        config: &'cfg Config,
    ) -> Self {
        let pattern_index = GraphIndex::build(pattern);
        let target_index = GraphIndex::build(target);

        let fallback_order = config
            .order
            .iter()
            .flatten()
            .filter_map(|&id| pattern_index.index_of(id))
            .chain(0..pattern_index.num_nodes())
            .unique()
            .collect();

        Self {
            pattern_index,
            target_index,
            node_comp,
            edge_comp,
            config,
            fallback_order,
        }
    }

    /// First embedding in search order, if any.
    #[must_use]
    pub fn find_first(&self) -> Option<Embedding> {
        debug!(
            "searching for first embedding: pattern {} nodes, target {} nodes",
            self.pattern_index.num_nodes(),
            self.target_index.num_nodes()
        );

        let mut found = None;
        let mut state = State::new(&self.pattern_index, &self.target_index);
        let _ = self.search(&mut state, &mut |embedding| {
            found = Some(embedding);
            ControlFlow::Break(())
        });

        debug!("first embedding found: {}", found.is_some());
        found
    }

    /// Every embedding, deduplicated per [`Config::dedupe`] and capped by
    /// [`Config::limit`].
    #[must_use]
    pub fn enumerate_all(&self) -> Vec<Embedding> {
        debug!(
            "enumerating embeddings: pattern {} nodes, target {} nodes, limit {:?}",
            self.pattern_index.num_nodes(),
            self.target_index.num_nodes(),
            self.config.limit
        );

        let limit = self.config.limit.unwrap_or(usize::MAX);
        let mut results = Vec::new();
        if limit > 0 {
            let mut state = State::new(&self.pattern_index, &self.target_index);
            let _ = self.search(&mut state, &mut |embedding| {
                results.push(embedding);
                if results.len() >= limit {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
        }
        let raw = results.len();

        match self.config.dedupe {
            DedupeMode::Full => {
                let mut seen: HashSet<Embedding> = HashSet::new();
                results.retain(|e| seen.insert(e.clone()));
            }
            DedupeMode::TargetSet => {
                let mut seen = HashSet::new();
                results.retain(|e| seen.insert(e.target_signature()));
            }
        }

        debug!("enumerated {} embeddings, {} after dedupe", raw, results.len());
        results
    }

    fn search(
        &self,
        state: &mut State<'_, 'p, 't, N1, E1, N2, E2>,
        on_goal: &mut impl FnMut(Embedding) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        if state.is_goal() {
            return on_goal(self.embedding_of(state));
        }
        if state.is_dead() {
            trace!("dead state at depth {}", state.core_len());
            return ControlFlow::Continue(());
        }

        let frontier = state.frontier();
        let Some(node1) = state.pattern_candidate(frontier, &self.fallback_order) else {
            return ControlFlow::Continue(());
        };

        // Phase 1: compute candidates with only immutable access to `state`.
        let view = &*state;
        let candidates: Vec<usize> = view
            .target_candidates(frontier)
            .into_iter()
            .filter(|&node2| {
                let feasible = is_feasible_pair(view, node1, node2, &self.node_comp, &self.edge_comp);
                if !feasible {
                    trace!("pair ({}, {}) infeasible", node1, node2);
                }
                feasible
            })
            .collect();

        // Phase 2: iterate candidates and perform scoped mutable updates.
        for node2 in candidates {
            with_pair(state, node1, node2, |inner| self.search(inner, on_goal))?;
        }
        ControlFlow::Continue(())
    }

    fn embedding_of(&self, state: &State<'_, 'p, 't, N1, E1, N2, E2>) -> Embedding {
        let (pattern, target) = state
            .core_pairs()
            .into_iter()
            .map(|(node1, node2)| (self.pattern_index.node_id(node1), self.target_index.node_id(node2)))
            .unzip();
        Embedding::new(pattern, target)
    }
}

fn with_pair<'a, 'p, 't, N1, E1, N2, E2, R>(
    state: &mut State<'a, 'p, 't, N1, E1, N2, E2>,
    node1: usize,
    node2: usize,
    f: impl FnOnce(&mut State<'a, 'p, 't, N1, E1, N2, E2>) -> R,
) -> R {
    state.push_pair(node1, node2);
    let result = f(state);
    state.pop_pair();
    result
}

#[cfg(test)]
mod tests {
    use mgraph_core::{Decl, NodeId};

    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn eq<T: PartialEq>(a: &T, b: &T) -> bool {
        a == b
    }

    fn triangle() -> Graph<(), ()> {
        Graph::create([
            Decl::Node(n(0), ()),
            Decl::Node(n(1), ()),
            Decl::Node(n(2), ()),
            Decl::Edge(n(0), n(1), ()),
            Decl::Edge(n(1), n(2), ()),
            Decl::Edge(n(2), n(0), ()),
        ])
        .unwrap()
    }

    #[test]
    fn triangle_rotations() {
        let g = triangle();
        let config = Config::default();
        let matcher = SubgraphMatcher::new(&g, &g, eq::<()>, eq::<()>, &config);

        let first = matcher.find_first().unwrap();
        assert_eq!(first.target, vec![n(0), n(1), n(2)]);

        let all = matcher.enumerate_all();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.pattern == vec![n(0), n(1), n(2)]));

        let config = Config::default().with_dedupe(DedupeMode::TargetSet);
        let matcher = SubgraphMatcher::new(&g, &g, eq::<()>, eq::<()>, &config);
        assert_eq!(matcher.enumerate_all().len(), 1);

        let config = Config::default().with_limit(2);
        let matcher = SubgraphMatcher::new(&g, &g, eq::<()>, eq::<()>, &config);
        assert_eq!(matcher.enumerate_all().len(), 2);
    }

    #[test]
    fn configured_order_picks_the_first_node() {
        let pattern: Graph<char, ()> = Graph::create([
            Decl::Node(n(1), 'a'),
            Decl::Node(n(2), 'b'),
        ])
        .unwrap();
        let target: Graph<char, ()> = Graph::create([
            Decl::Node(n(7), 'b'),
            Decl::Node(n(8), 'a'),
        ])
        .unwrap();

        let config = Config::default().with_order([n(2), n(99)]);
        let matcher = SubgraphMatcher::new(&pattern, &target, eq::<char>, eq::<()>, &config);
        assert_eq!(matcher.fallback_order, vec![1, 0]);

        let embedding = matcher.find_first().unwrap();
        assert_eq!(embedding.pattern, vec![n(1), n(2)]);
        assert_eq!(embedding.target, vec![n(8), n(7)]);
    }
}
