#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::HashSet;

use mgraph_core::{Decl, Graph};
use mgraph_subgraph::{Config, DedupeMode, Embedding, SubgraphMatcher, find_embedding, find_embedding_by};
use rstest::rstest;

mod common;

use common::{InducedPair, PatternTarget, init_test_logger, is_sound, n};

fn labelled(nodes: &[(u32, &'static str)], edges: &[(u32, u32, &'static str)]) -> Graph<&'static str, &'static str> {
    Graph::from_parts(
        nodes.iter().map(|&(id, attr)| (n(id), attr)),
        edges.iter().map(|&(a, b, attr)| (n(a), n(b), attr)),
    )
    .unwrap()
}

fn ab_target() -> Graph<&'static str, &'static str> {
    labelled(&[(10, "A"), (20, "B")], &[(10, 20, "e")])
}

#[test]
fn single_node_pattern() {
    init_test_logger();
    let pattern = labelled(&[(1, "A")], &[]);
    let embedding = find_embedding(&pattern, &ab_target()).unwrap();
    assert_eq!(embedding.into_parts(), (vec![n(1)], vec![n(10)]));
}

#[rstest]
#[case::edge(&[(1, "A"), (2, "B")], &[(1, 2, "e")], Some(vec![10, 20]))]
#[case::reversed_ids(&[(5, "B"), (4, "A")], &[(4, 5, "e")], Some(vec![20, 10]))]
#[case::wrong_edge_attr(&[(1, "A"), (2, "B")], &[(1, 2, "f")], None)]
#[case::wrong_direction(&[(1, "A"), (2, "B")], &[(2, 1, "e")], None)]
#[case::missing_label(&[(1, "C")], &[], None)]
#[case::too_large(&[(1, "A"), (2, "B"), (3, "B")], &[], None)]
#[case::empty(&[], &[], Some(vec![]))]
fn find_embedding_cases(
    #[case] nodes: &[(u32, &'static str)],
    #[case] edges: &[(u32, u32, &'static str)],
    #[case] expected: Option<Vec<u32>>,
) {
    init_test_logger();
    let pattern = labelled(nodes, edges);
    let found = find_embedding(&pattern, &ab_target());
    let targets = found.map(|e| e.target.iter().map(|id| id.raw()).collect::<Vec<_>>());
    assert_eq!(targets, expected);
}

#[test]
fn target_edges_between_images_must_exist_in_pattern() {
    let pattern = labelled(&[(0, "x"), (1, "x")], &[(0, 1, "e")]);
    let target = labelled(&[(0, "x"), (1, "x")], &[(0, 1, "e"), (1, 0, "e")]);
    assert!(find_embedding(&pattern, &target).is_none());

    let loose = labelled(&[(0, "x"), (1, "x"), (2, "x")], &[(0, 1, "e"), (2, 0, "e")]);
    let embedding = find_embedding(&pattern, &loose).unwrap();
    assert_eq!(embedding.target, vec![n(0), n(1)]);
}

#[rstest]
#[case::one_of_two(&[(0, 1, "x")], true)]
#[case::both_covered(&[(0, 1, "x"), (0, 1, "x")], true)]
#[case::one_uncovered(&[(0, 1, "x"), (0, 1, "z")], false)]
fn parallel_edge_attributes_are_covered(#[case] pattern_edges: &[(u32, u32, &'static str)], #[case] expected: bool) {
    let pattern = labelled(&[(0, "n"), (1, "n")], pattern_edges);
    let target = labelled(&[(0, "n"), (1, "n")], &[(0, 1, "y"), (0, 1, "x")]);
    assert_eq!(find_embedding(&pattern, &target).is_some(), expected);
}

#[test]
fn comparators_bridge_attribute_types() {
    init_test_logger();
    let pattern: Graph<char, u32> = Graph::create([
        Decl::Node(n(0), 'a'),
        Decl::Node(n(1), 'b'),
        Decl::Edge(n(0), n(1), 2),
    ])
    .unwrap();
    let target: Graph<String, u32> = Graph::create([
        Decl::Node(n(3), "bravo".to_owned()),
        Decl::Node(n(4), "alpha".to_owned()),
        Decl::Node(n(5), "beta".to_owned()),
        Decl::Edge(n(4), n(3), 3),
        Decl::Edge(n(4), n(5), 9),
    ])
    .unwrap();

    let starts_with = |c: &char, s: &String| s.starts_with(*c);
    let at_least = |want: &u32, have: &u32| have >= want;
    let embedding = find_embedding_by(&pattern, &target, starts_with, at_least).unwrap();
    assert_eq!(embedding.target_of(n(0)), Some(n(4)));
    assert_eq!(embedding.target_of(n(1)), Some(n(3)));

    let strict = |want: &u32, have: &u32| have == want;
    assert!(find_embedding_by(&pattern, &target, starts_with, strict).is_none());
}

#[test]
fn enumerate_star_leaves() {
    init_test_logger();
    // pattern: hub with two leaves; target: hub with three leaves
    let pattern = labelled(&[(0, "hub"), (1, "leaf"), (2, "leaf")], &[(0, 1, "e"), (0, 2, "e")]);
    let target = labelled(
        &[(0, "hub"), (1, "leaf"), (2, "leaf"), (3, "leaf")],
        &[(0, 1, "e"), (0, 2, "e"), (0, 3, "e")],
    );
    let eq = |a: &&str, b: &&str| a == b;

    let config = Config::default();
    let all = SubgraphMatcher::new(&pattern, &target, eq, eq, &config).enumerate_all();
    assert_eq!(all.len(), 6);
    assert!(all.iter().all(|e| is_sound(&pattern, &target, e)));

    let config = Config::default().with_dedupe(DedupeMode::TargetSet);
    let sets = SubgraphMatcher::new(&pattern, &target, eq, eq, &config).enumerate_all();
    assert_eq!(sets.len(), 3);

    let config = Config::default().with_limit(0);
    assert!(SubgraphMatcher::new(&pattern, &target, eq, eq, &config)
        .enumerate_all()
        .is_empty());
}

#[test]
fn disconnected_pattern_follows_configured_order() {
    let pattern = labelled(&[(0, "a"), (1, "a")], &[]);
    let target = labelled(&[(5, "a"), (6, "a")], &[]);
    let eq = |a: &&str, b: &&str| a == b;

    let config = Config::default();
    let default = SubgraphMatcher::new(&pattern, &target, eq, eq, &config).find_first().unwrap();
    assert_eq!(default.target, vec![n(5), n(6)]);

    // node 1 is placed first, so it takes the first target
    let config = Config::default().with_order([n(1)]);
    let ordered = SubgraphMatcher::new(&pattern, &target, eq, eq, &config).find_first().unwrap();
    assert_eq!(ordered.pattern, vec![n(0), n(1)]);
    assert_eq!(ordered.target, vec![n(6), n(5)]);
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn prop_found_embeddings_are_sound(pair: PatternTarget) -> bool {
            find_embedding(&pair.pattern, &pair.target)
                .is_none_or(|e| is_sound(&pair.pattern, &pair.target, &e))
        }

        fn prop_graph_matches_itself(pair: PatternTarget) -> bool {
            let g = pair.target;
            find_embedding(&g, &g).is_some_and(|e| e.len() == g.node_count() && is_sound(&g, &g, &e))
        }

        fn prop_induced_subgraph_is_found(pair: InducedPair) -> bool {
            find_embedding(&pair.pattern, &pair.target)
                .is_some_and(|e| is_sound(&pair.pattern, &pair.target, &e))
        }

        fn prop_enumerated_embeddings_are_sound_and_distinct(pair: PatternTarget) -> bool {
            let config = Config::default();
            let eq = |a: &u8, b: &u8| a == b;
            let all = SubgraphMatcher::new(&pair.pattern, &pair.target, eq, eq, &config).enumerate_all();
            let distinct: HashSet<&Embedding> = all.iter().collect();
            all.iter().all(|e| is_sound(&pair.pattern, &pair.target, e))
                && distinct.len() == all.len()
                && find_embedding(&pair.pattern, &pair.target).is_some() == !all.is_empty()
        }
    }
}
