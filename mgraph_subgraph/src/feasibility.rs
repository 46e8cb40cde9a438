//! Pair feasibility rules.

use mgraph_core::GraphIndex;

use crate::state::{Marks, Side, State};

/// Unmapped neighbour edges of a candidate node, by terminal membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Lookahead {
    term_in: usize,
    term_out: usize,
    new: usize,
}

impl Lookahead {
    fn count(&mut self, marks: &Marks, node: usize) {
        let (in_terminal, out_terminal) = (marks.in_terminal(node), marks.out_terminal(node));
        if in_terminal {
            self.term_in += 1;
        }
        if out_terminal {
            self.term_out += 1;
        }
        if !in_terminal && !out_terminal {
            self.new += 1;
        }
    }

    const fn fits_within(self, other: Self) -> bool {
        self.term_in <= other.term_in && self.term_out <= other.term_out && self.new <= other.new
    }
}

/// Every pattern edge `from1 -> to1` finds a compatible target edge
/// `from2 -> to2`. Parallel edges are covered, not paired off.
pub(crate) fn compatible_edge<N1, E1, N2, E2>(
    edge_comp: &impl Fn(&E1, &E2) -> bool,
    pattern: &GraphIndex<'_, N1, E1>,
    (from1, to1): (usize, usize),
    target: &GraphIndex<'_, N2, E2>,
    (from2, to2): (usize, usize),
) -> bool {
    pattern
        .edge_attrs(from1, to1)
        .all(|attr1| target.edge_attrs(from2, to2).any(|attr2| edge_comp(attr1, attr2)))
}

/// Whether mapping `node1` to `node2` keeps the partial mapping consistent.
///
/// Edges from `node1` to mapped pattern nodes need a compatible counterpart
/// in the target; edges from `node2` to mapped target nodes need some edge
/// back in the pattern. Unmapped neighbours are counted per terminal set and
/// the pattern may not need more of any kind than the target offers.
pub(crate) fn is_feasible_pair<N1, E1, N2, E2>(
    state: &State<'_, '_, '_, N1, E1, N2, E2>,
    node1: usize,
    node2: usize,
    node_comp: &impl Fn(&N1, &N2) -> bool,
    edge_comp: &impl Fn(&E1, &E2) -> bool,
) -> bool {
    let pattern = &state.pattern;
    let target = &state.target;
    debug_assert!(!pattern.marks.is_mapped(node1) && !target.marks.is_mapped(node2));

    if !node_comp(pattern.index.node_attr(node1), target.index.node_attr(node2)) {
        return false;
    }

    let mut pattern_lookahead = Lookahead::default();
    for &(other1, _) in pattern.index.fanout(node1) {
        match pattern.partner_of(other1, node1, node2) {
            Some(other2) => {
                if !target.index.has_edge(node2, other2)
                    || !compatible_edge(edge_comp, pattern.index, (node1, other1), target.index, (node2, other2))
                {
                    return false;
                }
            }
            None => pattern_lookahead.count(&pattern.marks, other1),
        }
    }
    for &(other1, _) in pattern.index.fanin(node1) {
        match pattern.partner_of(other1, node1, node2) {
            Some(other2) => {
                if !target.index.has_edge(other2, node2)
                    || !compatible_edge(edge_comp, pattern.index, (other1, node1), target.index, (other2, node2))
                {
                    return false;
                }
            }
            None => pattern_lookahead.count(&pattern.marks, other1),
        }
    }

    let Some(target_lookahead) = target_lookahead(target, node2, pattern, node1) else {
        return false;
    };
    pattern_lookahead.fits_within(target_lookahead)
}

/// Lookahead counts of `node2`, or `None` when one of its edges to a mapped
/// node has no pattern counterpart.
fn target_lookahead<N1, E1, N2, E2>(
    target: &Side<'_, '_, N2, E2>,
    node2: usize,
    pattern: &Side<'_, '_, N1, E1>,
    node1: usize,
) -> Option<Lookahead> {
    let mut lookahead = Lookahead::default();
    for &(other2, _) in target.index.fanout(node2) {
        match target.partner_of(other2, node2, node1) {
            Some(other1) if !pattern.index.has_edge(node1, other1) => return None,
            Some(_) => {}
            None => lookahead.count(&target.marks, other2),
        }
    }
    for &(other2, _) in target.index.fanin(node2) {
        match target.partner_of(other2, node2, node1) {
            Some(other1) if !pattern.index.has_edge(other1, node1) => return None,
            Some(_) => {}
            None => lookahead.count(&target.marks, other2),
        }
    }
    Some(lookahead)
}
