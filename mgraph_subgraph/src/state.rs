//! Mutable VF2 search state with push/pop undo.
//!
//! Each graph side keeps its core mapping plus, per node, the search depth at
//! which the node first joined the "in" terminal set (it has an edge into the
//! mapping) and the "out" terminal set (an edge from the mapping). Mapped
//! nodes are members of both. A pop undoes exactly the marks its push set,
//! identified by depth, and restores the terminal counters from the frame.

use std::num::NonZeroUsize;

use contracts::debug_requires;
use mgraph_core::GraphIndex;
use tracing::trace;

/// Sizes of the terminal sets of one side, mapped nodes included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Terminals {
    pub(crate) in_len: usize,
    pub(crate) out_len: usize,
    pub(crate) both_len: usize,
}

/// Mapping and terminal bookkeeping of one graph.
#[derive(Debug)]
pub(crate) struct Marks {
    core: Vec<Option<usize>>,
    in_since: Vec<Option<NonZeroUsize>>,
    out_since: Vec<Option<NonZeroUsize>>,
    terminals: Terminals,
}

impl Marks {
    fn new(node_count: usize) -> Self {
        Self {
            core: vec![None; node_count],
            in_since: vec![None; node_count],
            out_since: vec![None; node_count],
            terminals: Terminals::default(),
        }
    }

    pub(crate) fn partner(&self, node: usize) -> Option<usize> {
        self.core[node]
    }

    pub(crate) fn is_mapped(&self, node: usize) -> bool {
        self.core[node].is_some()
    }

    pub(crate) fn in_terminal(&self, node: usize) -> bool {
        self.in_since[node].is_some()
    }

    pub(crate) fn out_terminal(&self, node: usize) -> bool {
        self.out_since[node].is_some()
    }

    fn mark_in(&mut self, node: usize, depth: Option<NonZeroUsize>) {
        if self.in_since[node].is_none() {
            self.in_since[node] = depth;
            self.terminals.in_len += 1;
            if self.out_since[node].is_some() {
                self.terminals.both_len += 1;
            }
        }
    }

    fn mark_out(&mut self, node: usize, depth: Option<NonZeroUsize>) {
        if self.out_since[node].is_none() {
            self.out_since[node] = depth;
            self.terminals.out_len += 1;
            if self.in_since[node].is_some() {
                self.terminals.both_len += 1;
            }
        }
    }

    fn unmark(&mut self, node: usize, depth: Option<NonZeroUsize>) {
        if self.in_since[node] == depth {
            self.in_since[node] = None;
        }
        if self.out_since[node] == depth {
            self.out_since[node] = None;
        }
    }
}

/// One graph of the search: its adjacency index and its marks.
#[derive(Debug)]
pub(crate) struct Side<'a, 'g, N, E> {
    pub(crate) index: &'a GraphIndex<'g, N, E>,
    pub(crate) marks: Marks,
}

impl<'a, 'g, N, E> Side<'a, 'g, N, E> {
    fn new(index: &'a GraphIndex<'g, N, E>) -> Self {
        Self {
            index,
            marks: Marks::new(index.num_nodes()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.core.len()
    }

    /// Counterpart of `other` when `node` is about to map to `partner`.
    ///
    /// A self-loop on `node` resolves to `partner` itself.
    pub(crate) fn partner_of(&self, other: usize, node: usize, partner: usize) -> Option<usize> {
        if other == node {
            Some(partner)
        } else {
            self.marks.partner(other)
        }
    }

    fn extend(&mut self, node: usize, partner: usize, depth: Option<NonZeroUsize>) {
        self.marks.mark_in(node, depth);
        self.marks.mark_out(node, depth);
        self.marks.core[node] = Some(partner);

        for &(pred, _) in self.index.fanin(node) {
            self.marks.mark_in(pred, depth);
        }
        for &(succ, _) in self.index.fanout(node) {
            self.marks.mark_out(succ, depth);
        }
    }

    fn retract(&mut self, node: usize, depth: Option<NonZeroUsize>, saved: Terminals) {
        self.marks.unmark(node, depth);
        for &(pred, _) in self.index.fanin(node) {
            self.marks.unmark(pred, depth);
        }
        for &(succ, _) in self.index.fanout(node) {
            self.marks.unmark(succ, depth);
        }
        self.marks.core[node] = None;
        self.marks.terminals = saved;
    }
}

/// Which terminal set candidate pairs are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Frontier {
    /// Nodes in both the in and out terminal sets.
    Both,
    /// Nodes in the out terminal set.
    Out,
    /// Nodes in the in terminal set.
    In,
    /// Any unmapped node.
    Unrestricted,
}

impl Frontier {
    fn admits(self, marks: &Marks, node: usize) -> bool {
        match self {
            Self::Both => marks.in_terminal(node) && marks.out_terminal(node),
            Self::Out => marks.out_terminal(node),
            Self::In => marks.in_terminal(node),
            Self::Unrestricted => true,
        }
    }
}

/// Undo record of one pushed pair.
#[derive(Debug)]
struct Frame {
    pattern_node: usize,
    target_node: usize,
    saved: [Terminals; 2],
}

#[derive(Debug)]
pub(crate) struct State<'a, 'p, 't, N1, E1, N2, E2> {
    pub(crate) pattern: Side<'a, 'p, N1, E1>,
    pub(crate) target: Side<'a, 't, N2, E2>,
    core_len: usize,
    frames: Vec<Frame>,
}

impl<'a, 'p, 't, N1, E1, N2, E2> State<'a, 'p, 't, N1, E1, N2, E2> {
    pub(crate) fn new(pattern: &'a GraphIndex<'p, N1, E1>, target: &'a GraphIndex<'t, N2, E2>) -> Self {
        let pattern = Side::new(pattern);
        let target = Side::new(target);
        let frames = Vec::with_capacity(pattern.len());
        Self {
            pattern,
            target,
            core_len: 0,
            frames,
        }
    }

    pub(crate) const fn core_len(&self) -> usize {
        self.core_len
    }

    /// Every pattern node is mapped.
    pub(crate) fn is_goal(&self) -> bool {
        self.core_len == self.pattern.len()
    }

    /// No extension of this state can reach the goal.
    pub(crate) fn is_dead(&self) -> bool {
        let p = self.pattern.marks.terminals;
        let t = self.target.marks.terminals;
        self.pattern.len() > self.target.len()
            || p.both_len > t.both_len
            || p.out_len > t.out_len
            || p.in_len > t.in_len
    }

    /// Terminal set the next pair is drawn from.
    ///
    /// Both sides must have unmapped members in a set for it to be used.
    pub(crate) fn frontier(&self) -> Frontier {
        let p = self.pattern.marks.terminals;
        let t = self.target.marks.terminals;
        let open = |a: usize, b: usize| a > self.core_len && b > self.core_len;

        if open(p.both_len, t.both_len) {
            Frontier::Both
        } else if open(p.out_len, t.out_len) {
            Frontier::Out
        } else if open(p.in_len, t.in_len) {
            Frontier::In
        } else {
            Frontier::Unrestricted
        }
    }

    /// Pattern node to extend the mapping with.
    ///
    /// `fallback_order` lists every pattern position and is used only for an
    /// unrestricted frontier.
    pub(crate) fn pattern_candidate(&self, frontier: Frontier, fallback_order: &[usize]) -> Option<usize> {
        let marks = &self.pattern.marks;
        match frontier {
            Frontier::Unrestricted => fallback_order
                .iter()
                .copied()
                .find(|&node| !marks.is_mapped(node)),
            _ => (0..self.pattern.len()).find(|&node| !marks.is_mapped(node) && frontier.admits(marks, node)),
        }
    }

    /// Unmapped target positions in `frontier`, ascending.
    pub(crate) fn target_candidates(&self, frontier: Frontier) -> Vec<usize> {
        let marks = &self.target.marks;
        (0..self.target.len())
            .filter(|&node| !marks.is_mapped(node) && frontier.admits(marks, node))
            .collect()
    }

    #[debug_requires(pattern_node < self.pattern.len() && !self.pattern.marks.is_mapped(pattern_node))]
    #[debug_requires(target_node < self.target.len() && !self.target.marks.is_mapped(target_node))]
    #[debug_requires(self.core_len < self.pattern.len() && self.core_len < self.target.len())]
    pub(crate) fn push_pair(&mut self, pattern_node: usize, target_node: usize) {
        self.frames.push(Frame {
            pattern_node,
            target_node,
            saved: [self.pattern.marks.terminals, self.target.marks.terminals],
        });
        self.core_len += 1;
        let depth = NonZeroUsize::new(self.core_len);

        self.pattern.extend(pattern_node, target_node, depth);
        self.target.extend(target_node, pattern_node, depth);
        trace!(
            "depth {}: pushed pair ({}, {})",
            self.core_len, pattern_node, target_node
        );
    }

    /// Undoes the latest [`State::push_pair`].
    ///
    /// # Panics
    ///
    /// If no pair is pushed; the search backtracks exactly one level per push.
    pub(crate) fn pop_pair(&mut self) {
        let frame = self
            .frames
            .pop()
            .expect("pop_pair without a matching push_pair");
        let depth = NonZeroUsize::new(self.core_len);
        let [pattern_saved, target_saved] = frame.saved;

        self.pattern.retract(frame.pattern_node, depth, pattern_saved);
        self.target.retract(frame.target_node, depth, target_saved);
        self.core_len -= 1;
        trace!(
            "depth {}: popped pair ({}, {})",
            self.core_len + 1,
            frame.pattern_node,
            frame.target_node
        );
    }

    /// Mapped `(pattern, target)` positions in pattern position order.
    pub(crate) fn core_pairs(&self) -> Vec<(usize, usize)> {
        self.pattern
            .marks
            .core
            .iter()
            .enumerate()
            .filter_map(|(node, partner)| partner.map(|partner| (node, partner)))
            .collect()
    }
}
