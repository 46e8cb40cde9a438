use mgraph_core::NodeId;

/// One embedding of a pattern graph into a target graph.
///
/// `pattern[i]` maps to `target[i]`. Pattern ids appear in pattern storage
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Embedding {
    /// Matched pattern node ids.
    pub pattern: Vec<NodeId>,
    /// Target node id of each pattern node, index for index.
    pub target: Vec<NodeId>,
}

impl Embedding {
    pub(crate) fn new(pattern: Vec<NodeId>, target: Vec<NodeId>) -> Self {
        debug_assert_eq!(pattern.len(), target.len());
        Self { pattern, target }
    }

    /// Number of matched pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// Whether the embedding is empty (an empty pattern).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// `(pattern, target)` pairs in pattern storage order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pattern.iter().copied().zip(self.target.iter().copied())
    }

    /// Target node that `pattern_node` maps to.
    #[must_use]
    pub fn target_of(&self, pattern_node: NodeId) -> Option<NodeId> {
        self.pairs()
            .find(|&(p, _)| p == pattern_node)
            .map(|(_, t)| t)
    }

    /// Splits into the `(pattern, target)` correspondence arrays.
    #[must_use]
    pub fn into_parts(self) -> (Vec<NodeId>, Vec<NodeId>) {
        (self.pattern, self.target)
    }

    /// Covered target ids, sorted.
    pub(crate) fn target_signature(&self) -> Vec<NodeId> {
        let mut sig = self.target.clone();
        sig.sort_unstable();
        sig
    }
}
