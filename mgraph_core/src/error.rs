use crate::NodeId;

/// Invariant violations reported by graph mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node with this id is already stored.
    #[error("graph already has node {0}")]
    DuplicateNode(NodeId),

    /// No node with this id is stored.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// No edge connects the ordered pair.
    #[error("edge {from} -> {to} not found")]
    EdgeNotFound {
        /// Source node of the requested edge.
        from: NodeId,
        /// Target node of the requested edge.
        to: NodeId,
    },

    /// The pair has edges, but fewer than `index + 1` of them.
    #[error("edge {from} -> {to} has no parallel edge #{index}")]
    EdgeIndexOutOfRange {
        /// Source node of the requested edge.
        from: NodeId,
        /// Target node of the requested edge.
        to: NodeId,
        /// Requested 0-based parallel edge index.
        index: usize,
    },

    /// Another node already carries an equal attribute.
    #[error("node attribute is not unique")]
    DuplicateAttr,

    /// No node carries the requested attribute.
    #[error("node attribute not found")]
    AttrNotFound,

    /// No fresh id is left above the largest stored id.
    #[error("node id space exhausted")]
    IdSpaceExhausted,
}

/// Result alias for fallible graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
