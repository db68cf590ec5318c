use thiserror::Error;

use crate::{ConnectionId, NodeId};

/// Why a new connection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionRejected {
    #[error("node can't connect to itself")]
    SelfConnection,

    #[error("source node can have no more out connections")]
    SourceFull,

    #[error("target node is the single-input prime node")]
    PrimeTarget,

    #[error("target node can have no more in connections")]
    TargetFull,

    #[error("source or target node is not part of the graph")]
    MissingNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("no node {0} in graph")]
    UnknownNode(NodeId),

    #[error("no connection {0} in graph")]
    UnknownConnection(ConnectionId),

    #[error("connection rejected: {0}")]
    ConnectionRejected(#[from] ConnectionRejected),

    #[error("node {0} does not support duplication")]
    NotDuplicable(NodeId),

    #[error("node {0} can't be the prime node")]
    NotAllowedAsPrime(NodeId),

    #[error("graph has no prime node")]
    NoPrimeNode,
}
