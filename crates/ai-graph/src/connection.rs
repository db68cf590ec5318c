use std::fmt;

use ai_core::Status;

use crate::NodeId;

/// Index of a connection in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub(crate) usize);

impl ConnectionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Directed edge `source -> target`, carrying the last status propagated through it.
///
/// An inactive connection is skipped by execution: it reports `Resting` and its
/// target is not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) active: bool,
    pub(crate) status: Status,
}

impl Connection {
    pub(crate) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            active: true,
            status: Status::Resting,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> Status {
        self.status
    }
}
