use crate::AgentId;

/// Read-only world access.
///
/// The runtime does not prescribe which queries a world must expose; node and
/// task implementations define the extension traits they need.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink handed to task hooks.
pub trait WorldMut: WorldView {}
