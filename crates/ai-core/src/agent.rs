use core::fmt::Debug;

/// Opaque handle for the subject a graph acts upon.
///
/// The runtime never interprets an agent beyond identity comparison; it is
/// passed through execute calls into task hooks. `stable_id` is used only for
/// diagnostics.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for () {
    fn stable_id(self) -> u64 {
        0
    }
}
