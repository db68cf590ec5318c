#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Execution outcome shared by nodes, connections and tasks.
///
/// `Running` suspends until the next tick. `Resting` means "not started yet" or
/// "has been reset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    Resting,
    Running,
    Success,
    Failure,
    Error,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failure | Status::Error)
    }

    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// Stable numeric code, used when a status has to travel as plain data (traces).
    pub fn code(self) -> u64 {
        match self {
            Status::Resting => 0,
            Status::Running => 1,
            Status::Success => 2,
            Status::Failure => 3,
            Status::Error => 4,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
