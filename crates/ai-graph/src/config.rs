#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GraphConfig {
    /// Reset and run the prime node again once it finishes, instead of stopping the graph.
    pub repeat: bool,

    /// Honor node breakpoints. When disabled, breakpoint flags are ignored.
    pub breakpoints_enabled: bool,

    /// Position offset applied to a node duplicated within its own graph.
    pub duplicate_offset: [f32; 2],
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            repeat: true,
            breakpoints_enabled: true,
            duplicate_offset: [50.0, 50.0],
        }
    }
}
