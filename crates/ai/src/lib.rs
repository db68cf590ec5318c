//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! - [`core`]: status, run clock, agent/world traits, blackboard, events
//! - [`task`]: action and condition tasks, condition lists
//! - [`graph`]: the node graph, recursive execution and graph lifecycle
//! - [`bt`]: action/condition leaves, sequencer and selector
//! - [`tools`]: trace events written to the blackboard

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "task")]
#[cfg_attr(docsrs, doc(cfg(feature = "task")))]
pub use ai_task as task;

#[cfg(feature = "graph")]
#[cfg_attr(docsrs, doc(cfg(feature = "graph")))]
pub use ai_graph as graph;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use ai_bt as bt;
