//! Deterministic, engine-agnostic primitives shared by the node-graph runtime.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod event;
pub mod names;
pub mod status;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use event::EventData;
pub use status::Status;
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
