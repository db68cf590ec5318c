//! Node-graph execution core.
//!
//! A [`Graph`] owns every [`Node`] and [`Connection`] in index-addressed arenas.
//! Nodes delegate their per-tick work to a [`NodeBehavior`]; the graph drives
//! execution, recursive reset, ID assignment and connection admission, and uses
//! a per-node recursion guard to turn cyclic re-entry into `Status::Error`
//! instead of unbounded recursion.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod connection;
pub mod context;
pub mod error;
pub mod execution;
pub mod graph;
pub mod node;

pub use config::GraphConfig;
pub use connection::{Connection, ConnectionId};
pub use context::NodeContext;
pub use error::{ConnectionRejected, GraphError};
pub use graph::{Graph, GraphState};
pub use node::{Bound, Node, NodeBehavior, NodeId};
