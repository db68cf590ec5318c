//! Behavior-tree style node kinds for `ai-graph`.
//!
//! Leaves wrap the task layer ([`ActionNode`], [`ConditionNode`]); composites
//! ([`Sequencer`], [`Selector`]) walk their out connections in order.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod nodes;

pub use nodes::{ActionNode, ConditionNode, Selector, Sequencer};
