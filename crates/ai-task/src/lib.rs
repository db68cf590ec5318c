//! Task lifecycle: leaf units of work executed by graph nodes.
//!
//! An [`ActionTask`] runs over several ticks (`Resting -> Running -> Success/Failure`)
//! and can be paused and ended from anywhere. A [`ConditionTask`] is a single
//! boolean check. [`ConditionList`] aggregates conditions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod condition;
pub mod condition_list;
pub mod error;

pub use action::{ActionBehavior, ActionContext, ActionFn, ActionTask};
pub use condition::{ConditionBehavior, ConditionContext, ConditionFn, ConditionTask};
pub use condition_list::{CheckMode, ConditionList};
pub use error::TaskError;
