//! Diagnostic side channel for the node-graph runtime.
//!
//! Graph execution never fails loudly: rejected connections, infinite loops and
//! breakpoints are logged through `tracing` and, when a host asks for it, also
//! recorded as plain trace events on the blackboard.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceKind, TraceLog, TraceSink, VecTraceSink, TRACE_LOG,
    TRACE_SINK,
};
