#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ai_core::{BbKey, Blackboard, Status};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraceKind {
    /// `detail` holds the new `Status::code`.
    NodeStatus,
    InfiniteLoop,
    Breakpoint,
    GraphPaused,
    /// The prime node finished and the graph stopped; `detail` holds its `Status::code`.
    GraphFinished,
}

impl TraceKind {
    pub fn tag(self) -> &'static str {
        match self {
            TraceKind::NodeStatus => "node.status",
            TraceKind::InfiniteLoop => "node.infinite_loop",
            TraceKind::Breakpoint => "node.breakpoint",
            TraceKind::GraphPaused => "graph.pause",
            TraceKind::GraphFinished => "graph.finish",
        }
    }
}

/// A small, copyable trace record.
///
/// Kept as dumb data so it can be recorded during execution and rendered later by
/// tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub kind: TraceKind,
    pub node: u64,
    pub detail: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, kind: TraceKind) -> Self {
        Self {
            tick,
            kind,
            node: 0,
            detail: 0,
        }
    }

    pub fn node_status(tick: u64, node: u64, status: Status) -> Self {
        Self::new(tick, TraceKind::NodeStatus)
            .with_node(node)
            .with_detail(status.code())
    }

    pub fn with_node(mut self, node: u64) -> Self {
        self.node = node;
        self
    }

    pub fn with_detail(mut self, detail: u64) -> Self {
        self.detail = detail;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn of_kind(&self, kind: TraceKind) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

/// Blackboard variable collecting events in memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new("__trace_log");
/// Blackboard variable streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new("__trace_sink");

/// Appends `event` to [`TRACE_LOG`] and [`TRACE_SINK`] when present.
///
/// Both names are reserved. A host value of another type under either name is left alone.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.try_get_mut(TRACE_LOG) {
        log.push(event);
    }
    if let Some(sink) = blackboard.try_get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
