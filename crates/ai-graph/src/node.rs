use std::borrow::Cow;
use std::fmt;

use ai_core::names::{short_type_name, split_camel_case};
use ai_core::{Status, TickContext, WorldMut};

use crate::{ConnectionId, NodeContext};

/// Index of a node in its graph's arena. Stable for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Maximum number of in or out connections a node kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Unbounded,
    AtMost(usize),
}

impl Bound {
    pub fn is_reached(self, count: usize) -> bool {
        match self {
            Bound::Unbounded => false,
            Bound::AtMost(max) => count >= max,
        }
    }
}

/// `-1` means unbounded.
impl From<i32> for Bound {
    fn from(value: i32) -> Self {
        usize::try_from(value).map_or(Bound::Unbounded, Bound::AtMost)
    }
}

/// What a node kind does. The graph owns the node; the behavior only sees it
/// through a [`NodeContext`] while executing.
pub trait NodeBehavior<W>: 'static
where
    W: WorldMut + 'static,
{
    /// Display name used when the node has no custom name.
    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(split_camel_case(short_type_name(
            std::any::type_name::<Self>(),
        )))
    }

    fn max_in_connections(&self) -> Bound {
        Bound::Unbounded
    }

    fn max_out_connections(&self) -> Bound {
        Bound::Unbounded
    }

    fn allow_as_prime(&self) -> bool {
        true
    }

    /// Per-tick work. The default keeps the current status.
    fn execute(&mut self, cx: &mut NodeContext<'_, W>) -> Status {
        cx.status()
    }

    /// Called when the node is reset: graph start/stop, after a traversal, on interruption.
    fn reset(&mut self) {}

    /// Called when the node is created or duplicated.
    fn on_validate(&mut self) {}

    /// Called when the node is removed from its graph.
    fn on_destroy(&mut self) {}

    fn on_parent_connected(&mut self, _index: usize) {}

    /// Called before the in connection at `index` is removed.
    fn on_parent_disconnected(&mut self, _index: usize) {}

    fn on_child_connected(&mut self, _index: usize) {}

    /// Called before the out connection at `index` is removed.
    fn on_child_disconnected(&mut self, _index: usize) {}

    /// Called when the graph starts, not when it resumes from pause.
    fn on_graph_started(&mut self, _ctx: &TickContext) {}

    fn on_graph_stopped(&mut self, _ctx: &TickContext) {}

    fn on_graph_paused(&mut self, _ctx: &TickContext) {}

    /// Deep copy used by node duplication. `None` means "not duplicable".
    fn duplicate(&self) -> Option<Box<dyn NodeBehavior<W>>> {
        None
    }
}

pub struct Node<W>
where
    W: WorldMut + 'static,
{
    custom_name: Option<String>,
    tag: Option<String>,
    comment: Option<String>,
    breakpoint: bool,
    position: [f32; 2],
    pub(crate) in_connections: Vec<ConnectionId>,
    pub(crate) out_connections: Vec<ConnectionId>,

    // Transient: never part of the node's durable identity.
    pub(crate) id: u32,
    pub(crate) status: Status,
    pub(crate) checked: bool,
    default_name: Cow<'static, str>,
    // `None` only while the behavior is executing.
    pub(crate) behavior: Option<Box<dyn NodeBehavior<W>>>,
}

impl<W> Node<W>
where
    W: WorldMut + 'static,
{
    pub(crate) fn new(behavior: Box<dyn NodeBehavior<W>>, position: [f32; 2]) -> Self {
        Self {
            custom_name: None,
            tag: None,
            comment: None,
            breakpoint: false,
            position,
            in_connections: Vec::new(),
            out_connections: Vec::new(),
            id: 0,
            status: Status::Resting,
            checked: false,
            default_name: behavior.name(),
            behavior: Some(behavior),
        }
    }

    /// Copy of the durable attributes around a new behavior; no connections, fresh transient state.
    pub(crate) fn detached_copy(&self, behavior: Box<dyn NodeBehavior<W>>) -> Self {
        let mut copy = Self::new(behavior, self.position);
        copy.custom_name = self.custom_name.clone();
        copy.tag = self.tag.clone();
        copy.comment = self.comment.clone();
        copy.breakpoint = self.breakpoint;
        copy
    }

    pub(crate) fn clear_transient(&mut self) {
        self.id = 0;
        self.status = Status::Resting;
        self.checked = false;
    }

    /// Graph-assigned ID, in depth-first order from the prime node. Changes whenever the
    /// graph structure changes.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.default_name)
    }

    /// Set or clear (`None`) the custom display name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.custom_name = name.filter(|n| !n.is_empty());
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn is_breakpoint(&self) -> bool {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: bool) {
        self.breakpoint = breakpoint;
    }

    /// Presentation only; ignored by execution.
    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn set_position(&mut self, position: [f32; 2]) {
        self.position = position;
    }

    pub fn in_connections(&self) -> &[ConnectionId] {
        &self.in_connections
    }

    pub fn out_connections(&self) -> &[ConnectionId] {
        &self.out_connections
    }

    /// Whether the recursion guard is set: the node is mid-execution or mid-reset on the
    /// current call stack, or was marked by an ID/cycle walk not yet cleared.
    pub fn is_guarded(&self) -> bool {
        self.checked
    }

    /// The node's behavior; `None` while it is executing.
    pub fn behavior(&self) -> Option<&dyn NodeBehavior<W>> {
        self.behavior.as_deref()
    }

    pub(crate) fn max_in_connections(&self) -> Bound {
        self.behavior
            .as_ref()
            .map_or(Bound::Unbounded, |b| b.max_in_connections())
    }

    pub(crate) fn max_out_connections(&self) -> Bound {
        self.behavior
            .as_ref()
            .map_or(Bound::Unbounded, |b| b.max_out_connections())
    }

    pub(crate) fn allow_as_prime(&self) -> bool {
        self.behavior.as_ref().is_some_and(|b| b.allow_as_prime())
    }
}

impl<W> fmt::Debug for Node<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("status", &self.status)
            .field("in", &self.in_connections)
            .field("out", &self.out_connections)
            .finish()
    }
}
