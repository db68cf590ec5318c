use ai_core::{Blackboard, EventData, Status, TickContext, WorldMut};

use crate::{ConnectionId, Graph, NodeId};

/// A node's window onto its graph while its behavior executes.
pub struct NodeContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub(crate) graph: &'a mut Graph<W>,
    pub(crate) node: NodeId,
    pub(crate) status: Status,
    pub ctx: &'a TickContext,
    pub agent: W::Agent,
    pub world: &'a mut W,
    pub blackboard: &'a mut Blackboard,
}

impl<'a, W> NodeContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The node's status before this execution.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn graph(&self) -> &Graph<W> {
        &*self.graph
    }

    pub fn out_connection_count(&self) -> usize {
        self.graph
            .node(self.node)
            .map_or(0, |n| n.out_connections.len())
    }

    pub fn out_connection(&self, index: usize) -> Option<ConnectionId> {
        self.graph.out_connection_at(self.node, index)
    }

    /// Last status propagated through out connection `index`.
    pub fn child_status(&self, index: usize) -> Status {
        self.out_connection(index)
            .and_then(|id| self.graph.connection(id))
            .map_or(Status::Resting, |c| c.status)
    }

    /// Execute the target of out connection `index` and record the result on the
    /// connection. Inactive connections report `Resting` without running the target.
    pub fn execute_child(&mut self, index: usize) -> Status {
        let Some(id) = self.out_connection(index) else {
            tracing::error!(node = %self.node, index, "no out connection at index");
            return Status::Error;
        };
        self.graph
            .execute_connection(id, self.ctx, self.agent, self.world, self.blackboard)
    }

    /// Reset out connection `index` and, when `recursive`, everything below it.
    pub fn reset_child(&mut self, index: usize, recursive: bool) {
        if let Some(id) = self.out_connection(index) {
            self.graph.reset_connection(id, recursive);
        }
    }

    /// Events delivered to the graph for this tick.
    pub fn events(&self) -> &[EventData] {
        self.graph.current_events()
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events().iter().any(|e| e.is(name))
    }

    /// Queue an event for the graph's next tick.
    pub fn send_event(&mut self, event: EventData) {
        self.graph.send_event(event);
    }

    /// Pause the graph once the current tick's execution returns.
    pub fn pause_graph(&mut self) {
        self.graph.request_pause();
    }
}
