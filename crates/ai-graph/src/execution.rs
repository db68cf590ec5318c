//! Recursive execution, reset, and ID assignment.
//!
//! All three walks share the per-node `checked` guard. Execute and reset clear it as they
//! unwind; ID assignment leaves it set and relies on [`Graph::reset_recursion`] afterwards.

use ai_core::{Blackboard, Status, TickContext, WorldMut};
use ai_tools::{emit as trace_emit, TraceEvent, TraceKind};

use crate::{ConnectionId, Graph, NodeContext, NodeId};

impl<W> Graph<W>
where
    W: WorldMut + 'static,
{
    /// Execute node `id` and record the status it returns.
    ///
    /// Re-entering a node that is already executing on the current call stack returns
    /// `Status::Error` and leaves the guard as it was. A breakpoint node that is `Resting`
    /// goes straight to `Running` and asks the graph to pause, without running its behavior.
    pub fn execute(
        &mut self,
        id: NodeId,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Status {
        let breakpoints_enabled = self.config().breakpoints_enabled;
        let Some(node) = self.node_mut(id) else {
            tracing::error!(node = %id, "execute on unknown node");
            return Status::Error;
        };

        if node.checked {
            let trace_id = u64::from(node.id);
            tracing::error!(node = %id, name = node.name(), "infinite loop detected");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, TraceKind::InfiniteLoop).with_node(trace_id),
            );
            return Status::Error;
        }

        if breakpoints_enabled && node.is_breakpoint() && node.status == Status::Resting {
            node.status = Status::Running;
            let trace_id = u64::from(node.id);
            tracing::info!(node = %id, name = node.name(), "breakpoint hit");
            self.request_pause();
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, TraceKind::Breakpoint).with_node(trace_id),
            );
            return Status::Running;
        }

        let previous = node.status;
        let Some(mut behavior) = node.behavior.take() else {
            tracing::error!(node = %id, "node has no behavior");
            return Status::Error;
        };
        node.checked = true;

        let status = {
            let mut cx = NodeContext {
                graph: self,
                node: id,
                status: previous,
                ctx,
                agent,
                world: &mut *world,
                blackboard: &mut *blackboard,
            };
            behavior.execute(&mut cx)
        };

        let Some(node) = self.node_mut(id) else {
            return status;
        };
        node.behavior = Some(behavior);
        node.checked = false;
        node.status = status;

        if status != previous {
            let trace_id = u64::from(node.id);
            tracing::debug!(node = %id, ?previous, ?status, "node status changed");
            trace_emit(blackboard, TraceEvent::node_status(ctx.tick, trace_id, status));
        }
        status
    }

    /// Execute the target of connection `id`, storing the result on the connection.
    /// Inactive connections return `Resting` without touching the target.
    pub fn execute_connection(
        &mut self,
        id: ConnectionId,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Status {
        let Some(connection) = self.connection(id) else {
            tracing::error!(connection = %id, "execute on unknown connection");
            return Status::Error;
        };
        if !connection.is_active() {
            return Status::Resting;
        }

        let target = connection.target;
        let status = self.execute(target, ctx, agent, world, blackboard);
        if let Some(connection) = self.connection_mut(id) {
            connection.status = status;
        }
        status
    }

    /// Return `id` to `Resting`, running its reset hook. When `recursive`, every node
    /// reachable through its out connections is reset too; each is reset at most once
    /// per walk, however many paths lead to it.
    pub fn reset_node(&mut self, id: NodeId, recursive: bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.status == Status::Resting || node.checked {
            return;
        }

        if let Some(behavior) = node.behavior.as_mut() {
            behavior.reset();
        }
        node.status = Status::Resting;
        node.checked = true;

        let mut index = 0;
        while let Some(connection) = self.out_connection_at(id, index) {
            self.reset_connection(connection, recursive);
            index += 1;
        }

        if let Some(node) = self.node_mut(id) {
            node.checked = false;
        }
    }

    /// Clear the connection's last status and, when `recursive`, reset its target.
    pub fn reset_connection(&mut self, id: ConnectionId, recursive: bool) {
        let Some(connection) = self.connection_mut(id) else {
            return;
        };
        connection.status = Status::Resting;
        let target = connection.target;
        if recursive {
            self.reset_node(target, true);
        }
    }

    /// Renumber every node: the prime node's subtree first (depth-first, pre-order), then
    /// subtrees of parentless nodes, then anything left over, in arena order.
    pub fn assign_ids(&mut self) {
        let mut roots = Vec::with_capacity(self.nodes.len());
        roots.extend(self.prime_node());
        roots.extend(
            self.nodes()
                .filter(|(_, n)| n.in_connections.is_empty())
                .map(|(id, _)| id),
        );
        roots.extend(self.nodes().map(|(id, _)| id));

        let mut last = 0;
        for root in roots {
            last = self.assign_id(root, last);
        }

        for index in 0..self.nodes.len() {
            self.reset_recursion(NodeId(index));
        }
    }

    /// Assign `last + 1` to `id` and continue depth-first through its out connections.
    /// Returns the last ID handed out. Guards set here are left for
    /// [`Graph::reset_recursion`] to clear.
    pub fn assign_id(&mut self, id: NodeId, last: u32) -> u32 {
        let Some(node) = self.node_mut(id) else {
            return last;
        };
        if node.checked {
            return last;
        }

        let mut last = last + 1;
        node.id = last;
        node.checked = true;

        for child in self.child_nodes(id) {
            last = self.assign_id(child, last);
        }
        last
    }

    /// Clear guards left by [`Graph::assign_id`] on `id` and everything reachable from it.
    pub fn reset_recursion(&mut self, id: NodeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if !node.checked {
            return;
        }

        node.checked = false;
        for child in self.child_nodes(id) {
            self.reset_recursion(child);
        }
    }
}
