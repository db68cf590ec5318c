use std::fmt;

use ai_core::{Blackboard, EventData, Status, TickContext, WorldMut};
use ai_tools::{emit as trace_emit, TraceEvent, TraceKind};

use crate::{
    Connection, ConnectionId, ConnectionRejected, GraphConfig, GraphError, Node, NodeBehavior,
    NodeId,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Sole owner of a set of nodes and the connections between them.
///
/// Node and connection slots are never reused: a removed node leaves a hole, so a
/// stale `NodeId` resolves to `None` instead of aliasing another node.
pub struct Graph<W>
where
    W: WorldMut + 'static,
{
    name: String,
    config: GraphConfig,
    pub(crate) nodes: Vec<Option<Node<W>>>,
    pub(crate) connections: Vec<Option<Connection>>,
    prime: Option<NodeId>,
    state: GraphState,
    last_status: Status,
    started_at: f32,
    paused_at: f32,
    pause_requested: bool,
    events: Vec<EventData>,
    pending_events: Vec<EventData>,
}

impl<W> Graph<W>
where
    W: WorldMut + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, GraphConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: GraphConfig) -> Self {
        Self {
            name: name.into(),
            config,
            nodes: Vec::new(),
            connections: Vec::new(),
            prime: None,
            state: GraphState::Stopped,
            last_status: Status::Resting,
            started_at: 0.0,
            paused_at: 0.0,
            pause_requested: false,
            events: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GraphConfig {
        &mut self.config
    }

    // ----- structure -----

    pub fn node(&self, id: NodeId) -> Option<&Node<W>> {
        self.nodes.get(id.0)?.as_ref()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<W>> {
        self.nodes.get_mut(id.0)?.as_mut()
    }

    /// Every live node, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<W>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn find_node_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, n)| n.tag() == Some(tag))
            .map(|(id, _)| id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)?.as_ref()
    }

    pub(crate) fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id.0)?.as_mut()
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> + '_ {
        self.connections
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (ConnectionId(i), c)))
    }

    pub fn set_connection_active(
        &mut self,
        id: ConnectionId,
        active: bool,
    ) -> Result<(), GraphError> {
        let connection = self
            .connection_mut(id)
            .ok_or(GraphError::UnknownConnection(id))?;
        connection.active = active;
        Ok(())
    }

    pub fn prime_node(&self) -> Option<NodeId> {
        self.prime
    }

    pub fn set_prime_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.node(id).ok_or(GraphError::UnknownNode(id))?;
        if !node.allow_as_prime() {
            return Err(GraphError::NotAllowedAsPrime(id));
        }
        self.prime = Some(id);
        self.assign_ids();
        Ok(())
    }

    /// Nodes with a connection into `id`, in connection order.
    pub fn parent_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map_or_else(Vec::new, |n| {
            n.in_connections
                .iter()
                .filter_map(|c| self.connection(*c).map(|c| c.source))
                .collect()
        })
    }

    /// First-level children of `id`, in connection order.
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map_or_else(Vec::new, |n| {
            n.out_connections
                .iter()
                .filter_map(|c| self.connection(*c).map(|c| c.target))
                .collect()
        })
    }

    pub(crate) fn out_connection_at(&self, id: NodeId, index: usize) -> Option<ConnectionId> {
        self.node(id)?.out_connections.get(index).copied()
    }

    /// Add a node built from `behavior`. The first node that may be prime becomes prime.
    pub fn create_node(&mut self, behavior: impl NodeBehavior<W>, position: [f32; 2]) -> NodeId {
        self.insert_node(Node::new(Box::new(behavior), position))
    }

    fn insert_node(&mut self, mut node: Node<W>) -> NodeId {
        if let Some(behavior) = node.behavior.as_mut() {
            behavior.on_validate();
        }
        let id = NodeId(self.nodes.len());
        if self.prime.is_none() && node.allow_as_prime() {
            self.prime = Some(id);
        }
        self.nodes.push(Some(node));
        self.assign_ids();
        id
    }

    /// Deep-clone `id` within this graph, without its connections.
    pub fn duplicate_node(&mut self, id: NodeId) -> Result<NodeId, GraphError> {
        let [dx, dy] = self.config.duplicate_offset;
        let mut copy = self.detached_copy(id)?;
        let [x, y] = copy.position();
        copy.set_position([x + dx, y + dy]);
        Ok(self.insert_node(copy))
    }

    /// Deep-clone `id` into another graph, without its connections.
    pub fn duplicate_node_into(
        &self,
        id: NodeId,
        target: &mut Graph<W>,
    ) -> Result<NodeId, GraphError> {
        let copy = self.detached_copy(id)?;
        Ok(target.insert_node(copy))
    }

    fn detached_copy(&self, id: NodeId) -> Result<Node<W>, GraphError> {
        let node = self.node(id).ok_or(GraphError::UnknownNode(id))?;
        let behavior = node
            .behavior
            .as_ref()
            .and_then(|b| b.duplicate())
            .ok_or(GraphError::NotDuplicable(id))?;
        Ok(node.detached_copy(behavior))
    }

    /// Remove `id`, severing every connection that references it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.node(id).ok_or(GraphError::UnknownNode(id))?;
        let attached: Vec<ConnectionId> = node
            .in_connections
            .iter()
            .chain(node.out_connections.iter())
            .copied()
            .collect();

        for connection in attached {
            self.detach_connection(connection);
        }

        if let Some(mut node) = self.nodes[id.0].take() {
            if let Some(behavior) = node.behavior.as_mut() {
                behavior.on_destroy();
            }
        }
        if self.prime == Some(id) {
            self.prime = None;
        }
        self.assign_ids();
        Ok(())
    }

    /// Admission check for a new `source -> target` connection. Nothing is mutated.
    pub fn check_new_connection(
        &self,
        source: NodeId,
        target: NodeId,
    ) -> Result<(), ConnectionRejected> {
        let (Some(source_node), Some(target_node)) = (self.node(source), self.node(target)) else {
            return Err(ConnectionRejected::MissingNode);
        };

        if source == target {
            return Err(ConnectionRejected::SelfConnection);
        }

        if source_node
            .max_out_connections()
            .is_reached(source_node.out_connections.len())
        {
            return Err(ConnectionRejected::SourceFull);
        }

        let max_in = target_node.max_in_connections();
        if self.prime == Some(target) && max_in == crate::Bound::AtMost(1) {
            return Err(ConnectionRejected::PrimeTarget);
        }

        if max_in.is_reached(target_node.in_connections.len()) {
            return Err(ConnectionRejected::TargetFull);
        }

        Ok(())
    }

    /// Like [`Graph::check_new_connection`], reporting a rejection as a warning.
    pub fn is_new_connection_allowed(&self, source: NodeId, target: NodeId) -> bool {
        match self.check_new_connection(source, target) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(graph = %self.name, %source, %target, %reason, "connection not allowed");
                false
            }
        }
    }

    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Result<ConnectionId, GraphError> {
        if let Err(reason) = self.check_new_connection(source, target) {
            tracing::warn!(graph = %self.name, %source, %target, %reason, "connection not allowed");
            return Err(reason.into());
        }

        let id = ConnectionId(self.connections.len());
        self.connections.push(Some(Connection::new(source, target)));

        if let Some(node) = self.node_mut(source) {
            node.out_connections.push(id);
            let index = node.out_connections.len() - 1;
            if let Some(behavior) = node.behavior.as_mut() {
                behavior.on_child_connected(index);
            }
        }
        if let Some(node) = self.node_mut(target) {
            node.in_connections.push(id);
            let index = node.in_connections.len() - 1;
            if let Some(behavior) = node.behavior.as_mut() {
                behavior.on_parent_connected(index);
            }
        }

        self.assign_ids();
        Ok(id)
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        if self.connection(id).is_none() {
            return Err(GraphError::UnknownConnection(id));
        }
        self.detach_connection(id);
        self.assign_ids();
        Ok(())
    }

    fn detach_connection(&mut self, id: ConnectionId) {
        let Some(connection) = self.connections.get_mut(id.0).and_then(Option::take) else {
            return;
        };

        if let Some(node) = self.node_mut(connection.target) {
            if let Some(index) = node.in_connections.iter().position(|c| *c == id) {
                if let Some(behavior) = node.behavior.as_mut() {
                    behavior.on_parent_disconnected(index);
                }
                node.in_connections.remove(index);
            }
        }
        if let Some(node) = self.node_mut(connection.source) {
            if let Some(index) = node.out_connections.iter().position(|c| *c == id) {
                if let Some(behavior) = node.behavior.as_mut() {
                    behavior.on_child_disconnected(index);
                }
                node.out_connections.remove(index);
            }
        }
    }

    /// Reset every transient field (status, guard, IDs) as a freshly loaded graph would have.
    pub fn reload_transient(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.clear_transient();
        }
        for connection in self.connections.iter_mut().flatten() {
            connection.status = Status::Resting;
        }
        self.assign_ids();
    }

    // ----- events -----

    /// Queue an event. Behaviors see it through [`crate::NodeContext::events`] on the next tick.
    pub fn send_event(&mut self, event: EventData) {
        tracing::debug!(graph = %self.name, event = %event.name, "event sent");
        self.pending_events.push(event);
    }

    pub(crate) fn current_events(&self) -> &[EventData] {
        &self.events
    }

    pub(crate) fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    // ----- lifecycle -----

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GraphState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == GraphState::Paused
    }

    /// Result of the prime node on the most recent tick.
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    /// Seconds since start, excluding paused time. Zero when stopped.
    pub fn elapsed_time(&self, ctx: &TickContext) -> f32 {
        match self.state {
            GraphState::Stopped => 0.0,
            GraphState::Paused => self.paused_at - self.started_at,
            GraphState::Running => ctx.time_seconds - self.started_at,
        }
    }

    /// Start the graph, or resume it when paused.
    pub fn start(&mut self, ctx: &TickContext) -> Result<(), GraphError> {
        match self.state {
            GraphState::Running => return Ok(()),
            GraphState::Paused => {
                self.started_at += ctx.time_seconds - self.paused_at;
                self.state = GraphState::Running;
                tracing::info!(graph = %self.name, "graph resumed");
                return Ok(());
            }
            GraphState::Stopped => {}
        }

        let Some(prime) = self.prime else {
            tracing::error!(graph = %self.name, "graph has no prime node; not starting");
            return Err(GraphError::NoPrimeNode);
        };

        self.assign_ids();
        for index in 0..self.nodes.len() {
            self.reset_node(NodeId(index), false);
        }
        self.state = GraphState::Running;
        self.started_at = ctx.time_seconds;
        self.last_status = Status::Resting;
        self.pause_requested = false;
        for behavior in self.behaviors_mut() {
            behavior.on_graph_started(ctx);
        }
        tracing::info!(graph = %self.name, %prime, "graph started");
        Ok(())
    }

    pub fn pause(&mut self, ctx: &TickContext) {
        if self.state != GraphState::Running {
            return;
        }

        self.state = GraphState::Paused;
        self.paused_at = ctx.time_seconds;
        for behavior in self.behaviors_mut() {
            behavior.on_graph_paused(ctx);
        }
        tracing::info!(graph = %self.name, "graph paused");
    }

    /// Stop the graph, resetting every node.
    pub fn stop(&mut self, ctx: &TickContext) {
        if self.state == GraphState::Stopped {
            return;
        }

        self.state = GraphState::Stopped;
        self.pause_requested = false;
        self.events.clear();
        self.pending_events.clear();
        for index in 0..self.nodes.len() {
            let id = NodeId(index);
            self.reset_node(id, false);
            if let Some(behavior) = self.node_mut(id).and_then(|n| n.behavior.as_mut()) {
                behavior.on_graph_stopped(ctx);
            }
        }
        tracing::info!(graph = %self.name, status = ?self.last_status, "graph stopped");
    }

    /// Run one tick from the prime node.
    ///
    /// A finished prime node (anything but `Running`) is reset when `config.repeat` is set,
    /// otherwise the graph stops. Pause requests raised during execution (breakpoints,
    /// [`crate::NodeContext::pause_graph`]) take effect after the prime node returns.
    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Status {
        if self.state != GraphState::Running {
            return self.last_status;
        }
        let Some(prime) = self.prime else {
            tracing::warn!(graph = %self.name, "running graph lost its prime node");
            self.stop(ctx);
            return Status::Error;
        };

        self.events = std::mem::take(&mut self.pending_events);
        let status = self.execute(prime, ctx, agent, world, blackboard);
        self.events.clear();
        self.last_status = status;

        if self.pause_requested {
            self.pause_requested = false;
            self.pause(ctx);
            trace_emit(blackboard, TraceEvent::new(ctx.tick, TraceKind::GraphPaused));
            return status;
        }

        if status != Status::Running {
            if self.config.repeat {
                self.reset_node(prime, true);
            } else {
                self.stop(ctx);
                trace_emit(
                    blackboard,
                    TraceEvent::new(ctx.tick, TraceKind::GraphFinished).with_detail(status.code()),
                );
            }
        }
        status
    }

    fn behaviors_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn NodeBehavior<W>>> + '_ {
        self.nodes
            .iter_mut()
            .flatten()
            .filter_map(|n| n.behavior.as_mut())
    }
}

impl<W> fmt::Debug for Graph<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("prime", &self.prime)
            .field("nodes", &self.node_count())
            .field("connections", &self.connections().count())
            .finish()
    }
}
