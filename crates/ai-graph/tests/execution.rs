use std::cell::Cell;
use std::rc::Rc;

use ai_core::{Blackboard, Status, TickContext, WorldMut, WorldView};
use ai_graph::{Graph, GraphConfig, NodeBehavior, NodeContext, NodeId};
use ai_tools::{TraceKind, TraceLog, TRACE_LOG};

#[derive(Debug, Default)]
struct World;

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

/// Runs every child in order, stopping at the first error, then reports `result`.
#[derive(Clone)]
struct Probe {
    result: Status,
    runs: Rc<Cell<u32>>,
}

impl Probe {
    fn new(result: Status) -> Self {
        Self {
            result,
            runs: Rc::new(Cell::new(0)),
        }
    }
}

impl NodeBehavior<World> for Probe {
    fn execute(&mut self, cx: &mut NodeContext<'_, World>) -> Status {
        self.runs.set(self.runs.get() + 1);
        for index in 0..cx.out_connection_count() {
            if cx.execute_child(index) == Status::Error {
                return Status::Error;
            }
        }
        self.result
    }
}

struct Idle;

impl NodeBehavior<World> for Idle {}

fn traced_blackboard() -> Blackboard {
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::default());
    bb
}

fn no_guards(graph: &Graph<World>) -> bool {
    graph.nodes().all(|(_, n)| !n.is_guarded())
}

#[test]
fn node_without_execute_hook_keeps_its_status() {
    let mut graph: Graph<World> = Graph::new("idle");
    let idle = graph.create_node(Idle, [0.0, 0.0]);
    let mut bb = Blackboard::new();

    let status = graph.execute(idle, &TickContext::default(), 1, &mut World, &mut bb);
    assert_eq!(status, Status::Resting);
    assert_eq!(graph.node(idle).unwrap().status(), Status::Resting);
    assert!(graph.node(idle).unwrap().behavior().is_some());
}

#[test]
fn chain_records_status_on_nodes_and_connections() {
    let mut graph: Graph<World> = Graph::new("chain");
    let root = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    let a = graph.create_node(Probe::new(Status::Running), [0.0, 0.0]);
    let b = graph.create_node(Probe::new(Status::Failure), [0.0, 0.0]);
    let root_a = graph.connect(root, a).unwrap();
    let a_b = graph.connect(a, b).unwrap();
    let mut bb = Blackboard::new();

    let status = graph.execute(root, &TickContext::default(), 1, &mut World, &mut bb);

    assert_eq!(status, Status::Success);
    assert_eq!(graph.node(a).unwrap().status(), Status::Running);
    assert_eq!(graph.node(b).unwrap().status(), Status::Failure);
    assert_eq!(graph.connection(root_a).unwrap().status(), Status::Running);
    assert_eq!(graph.connection(a_b).unwrap().status(), Status::Failure);
    assert!(no_guards(&graph));
}

#[test]
fn cycle_reports_error_and_clears_guards() {
    let mut graph: Graph<World> = Graph::new("cycle");
    let a = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    let b = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    graph.connect(a, b).unwrap();
    let back = graph.connect(b, a).unwrap();
    let mut bb = traced_blackboard();

    let status = graph.execute(a, &TickContext::default(), 1, &mut World, &mut bb);

    assert_eq!(status, Status::Error);
    assert_eq!(graph.connection(back).unwrap().status(), Status::Error);
    assert_eq!(graph.node(b).unwrap().status(), Status::Error);
    assert!(no_guards(&graph));

    let log = bb.get(TRACE_LOG).unwrap();
    let loops: Vec<_> = log.of_kind(TraceKind::InfiniteLoop).collect();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].node, u64::from(graph.node(a).unwrap().id()));
}

#[test]
fn cycle_is_detected_again_on_the_next_call() {
    let mut graph: Graph<World> = Graph::new("cycle");
    let a = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    let b = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    graph.connect(a, b).unwrap();
    graph.connect(b, a).unwrap();
    let mut bb = Blackboard::new();

    for _ in 0..3 {
        let status = graph.execute(a, &TickContext::default(), 1, &mut World, &mut bb);
        assert_eq!(status, Status::Error);
        assert!(no_guards(&graph));
    }
}

#[test]
fn inactive_connection_skips_its_target() {
    let mut graph: Graph<World> = Graph::new("inactive");
    let root = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    let child = Probe::new(Status::Failure);
    let runs = child.runs.clone();
    let leaf = graph.create_node(child, [0.0, 0.0]);
    let edge = graph.connect(root, leaf).unwrap();
    graph.set_connection_active(edge, false).unwrap();
    let mut bb = Blackboard::new();

    graph.execute(root, &TickContext::default(), 1, &mut World, &mut bb);

    assert_eq!(runs.get(), 0);
    assert_eq!(graph.node(leaf).unwrap().status(), Status::Resting);
    assert_eq!(graph.connection(edge).unwrap().status(), Status::Resting);
}

#[test]
fn breakpoint_suspends_before_the_behavior_runs() {
    let mut graph: Graph<World> = Graph::new("breakpoint");
    let probe = Probe::new(Status::Success);
    let runs = probe.runs.clone();
    let node = graph.create_node(probe, [0.0, 0.0]);
    graph.node_mut(node).unwrap().set_breakpoint(true);
    let mut bb = traced_blackboard();
    let ctx = TickContext::new(0.1);

    graph.start(&ctx).unwrap();
    assert_eq!(graph.tick(&ctx, 1, &mut World, &mut bb), Status::Running);
    assert_eq!(runs.get(), 0);
    assert!(graph.is_paused());
    assert_eq!(graph.node(node).unwrap().status(), Status::Running);

    let log = bb.get(TRACE_LOG).unwrap();
    assert_eq!(log.of_kind(TraceKind::Breakpoint).count(), 1);
    assert_eq!(log.of_kind(TraceKind::GraphPaused).count(), 1);

    // Resuming runs the behavior: the node is no longer resting.
    let ctx = ctx.advance(0.1);
    graph.start(&ctx).unwrap();
    assert_eq!(graph.tick(&ctx, 1, &mut World, &mut bb), Status::Success);
    assert_eq!(runs.get(), 1);
}

#[test]
fn breakpoints_are_ignored_when_disabled() {
    let config = GraphConfig {
        breakpoints_enabled: false,
        ..GraphConfig::default()
    };
    let mut graph: Graph<World> = Graph::with_config("no-breakpoints", config);
    let node = graph.create_node(Probe::new(Status::Success), [0.0, 0.0]);
    graph.node_mut(node).unwrap().set_breakpoint(true);
    let mut bb = Blackboard::new();

    let status = graph.execute(node, &TickContext::default(), 1, &mut World, &mut bb);
    assert_eq!(status, Status::Success);
}

#[test]
fn status_changes_are_traced_once() {
    let mut graph: Graph<World> = Graph::new("trace");
    let node = graph.create_node(Probe::new(Status::Running), [0.0, 0.0]);
    let mut bb = traced_blackboard();
    let mut ctx = TickContext::default();

    for _ in 0..3 {
        graph.execute(node, &ctx, 1, &mut World, &mut bb);
        ctx = ctx.advance(0.1);
    }

    let log = bb.get(TRACE_LOG).unwrap();
    let changes: Vec<_> = log.of_kind(TraceKind::NodeStatus).collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].tick, 0);
    assert_eq!(changes[0].detail, Status::Running.code());
}

#[test]
fn unknown_node_is_an_error() {
    let mut graph: Graph<World> = Graph::new("empty");
    let node = graph.create_node(Idle, [0.0, 0.0]);
    graph.remove_node(node).unwrap();
    let mut bb = Blackboard::new();

    let status = graph.execute(node, &TickContext::default(), 1, &mut World, &mut bb);
    assert_eq!(status, Status::Error);
}

#[test]
fn missing_child_index_is_an_error() {
    struct Overreach;

    impl NodeBehavior<World> for Overreach {
        fn execute(&mut self, cx: &mut NodeContext<'_, World>) -> Status {
            cx.execute_child(3)
        }
    }

    let mut graph: Graph<World> = Graph::new("overreach");
    let node: NodeId = graph.create_node(Overreach, [0.0, 0.0]);
    let mut bb = Blackboard::new();

    let status = graph.execute(node, &TickContext::default(), 1, &mut World, &mut bb);
    assert_eq!(status, Status::Error);
}
