use std::collections::BTreeSet;

use ai_core::{WorldMut, WorldView};
use ai_graph::{Graph, NodeBehavior, NodeId};

struct World;

impl WorldView for World {
    type Agent = u32;
}

impl WorldMut for World {}

struct Plain;

impl NodeBehavior<World> for Plain {}

struct NeverPrime;

impl NodeBehavior<World> for NeverPrime {
    fn allow_as_prime(&self) -> bool {
        false
    }
}

fn id_of(graph: &Graph<World>, node: NodeId) -> u32 {
    graph.node(node).unwrap().id()
}

#[test]
fn ids_follow_depth_first_pre_order_from_prime() {
    let mut graph: Graph<World> = Graph::new("ids");
    let root = graph.create_node(Plain, [0.0, 0.0]);
    let a = graph.create_node(Plain, [0.0, 0.0]);
    let b = graph.create_node(Plain, [0.0, 0.0]);
    let c = graph.create_node(Plain, [0.0, 0.0]);
    graph.connect(root, a).unwrap();
    graph.connect(root, b).unwrap();
    graph.connect(a, c).unwrap();
    graph.connect(b, c).unwrap();

    assert_eq!(id_of(&graph, root), 1);
    assert_eq!(id_of(&graph, a), 2);
    assert_eq!(id_of(&graph, c), 3);
    assert_eq!(id_of(&graph, b), 4);
}

#[test]
fn unreachable_nodes_are_numbered_after_the_prime_subtree() {
    let mut graph: Graph<World> = Graph::new("islands");
    let orphan_child = graph.create_node(NeverPrime, [0.0, 0.0]);
    let root = graph.create_node(Plain, [0.0, 0.0]);
    let orphan = graph.create_node(Plain, [0.0, 0.0]);
    graph.connect(orphan, orphan_child).unwrap();

    assert_eq!(graph.prime_node(), Some(root));
    assert_eq!(id_of(&graph, root), 1);
    assert_eq!(id_of(&graph, orphan), 2);
    assert_eq!(id_of(&graph, orphan_child), 3);
}

#[test]
fn reassignment_is_deterministic_and_unique() {
    let mut graph: Graph<World> = Graph::new("stable");
    let nodes: Vec<_> = (0..6).map(|_| graph.create_node(Plain, [0.0, 0.0])).collect();
    graph.connect(nodes[0], nodes[2]).unwrap();
    graph.connect(nodes[2], nodes[1]).unwrap();
    graph.connect(nodes[1], nodes[0]).unwrap();
    graph.connect(nodes[4], nodes[3]).unwrap();

    let first: Vec<u32> = nodes.iter().map(|n| id_of(&graph, *n)).collect();
    graph.assign_ids();
    let second: Vec<u32> = nodes.iter().map(|n| id_of(&graph, *n)).collect();

    assert_eq!(first, second);
    let unique: BTreeSet<u32> = first.iter().copied().collect();
    assert_eq!(unique, (1..=6).collect());
    assert!(graph.nodes().all(|(_, n)| !n.is_guarded()));
}

#[test]
fn assign_id_leaves_guards_for_reset_recursion() {
    let mut graph: Graph<World> = Graph::new("guards");
    let a = graph.create_node(Plain, [0.0, 0.0]);
    let b = graph.create_node(Plain, [0.0, 0.0]);
    graph.connect(a, b).unwrap();
    graph.connect(b, a).unwrap();

    assert_eq!(graph.assign_id(a, 10), 12);
    assert_eq!(id_of(&graph, a), 11);
    assert_eq!(id_of(&graph, b), 12);
    assert!(graph.node(a).unwrap().is_guarded());
    assert!(graph.node(b).unwrap().is_guarded());

    // Already visited in this pass.
    assert_eq!(graph.assign_id(b, 12), 12);

    graph.reset_recursion(b);
    assert!(graph.nodes().all(|(_, n)| !n.is_guarded()));
}

#[test]
fn structure_changes_renumber() {
    let mut graph: Graph<World> = Graph::new("renumber");
    let root = graph.create_node(Plain, [0.0, 0.0]);
    let a = graph.create_node(Plain, [0.0, 0.0]);
    let b = graph.create_node(Plain, [0.0, 0.0]);
    assert_eq!(id_of(&graph, b), 3);

    let edge = graph.connect(root, b).unwrap();
    assert_eq!(id_of(&graph, b), 2);
    assert_eq!(id_of(&graph, a), 3);

    graph.remove_connection(edge).unwrap();
    assert_eq!(id_of(&graph, a), 2);
    assert_eq!(id_of(&graph, b), 3);
}
