use ai_bt::{ConditionNode, Sequencer};
use ai_core::{Blackboard, TickContext, WorldMut, WorldView};
use ai_graph::Graph;
use ai_task::{ConditionFn, ConditionTask};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default)]
struct World;

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

fn always_true(_ctx: &TickContext, _agent: u64, _world: &World, _bb: &Blackboard) -> bool {
    true
}

fn sequence_of_conditions(count: usize) -> Graph<World> {
    let mut graph: Graph<World> = Graph::new("bench");
    let root = graph.create_node(Sequencer::new(), [0.0, 0.0]);
    for _ in 0..count {
        let task: ConditionTask<World> =
            ConditionTask::new(ConditionFn::new("Always True", always_true));
        let leaf = graph.create_node(ConditionNode::new(task), [0.0, 0.0]);
        graph.connect(root, leaf).expect("sequencer accepts any number of children");
    }
    graph
}

fn bench_graph_tick(c: &mut Criterion) {
    let mut graph = sequence_of_conditions(32);
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut ctx = TickContext::new(0.1);
    graph.start(&ctx).expect("graph has a prime node");

    c.bench_function("ai-bt/tick(conditions=32)", |b| {
        b.iter(|| {
            let status = graph.tick(&ctx, 1, &mut world, &mut bb);
            black_box(status);
            ctx = ctx.advance(0.1);
        })
    });
}

fn bench_assign_ids(c: &mut Criterion) {
    let mut graph = sequence_of_conditions(256);

    c.bench_function("ai-graph/assign_ids(nodes=257)", |b| {
        b.iter(|| {
            graph.assign_ids();
            black_box(graph.node_count());
        })
    });
}

criterion_group!(benches, bench_graph_tick, bench_assign_ids);
criterion_main!(benches);
