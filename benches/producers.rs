use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use egui::Pos2;
use graph_stepper::{reduce, Action, Algorithm, AppState, Edge, Graph, Node, StepProducer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::time::Duration;

fn make_graph(num_nodes: usize, num_edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    let mut g = Graph::new();
    for i in 0..num_nodes {
        g.add_node(Node::new(
            format!("n{i}"),
            Pos2::new(i as f32 * 5.0, 0.0),
            (i + 1).to_string(),
        ));
    }
    // chain first so every node is reachable
    for i in 1..num_nodes {
        g.add_edge(Edge::new(
            format!("c{i}"),
            format!("n{}", i - 1),
            format!("n{i}"),
            f64::from(rng.random_range(1..100u32)),
        ));
    }
    let mut k = 0;
    while g.edge_count() < num_edges && num_nodes >= 2 {
        let a = rng.random_range(0..num_nodes);
        let b = rng.random_range(0..num_nodes);
        g.add_edge(Edge::new(
            format!("x{k}"),
            format!("n{a}"),
            format!("n{b}"),
            f64::from(rng.random_range(1..100u32)),
        ));
        k += 1;
    }
    g
}

fn bench_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("producers_drain");
    group.sample_size(10);
    group.measurement_time(Duration::from_millis(600));
    group.warm_up_time(Duration::from_millis(200));

    let g = make_graph(300, 900);
    for alg in Algorithm::ALL {
        group.bench_function(format!("{alg}_n300_m900"), |b| {
            b.iter(|| {
                let steps = StepProducer::new(alg, black_box(&g), Some("n0")).count();
                black_box(steps);
            });
        });
    }
    group.finish();
}

fn bench_apply_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer_apply");
    group.sample_size(10);
    group.measurement_time(Duration::from_millis(600));
    group.warm_up_time(Duration::from_millis(200));

    let g = make_graph(200, 600);
    let steps: Vec<_> = StepProducer::new(Algorithm::Bfs, &g, Some("n0")).collect();

    group.bench_function("bfs_n200_m600", |b| {
        b.iter_batched(
            || reduce(AppState::default(), Action::LoadGraph(g.clone())),
            |mut state| {
                for step in &steps {
                    state = reduce(state, Action::ApplyStep(Some(step.clone())));
                }
                black_box(state);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_producers, bench_apply_steps);
criterion_main!(benches);
