use criterion::{criterion_group, criterion_main, Criterion};
use rebalance::{build_tree, solve, BucketSolver, Record, SolveOptions};

/// A balanced tree `depth` levels deep with `branching` children per
/// interior node, all siblings sharing an equal target ratio.
fn synthetic_records(depth: usize, branching: usize) -> Vec<Record> {
    let mut records = Vec::new();
    let mut frontier = vec!["root".to_string()];
    records.push(Record {
        label: "root".into(),
        current_value: 1_000_000.0,
        optimal_ratio: 1.0,
        amount_to_add: 1_000_000.0,
        children: vec![],
    });

    for level in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            let children: Vec<String> = (0..branching)
                .map(|i| format!("{}-{}-{}", parent, level, i))
                .collect();
            if let Some(record) = records.iter_mut().find(|r| &r.label == parent) {
                record.children = children.clone();
            }
            for label in &children {
                records.push(Record {
                    label: label.clone(),
                    current_value: 1_000.0,
                    optimal_ratio: 1.0 / branching as f64,
                    amount_to_add: 0.0,
                    children: vec![],
                });
            }
            next.extend(children);
        }
        frontier = next;
    }

    records
}

fn bench_build_tree(c: &mut Criterion) {
    let records = synthetic_records(4, 6);
    c.bench_function("build_tree/4x6", |b| {
        b.iter(|| build_tree(records.clone()).unwrap())
    });
}

fn bench_graph_solver(c: &mut Criterion) {
    let records = synthetic_records(4, 6);
    let tree = build_tree(records).unwrap();
    c.bench_function("graph_solver::solve/4x6/constrained", |b| {
        b.iter(|| {
            solve(tree.clone(), &BucketSolver::Constrained, SolveOptions::default()).unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().without_plots().sample_size(10);
    targets = bench_build_tree, bench_graph_solver
}
criterion_main!(benches);
