//! Model generation benchmarks
//!
//! Measures `build_models` over synthetic datasets:
//! - Many tasks, few trial types
//! - Few tasks, many trial types (quadratic one-vs-rest weights)
//!
//! Run with: cargo bench --bench auto_model_benchmarks

use bids_automodel::dataset::{MemoryDataset, RunNode};
use bids_automodel::AutoModel;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Dataset with `tasks` tasks, each run by 4 subjects over 2 sessions
fn create_dataset(tasks: usize, trial_types: usize) -> MemoryDataset {
    let labels: Vec<String> = (0..trial_types).map(|i| format!("cond{i:03}")).collect();
    let mut dataset = MemoryDataset::new("bench");

    for task in 0..tasks {
        for subject in 0..4 {
            for session in 0..2 {
                dataset.add_run(
                    RunNode::builder(format!("task{task}"))
                        .subject(format!("{subject:02}"))
                        .session(format!("{session}"))
                        .duration(300.0)
                        .trial_types(&labels)
                        .build()
                        .expect("valid events table"),
                );
            }
        }
    }
    dataset
}

fn bench_many_tasks(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_models_tasks");
    let config = AutoModel::builder().one_vs_rest(true).build();

    for tasks in [1, 10, 100] {
        let dataset = create_dataset(tasks, 4);
        group.bench_with_input(BenchmarkId::new("one_vs_rest", tasks), &dataset, |b, ds| {
            b.iter(|| config.build_models(black_box(ds)));
        });
    }

    group.finish();
}

fn bench_many_trial_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_models_trial_types");
    let config = AutoModel::builder().one_vs_rest(true).build();

    for trial_types in [2, 16, 128] {
        let dataset = create_dataset(1, trial_types);
        group.bench_with_input(
            BenchmarkId::new("one_vs_rest", trial_types),
            &dataset,
            |b, ds| {
                b.iter(|| config.build_models(black_box(ds)));
            },
        );
    }

    // Baseline without contrasts
    let dataset = create_dataset(1, 128);
    group.bench_with_input(BenchmarkId::new("run_only", 128), &dataset, |b, ds| {
        b.iter(|| AutoModel::new().build_models(black_box(ds)));
    });

    group.finish();
}

criterion_group!(benches, bench_many_tasks, bench_many_trial_types);
criterion_main!(benches);
