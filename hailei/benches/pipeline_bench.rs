//! Benchmarks for workflow execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hailei::generation::TemplateGenerator;
use hailei::pipeline::Orchestrator;
use hailei::testing::fixtures::sample_course;

fn template_benchmark(c: &mut Criterion) {
    c.bench_function("template_objectives", |b| {
        let course = sample_course();
        b.iter(|| black_box(TemplateGenerator::objectives_for(black_box(&course))));
    });
}

fn workflow_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let orchestrator = Orchestrator::template_only();

    c.bench_function("template_workflow", |b| {
        b.iter(|| {
            runtime
                .block_on(orchestrator.run_complete_workflow(black_box(sample_course())))
                .unwrap()
        });
    });
}

criterion_group!(benches, template_benchmark, workflow_benchmark);
criterion_main!(benches);
