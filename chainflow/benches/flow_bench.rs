//! Benchmarks for chain execution.

use chainflow::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn straight_chain(len: usize) -> Flow<u64, Verdict> {
    let mut builder = FlowBuilder::<u64, Verdict>::new("bench");
    for i in 0..len {
        builder = builder.step(format!("step-{i}"), |n| {
            black_box(*n);
            Some(Verdict::ok())
        });
    }
    builder.build().expect("bench flow builds")
}

fn flow_benchmark(c: &mut Criterion) {
    let mut chain = straight_chain(100);
    c.bench_function("straight_chain_100", |b| {
        b.iter(|| {
            let out = chain.run(black_box(&7), Verdict::ok()).expect("run succeeds");
            black_box(out)
        });
    });

    let mut branched = FlowBuilder::<u64, Verdict>::new("bench-branch")
        .when("even", |n| n % 2 == 0, vec![action(|_: &u64| Some(Verdict::ok()))])
        .expect("valid branch")
        .else_when("odd", |n| n % 2 == 1, vec![action(|_: &u64| Some(Verdict::ok()))])
        .expect("valid branch")
        .otherwise("unreachable", vec![action(|_: &u64| Some(Verdict::ok()))])
        .expect("valid branch")
        .build()
        .expect("bench flow builds");
    c.bench_function("conditional_group", |b| {
        b.iter(|| {
            let out = branched.run(black_box(&7), Verdict::ok()).expect("run succeeds");
            black_box(out)
        });
    });
}

criterion_group!(benches, flow_benchmark);
criterion_main!(benches);
