//! Criterion benchmarks for the pricing engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use payoff_engine::{compile, price_with_rng, PayoffContext, PricingRequest, SampleRng};

fn request(expression: &str, num_simulations: usize) -> PricingRequest {
    PricingRequest::builder()
        .num_simulations(num_simulations)
        .payoff_expression(expression)
        .build()
        .unwrap()
}

fn bench_vanilla_call(c: &mut Criterion) {
    let req = request("maximum(S_T - K, 0)", 10_000);
    c.bench_function("price_vanilla_call_10k", |b| {
        b.iter(|| {
            let mut rng = SampleRng::from_seed(42);
            price_with_rng(black_box(&req), &mut rng).unwrap()
        })
    });
}

fn bench_digital_payoff(c: &mut Criterion) {
    let req = request("(S_T > K) * 1", 10_000);
    c.bench_function("price_digital_10k", |b| {
        b.iter(|| {
            let mut rng = SampleRng::from_seed(42);
            price_with_rng(black_box(&req), &mut rng).unwrap()
        })
    });
}

fn bench_expression_compile(c: &mut Criterion) {
    let context = PayoffContext::default();
    c.bench_function("compile_clip_payoff", |b| {
        b.iter(|| compile(black_box("clip(maximum(S_T - K, 0), 0, 25)"), context).unwrap())
    });
}

fn bench_payoff_evaluate(c: &mut Criterion) {
    let payoff = compile("maximum(S_T - K, 0)", PayoffContext::default()).unwrap();
    c.bench_function("evaluate_vanilla_payoff", |b| {
        b.iter(|| payoff.evaluate(black_box(104.2)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_vanilla_call,
    bench_digital_payoff,
    bench_expression_compile,
    bench_payoff_evaluate
);
criterion_main!(benches);
