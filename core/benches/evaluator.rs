//! Benchmarks for trigger parsing and evaluation.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. eval_only: evaluation of pre-parsed trees, the per-tick cost
//! 2. full_pipeline: parse + eval together (for comparison)
//! 3. typical_triggers: state controller triggers as characters write them

use std::rc::Rc;

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mugen_trigger_core::{
    context::{CombatantState, Fighter, World},
    evaluator::{Evaluator, EvaluatorOptions},
    parser,
    symbols::SymbolTables,
};

/// Generate an arithmetic expression like "1 + 1 + 1 + ... + 1" with `n` additions.
fn generate_arithmetic_chain(n: usize) -> String {
    let mut expr = String::from("1");
    for _ in 0..n {
        expr.push_str(" + 1");
    }
    expr
}

fn versus() -> Fighter {
    let mut kfm = Fighter::new(CombatantState::new("kfm"), Rc::new(World::default()));
    let mut suave = Fighter::new(CombatantState::new("suave"), kfm.world.clone());
    suave.state.pos.x = 80.0;
    kfm.opponents.push(suave);
    kfm
}

/// Benchmark: Pure evaluation performance (pre-parsed).
fn bench_eval_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_only");
    let symbols = SymbolTables::standard();
    let kfm = versus();

    // Sizes chosen to stay under the default parser depth limit (500)
    for size in [50, 100, 200, 400] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let arena = Bump::new();
            let source = generate_arithmetic_chain(size);
            let expr = parser::parse(&arena, &source, symbols).expect("Parse failed");

            b.iter(|| {
                let mut evaluator = Evaluator::new(symbols, black_box(EvaluatorOptions::default()));
                let value = evaluator.eval(black_box(expr), &kfm).expect("Eval failed");
                black_box(value.to_int())
            });
        });
    }

    group.finish();
}

/// Benchmark: Full pipeline (parse + eval).
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let symbols = SymbolTables::standard();
    let kfm = versus();

    for size in [50, 100, 200, 400] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let source = generate_arithmetic_chain(size);
            b.iter(|| {
                let arena = Bump::new();
                let expr = parser::parse(&arena, black_box(&source), symbols).expect("Parse failed");
                let value = mugen_trigger_core::evaluator::eval(symbols, expr, &kfm)
                    .expect("Eval failed");
                black_box(value.to_int())
            });
        });
    }

    group.finish();
}

/// Benchmark: Triggers of the kind found in character state files.
fn bench_typical_triggers(c: &mut Criterion) {
    let mut group = c.benchmark_group("typical_triggers");
    let symbols = SymbolTables::standard();
    let kfm = versus();
    let arena = Bump::new();

    let triggers = [
        ("stance", "statetype = S && ctrl"),
        ("redirect", "p2, life < 500 || p2bodydist x < 30"),
        ("animelem", "animelem = 3, >= 2"),
        ("range", "stateno = [200, 299] && time % 4 = 0"),
        ("ifelse", "ifelse(var(3) > 2, fvar(1) * 2.5, -1) > 0"),
    ];

    for (name, source) in triggers {
        let expr = parser::parse(&arena, source, symbols).expect("Parse failed");
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut evaluator = Evaluator::new(symbols, EvaluatorOptions::default());
                black_box(evaluator.eval_bool(black_box(expr), &kfm).expect("Eval failed"))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_eval_only,
    bench_full_pipeline,
    bench_typical_triggers
);
criterion_main!(benches);
