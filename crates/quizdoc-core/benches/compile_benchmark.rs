//! Benchmarks for each compiler stage
//!
//! Run with: cargo bench -p quizdoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quizdoc_core::{build, compile, parse, render, tokenize, validate};

/// Generate a quiz with `questions` questions of four choices each.
fn generate_quiz(questions: usize) -> String {
    let mut src = String::from("اختبار \"Benchmark\"\n\n");
    for i in 0..questions {
        src.push_str(&format!("سؤال \"Question number {} with <markup> & quotes \\\"\"\n", i));
        src.push_str("اختيارات:\n");
        for c in 0..4 {
            src.push_str(&format!("\"Choice {}\"", c));
            if c == i % 4 {
                src.push_str(" الجواب");
            }
            src.push('\n');
        }
        src.push('\n');
    }
    src
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    for size in [10, 100, 1000] {
        let src = generate_quiz(size);
        group.throughput(Throughput::Bytes(src.len() as u64));

        group.bench_with_input(BenchmarkId::new("tokenize", size), &src, |b, src| {
            b.iter(|| tokenize(black_box(src)))
        });

        let tokens = tokenize(&src);
        group.bench_with_input(BenchmarkId::new("parse", size), &tokens, |b, tokens| {
            b.iter(|| parse(black_box(tokens)))
        });

        if let Ok(tree) = parse(&tokens) {
            group.bench_with_input(BenchmarkId::new("validate", size), &tree, |b, tree| {
                b.iter(|| validate(black_box(tree)))
            });
            group.bench_with_input(BenchmarkId::new("build", size), &tree, |b, tree| {
                b.iter(|| build(black_box(tree)))
            });
        }

        if let Ok(quiz) = compile(&src) {
            group.bench_with_input(BenchmarkId::new("render", size), &quiz, |b, quiz| {
                b.iter(|| render(black_box(quiz)))
            });
        }
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let src = generate_quiz(200);
    let mut group = c.benchmark_group("end_to_end");
    group.throughput(Throughput::Bytes(src.len() as u64));
    group.bench_function("compile_html", |b| {
        b.iter(|| quizdoc_core::compile_html(black_box(&src)))
    });
    group.finish();
}

criterion_group!(benches, bench_stages, bench_end_to_end);
criterion_main!(benches);
