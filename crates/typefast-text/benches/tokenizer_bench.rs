// Criterion benchmarks for typefast-text.
//
// Uses a synthetic corpus so no data files are needed. Set TYPEFAST_CORPUS to
// a text file to benchmark against a real corpus instead.
//
// Run:
//   cargo bench -p typefast-text
//   TYPEFAST_CORPUS=/path/to/mobydick.txt cargo bench -p typefast-text

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use typefast_core::policy::DelimiterPolicy;
use typefast_text::dictionary::build_dictionary;
use typefast_text::generator::WordGenerator;
use typefast_text::tokenizer::words;

fn load_corpus() -> Vec<u8> {
    if let Ok(path) = std::env::var("TYPEFAST_CORPUS") {
        if let Ok(bytes) = std::fs::read(&path) {
            return bytes;
        }
        eprintln!("[tokenizer_bench] could not read {path}, using synthetic corpus");
    }
    "Call me Ishmael. Some years ago, never mind how long precisely, \
     having little or no money in my purse. Så är det, sa hon över ängen. "
        .repeat(2_000)
        .into_bytes()
}

fn bench_tokenize(c: &mut Criterion) {
    let corpus = load_corpus();
    let policy = DelimiterPolicy::default();
    c.bench_function("tokenize_corpus", |b| {
        b.iter(|| words(black_box(&corpus), &policy).count())
    });
}

fn bench_dictionary(c: &mut Criterion) {
    let corpus = load_corpus();
    let policy = DelimiterPolicy::default();
    c.bench_function("build_dictionary", |b| {
        b.iter(|| build_dictionary(black_box(&corpus), &policy).map(|d| d.len()))
    });
}

fn bench_generator(c: &mut Criterion) {
    let corpus = load_corpus();
    let policy = DelimiterPolicy::default();
    let Ok(mut generator) =
        WordGenerator::load_with_rng(&corpus, &policy, StdRng::seed_from_u64(1))
    else {
        eprintln!("[bench_generator] corpus has no words, skipping");
        return;
    };
    c.bench_function("generator_next_word", |b| b.iter(|| generator.next_word()));
}

criterion_group!(benches, bench_tokenize, bench_dictionary, bench_generator);
criterion_main!(benches);
