use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;

lazy_static! {
    // Index 0 is the spec's own worked example; index 1 is a pattern with
    // character classes, picked to exercise the subset constructor's
    // metachar-inheritance path under both engines.
    static ref PATTERNS: [&'static str; 2] =
        ["hs|(s|hh)s*h", r"\d\d\d\d-\d\d-\d\d"];
}

pub fn compile_microregex(c: &mut Criterion) {
    c.bench_function("microregex compile", |b| {
        b.iter(|| microregex::compile(black_box(PATTERNS[0])).unwrap())
    });
}

pub fn compile_library_regex(c: &mut Criterion) {
    // `regex` searches anywhere in the haystack by default; anchoring at
    // the start makes the comparison honest against microregex's VM,
    // which always anchors at byte 0 and returns the longest prefix.
    let anchored = format!("^(?:{})", PATTERNS[0]);
    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(&anchored)).unwrap())
    });
}

pub fn execute_microregex(c: &mut Criterion) {
    let program = microregex::compile(PATTERNS[1]).unwrap();
    let mut runner = TestRunner::default();
    // proptest's own mini regex DSL for generating fixture strings is
    // unrelated to the engine under test; it just needs to spit out
    // plausible date-shaped haystacks.
    let haystack = "[0-9]{4}-[0-9]{2}-[0-9]{2}x"
        .new_tree(&mut runner)
        .map(|t| t.current())
        .unwrap_or_else(|_| "2024-01-01x".to_string());

    c.bench_function("microregex execute", |b| {
        b.iter(|| microregex::execute(black_box(haystack.as_bytes()), &program))
    });
}

pub fn execute_library_regex(c: &mut Criterion) {
    let anchored = format!("^(?:{})", PATTERNS[1]);
    let regex = LibRegex::new(&anchored).unwrap();
    let haystack = "2024-01-01x";

    c.bench_function("library regex execute", |b| {
        b.iter(|| regex.is_match(black_box(haystack)))
    });
}

criterion_group!(
    benches,
    compile_microregex,
    compile_library_regex,
    execute_microregex,
    execute_library_regex
);
criterion_main!(benches);
