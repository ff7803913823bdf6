//! Criterion benchmarks for node name validation and generation.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use meshname::{NodeName, NodeNameBuilder, NodeNameGrammar, generate, validate};

/// Benchmark: validate with valid and invalid candidates
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let grammar = NodeNameGrammar::canonical();

    let test_cases = [
        ("valid_short", "CO-DEN-PARK-T01"),
        ("valid", "CO-DENVER-CHSPARK-RC01"),
        ("valid_max", "WA-SEATTLE-SPCNEED-RE12"),
        ("unknown_role", "CO-DENVER-CHSPARK-XX01"),
        ("overlong", "COLORADO-DENVER-CHEESMANPARK-RC01"),
        ("unsegmented", "COLORADO_DENVER_CHEESMAN_PARK"),
    ];

    for (name, candidate) in test_cases {
        group.throughput(Throughput::Bytes(candidate.len() as u64));
        group.bench_with_input(BenchmarkId::new("name", name), &candidate, |b, candidate| {
            b.iter(|| validate(black_box(candidate), grammar));
        });
    }

    group.finish();
}

/// Benchmark: generate from field values
fn bench_generate(c: &mut Criterion) {
    let grammar = NodeNameGrammar::canonical();

    c.bench_function("generate", |b| {
        b.iter(|| {
            generate(
                grammar,
                black_box("co"),
                black_box("denver"),
                black_box("chspark"),
                black_box("rc"),
                black_box(1),
            )
        });
    });

    c.bench_function("builder", |b| {
        b.iter(|| {
            NodeNameBuilder::new()
                .state(black_box("CO"))
                .city(black_box("DENVER"))
                .landmark(black_box("CHSPARK"))
                .type_role(black_box("RC"))
                .build()
        });
    });
}

/// Benchmark: parse plus Display round trip
fn bench_roundtrip(c: &mut Criterion) {
    c.bench_function("parse_display", |b| {
        b.iter(|| {
            let name = NodeName::parse(black_box("CO-DENVER-CHSPARK-RC01"));
            name.map(|n| n.to_string())
        });
    });
}

criterion_group!(benches, bench_validate, bench_generate, bench_roundtrip);
criterion_main!(benches);
