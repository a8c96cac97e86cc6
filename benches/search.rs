//! Performance benchmarks for nappi
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nappi::catalog::Catalog;
use nappi::index::KeywordIndex;
use nappi::query::{parse_query, QueryExecutor};

const INGREDIENTS: &[&str] = &[
    "PARACETAMOL",
    "IBUPROFEN",
    "ASPIRIN",
    "AMOXICILLIN",
    "METFORMIN",
    "SIMVASTATIN",
    "OMEPRAZOLE",
    "CETIRIZINE",
];

const FORMS: &[(&str, &str)] = &[
    ("TABLET", "TAB"),
    ("CAPSULE", "CAP"),
    ("SYRUP", "SYR"),
    ("SUSPENSION", "SUS"),
];

/// Fixed-width source text with `count` synthetic products
fn synthetic_source(count: usize) -> Vec<u8> {
    let mut out = String::with_capacity(count * 80);

    for i in 0..count {
        let ingredient = INGREDIENTS[i % INGREDIENTS.len()];
        let (form, form_code) = FORMS[(i / INGREDIENTS.len()) % FORMS.len()];
        let strength = format!("{}MG", 50 * (1 + i % 20));
        let name = format!("{} {} {} {}", ingredient, strength, form, i % 97);

        out.push_str(&format!(
            "{:<11}{:<9}{:<38} {:<16}{:<4}\n",
            i,
            700_000 + i,
            name,
            strength,
            form_code
        ));
    }

    out.into_bytes()
}

fn bench_catalog_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_parsing");

    for count in [1_000, 20_000] {
        let source = synthetic_source(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, s| {
            b.iter(|| Catalog::from_bytes(black_box(s)))
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for count in [1_000, 20_000] {
        let catalog = Catalog::from_bytes(&synthetic_source(count)).expect("valid source");
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &catalog, |b, cat| {
            b.iter(|| KeywordIndex::build(black_box(cat)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let catalog = Catalog::from_bytes(&synthetic_source(20_000)).expect("valid source");
    let index = KeywordIndex::build(&catalog);

    let queries = vec![
        "paracetamol",
        "amox cap",
        "ibuprofen 200mg tablet",
        "nothing-matches",
        "as mg",
    ];

    let mut group = c.benchmark_group("search");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| {
                let terms = parse_query(black_box(q));
                QueryExecutor::new(&catalog, &index).execute(&terms)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_catalog_parsing, bench_index_build, bench_search);

criterion_main!(benches);
