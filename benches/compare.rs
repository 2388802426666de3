use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzyaddr::algorithms::fuzz::{partial_ratio, token_set_ratio};
use fuzzyaddr::{AddressComparer, CleanedAddress, Gazetteer};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gazetteer() -> Gazetteer {
    let mut builder = Gazetteer::builder();
    for district in 1..=12 {
        for ward in 1..=10 {
            builder = builder.ward(
                "Hồ Chí Minh",
                &format!("Quận {district}"),
                &format!("Phường {ward}"),
            );
        }
    }
    builder
        .ward("Hồ Chí Minh", "Quận 1", "Bến Thành")
        .district("Hà Nội", "Ba Đình")
        .province("Đà Nẵng")
        .build()
}

/// `n` address pairs, every other one reordered.
fn generate_pairs(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| {
            let first = format!("{i} Le Loi, Phuong {}, Quan {}, Ho Chi Minh", i % 10 + 1, i % 12 + 1);
            let second = if i % 2 == 0 {
                first.clone()
            } else {
                format!("TP Ho Chi Minh, Q.{}, P.{}, so {i} Le Loi", i % 12 + 1, i % 10 + 1)
            };
            (first, second)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Primitives
// ---------------------------------------------------------------------------

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("partial_ratio", |b| {
        b.iter(|| partial_ratio(black_box("BẾN THÀNH"), black_box("PHƯỜNG BẾN THÀNH QUẬN 1")));
    });

    group.bench_function("token_set_ratio", |b| {
        b.iter(|| {
            token_set_ratio(
                black_box("12 LÊ LỢI BẾN THÀNH QUẬN 1 HỒ CHÍ MINH"),
                black_box("HỒ CHÍ MINH QUẬN 1 PHƯỜNG BẾN THÀNH SỐ 12 LÊ LỢI"),
            )
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 2. Alignment per regime
// ---------------------------------------------------------------------------

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    let comparer = AddressComparer::default();

    let full = CleanedAddress::new("12 Le Loi, Ben Thanh, Quan 1, Ho Chi Minh");
    let reordered = CleanedAddress::new("Ho Chi Minh, Quan 1, Ben Thanh, 12 Le Loi");
    let blob = CleanedAddress::new("Ben Thanh Quan 1 Ho Chi Minh");

    group.bench_function("single", |b| {
        b.iter(|| comparer.align(black_box(&blob), black_box(&blob)));
    });

    group.bench_function("inject_all", |b| {
        b.iter(|| comparer.align(black_box(&blob), black_box(&full)));
    });

    group.bench_function("full", |b| {
        b.iter(|| comparer.align(black_box(&full), black_box(&reordered)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// 3. End-to-end compare with mapping
// ---------------------------------------------------------------------------

fn bench_compare(c: &mut Criterion) {
    let comparer = AddressComparer::new(gazetteer());

    c.bench_function("compare_mapped", |b| {
        b.iter(|| {
            comparer.compare(
                black_box("12 Lê Lợi, P. Bến Thành, Q.1, TP. Hồ Chí Minh"),
                black_box("Hồ Chí Minh; Quận 1; Phường Bến Thành; 12 Lê Lợi"),
            )
        });
    });
}

// ---------------------------------------------------------------------------
// 4. Batch throughput
// ---------------------------------------------------------------------------

fn bench_compare_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_many");
    group.sample_size(10);
    let comparer = AddressComparer::new(gazetteer());

    for size in [10, 100, 1_000] {
        let pairs = generate_pairs(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pairs, |b, pairs| {
            b.iter(|| comparer.compare_many(black_box(pairs)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_primitives,
    bench_align,
    bench_compare,
    bench_compare_many,
);
criterion_main!(benches);
