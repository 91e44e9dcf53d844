use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use splaymemo::{fibonacci_via_splay, SplayTree};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("insert_1000_ascending", |b| {
        b.iter(|| {
            let mut tree = SplayTree::with_capacity(1000);
            for k in 0..1000u64 {
                tree.insert(k, k);
            }
            black_box(tree.len());
        });
    });
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("find_hot_key", |b| {
        let mut tree = SplayTree::new();
        for k in 0..1000u64 {
            tree.insert(k, k);
        }

        // Same key every time: after the first splay it sits at the root
        b.iter(|| {
            black_box(tree.find(&999).copied());
        });
    });

    group.bench_function("find_cycling_keys", |b| {
        let mut tree = SplayTree::new();
        for k in 0..1000u64 {
            tree.insert(k, k);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(tree.find(&(counter % 1000)).copied());
            counter += 1;
        });
    });
    group.finish();
}

fn bench_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci_splay");
    group.sample_size(50);

    for n in [10u64, 50, 100, 180] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut tree = SplayTree::new();
                black_box(fibonacci_via_splay(n, &mut tree).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_fibonacci);
criterion_main!(benches);
