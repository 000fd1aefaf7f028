//! Lazy vs eager range updates, and query cost, across sequence sizes.

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use range_tree::EagerRangeTree;
use range_tree::LazyRangeTree;
use range_tree::RangeTree;
use range_tree::Sum;
use range_tree::Updater;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];
const OPS: usize = 1_000;

fn add(delta: i64) -> Updater<Sum<i64>> {
    return Updater::range(move |v: &Sum<i64>, l, r| Sum(v.0 + delta * (r - l + 1) as i64));
}

/// Random inclusive ranges, fixed seed so every run sees the same workload.
fn ranges(len: usize) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(42);
    return (0..OPS)
        .map(|_| {
            let a = rng.gen_range(0..len);
            let b = rng.gen_range(0..len);
            (a.min(b), a.max(b))
        })
        .collect();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for len in SIZES {
        let items: Vec<i64> = (0..len as i64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &items, |b, items| {
            b.iter(|| {
                let tree: LazyRangeTree<i64, Sum<i64>> = RangeTree::from_vec(items.clone());
                black_box(tree)
            });
        });
    }
    group.finish();
}

fn bench_update_then_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_then_query");
    group.sample_size(20);
    for len in SIZES {
        let items: Vec<i64> = (0..len as i64).collect();
        let work = ranges(len);

        group.bench_with_input(BenchmarkId::new("lazy", len), &work, |b, work| {
            b.iter(|| {
                let mut tree: LazyRangeTree<i64, Sum<i64>> = RangeTree::from_vec(items.clone());
                for &(l, r) in work {
                    tree.update(add(1), l, r);
                    black_box(tree.query(l, r));
                }
            });
        });

        // Eager updates touch every node in range, so keep the large case out.
        if len <= 10_000 {
            group.bench_with_input(BenchmarkId::new("eager", len), &work, |b, work| {
                b.iter(|| {
                    let mut tree: EagerRangeTree<i64, Sum<i64>> = RangeTree::from_vec(items.clone());
                    for &(l, r) in work {
                        tree.update(add(1), l, r);
                        black_box(tree.query(l, r));
                    }
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_update_then_query);
criterion_main!(benches);
