use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mfront_core::forest::EliminationForest;
use mfront_tree::{max_front_sizes_into, postorder};

/// Balanced-ish forest: node j's parent is (n + j) / 2, giving a deep fan-in tree.
fn make_forest(n: usize) -> EliminationForest<i64> {
    let mut fnrows = Vec::with_capacity(n);
    let mut fncols = Vec::with_capacity(n);
    let mut parent = Vec::with_capacity(n);
    let mut npiv = Vec::with_capacity(n);
    for j in 0..n {
        fnrows.push(1 + (j % 97) as i64);
        fncols.push(1 + (j % 89) as i64);
        let p = (n + j) / 2;
        parent.push(if p > j && p < n { p as i64 } else { -1 });
        npiv.push(if j % 17 == 0 { 0 } else { 1 });
    }
    EliminationForest::new(fnrows, fncols, parent, npiv).unwrap()
}

fn bench_front_sizes(c: &mut Criterion) {
    let forest = make_forest(100_000);
    let mut fsize = vec![0i64; forest.len()];
    c.bench_function("max_front_sizes_100k", |b| {
        b.iter(|| {
            max_front_sizes_into(
                &mut fsize,
                forest.fnrows(),
                forest.fncols(),
                forest.parent(),
                forest.npiv(),
            );
        })
    });

    c.bench_function("postorder_100k", |b| {
        b.iter(|| {
            black_box(postorder(&forest, black_box(&fsize)));
        })
    });
}

criterion_group!(fronts, bench_front_sizes);
criterion_main!(fronts);
