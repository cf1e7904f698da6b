use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dense_transform::{
    circular_shift, flip, fuse, resize, resize_with, rotate, slice, Axis, DenseArray, FlipAxes,
    FloatOps,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

fn random_array(dims: &[usize], seed: u64) -> DenseArray<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len: usize = dims.iter().product();
    let data: Vec<f64> = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    match DenseArray::from_vec(data, dims) {
        Ok(a) => a,
        Err(err) => panic!("from_vec failed: {err}"),
    }
}

fn bench_slice_fuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_fuse");
    for size in [64usize, 256, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = random_array(&[size, size], 42);
        group.bench_with_input(BenchmarkId::new("roundtrip", size), &size, |b, _| {
            b.iter(|| fuse(slice(&a).unwrap()).unwrap())
        });
    }
    group.finish();
}

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate");
    for size in [32usize, 64, 128] {
        let a = random_array(&[size, size, size], 7);
        group.throughput(Throughput::Elements(a.len() as u64));
        for (name, axis) in [("x", Axis::X), ("y", Axis::Y), ("z", Axis::Z)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| rotate(&a, axis, 90).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip");
    for size in [64usize, 256] {
        let a = random_array(&[size, size], 11);
        group.throughput(Throughput::Elements(a.len() as u64));
        group.bench_with_input(BenchmarkId::new("xy", size), &size, |b, _| {
            b.iter(|| flip(&a, FlipAxes::XY).unwrap())
        });
    }
    group.finish();
}

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("circular_shift");
    let a = random_array(&[128, 128], 13);
    for w in [3usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("window", w), &w, |b, &w| {
            b.iter(|| circular_shift(&a, &[w, w]).unwrap().count())
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));
    let a = random_array(&[256, 256], 17);
    for target in [97usize, 256, 601] {
        group.throughput(Throughput::Elements((target * target) as u64));
        group.bench_with_input(BenchmarkId::new("float", target), &target, |b, &t| {
            b.iter(|| resize(&a, &[t, t]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("generic", target), &target, |b, &t| {
            b.iter(|| resize_with(&a, &[t, t], &FloatOps).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_slice_fuse,
    bench_rotate,
    bench_flip,
    bench_windows,
    bench_resize
);
criterion_main!(benches);
