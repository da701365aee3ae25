//! Benchmarks for blockwise copy operations.

use std::fs;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use blockwise::{discard, Copier};

const SIZES: [usize; 3] = [64 * 1024, 1024 * 1024, 8 * 1024 * 1024];

fn setup_pair(dir: &tempfile::TempDir, size: usize) -> (PathBuf, PathBuf) {
    let src = dir.path().join(format!("src-{size}"));
    let dst = dir.path().join(format!("dst-{size}"));
    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    fs::write(&src, &data).unwrap();
    (src, dst)
}

fn bench_fresh_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("fresh_copy");
    let dir = tempfile::tempdir().unwrap();
    let copier = Copier::new();

    for size in SIZES {
        let (src, dst) = setup_pair(&dir, size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let _ = fs::remove_file(&dst);
                copier.copy(&mut discard, &src, &dst).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_clean_recopy(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_recopy");
    let dir = tempfile::tempdir().unwrap();
    let copier = Copier::new();

    for size in SIZES {
        let (src, dst) = setup_pair(&dir, size);
        copier.copy(&mut discard, &src, &dst).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| copier.copy(&mut discard, &src, &dst).unwrap());
        });
    }

    group.finish();
}

fn bench_single_dirty_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_dirty_page");
    let dir = tempfile::tempdir().unwrap();
    let copier = Copier::new();

    for size in SIZES {
        let (src, dst) = setup_pair(&dir, size);
        copier.copy(&mut discard, &src, &dst).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                // Dirty one page in the middle, then re-sync it.
                let mut data = fs::read(&dst).unwrap();
                let mid = data.len() / 2;
                data[mid] ^= 0xA5;
                fs::write(&dst, &data).unwrap();
                copier.copy(&mut discard, &src, &dst).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_page_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_size");
    let dir = tempfile::tempdir().unwrap();
    let size = 1024 * 1024;

    for page_size in [512usize, 4096, 65536] {
        let copier = Copier::with_page_size(page_size);
        let (src, dst) = setup_pair(&dir, size + page_size);
        copier.copy(&mut discard, &src, &dst).unwrap();

        group.throughput(Throughput::Bytes((size + page_size) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(page_size),
            &page_size,
            |b, _| {
                b.iter(|| copier.copy(&mut discard, &src, &dst).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fresh_copy,
    bench_clean_recopy,
    bench_single_dirty_page,
    bench_page_sizes
);
criterion_main!(benches);
