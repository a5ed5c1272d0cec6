//! Benchmarks for the particle field and the per-frame page work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio::field::{FieldConfig, ParticleField};
use folio::input::Input;
use folio::{Content, FolioConfig, Page, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const BOUNDS: Vec2 = Vec2::new(1920.0, 1080.0);

fn field(count: usize) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(42);
    ParticleField::with_rng(FieldConfig::default().with_count(count), BOUNDS, &mut rng)
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for count in [60, 250, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut f = field(count);
            let pointer = BOUNDS * 0.5;
            b.iter(|| f.step(black_box(pointer)))
        });
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_links");

    for count in [60, 250, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let f = field(count);
            let mut links = Vec::new();
            b.iter(|| {
                f.links_into(&mut links);
                black_box(links.len())
            })
        });
    }

    group.finish();
}

fn bench_page_frame(c: &mut Criterion) {
    let content = Content::embedded().expect("embedded content parses");
    let mut rng = StdRng::seed_from_u64(7);
    let mut page = Page::with_rng(content, &FolioConfig::default(), Vec2::new(1280.0, 800.0), &mut rng);
    let input = Input::new();

    c.bench_function("page_update", |b| {
        b.iter(|| page.update(black_box(Duration::from_millis(16)), &input))
    });
}

criterion_group!(benches, bench_step, bench_links, bench_page_frame);
criterion_main!(benches);
