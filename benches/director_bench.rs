use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vitrine::easing::EasingFunction;
use vitrine::options::Options;
use vitrine::showcase::Showcase;
use vitrine::stage::{ModelDescriptor, PartDescriptor};

fn descriptor(part_count: usize) -> ModelDescriptor {
    ModelDescriptor {
        parts: (0..part_count)
            .map(|i| PartDescriptor {
                name: format!("part-{i}"),
                position: Vec3::new(i as f32 * 0.1, 0.0, 0.0),
                rotation: Quat::IDENTITY,
                bbox_center: Vec3::new(i as f32 * 0.1, 0.05, 0.0),
                bbox_size: Vec3::splat(0.2),
            })
            .collect(),
    }
}

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuarticInOut;
    c.bench_function("quartic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });

    let elastic = EasingFunction::ElasticOut;
    c.bench_function("elastic_out_easing", |b| {
        b.iter(|| black_box(elastic.evaluate(black_box(0.5))))
    });
}

fn scrub_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scrub");

    for count in [8, 32, 128].iter() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut showcase = Showcase::from_descriptor(
            &descriptor(*count),
            Options::default(),
            &mut rng,
        );
        let max = showcase.max_scroll();

        let mut scroll = 0.0;
        group.bench_function(format!("{}_parts", count), |b| {
            b.iter(|| {
                scroll = (scroll + 97.0) % max;
                showcase.scrub_to(black_box(scroll));
            })
        });
    }
    group.finish();
}

fn advance_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let mut showcase = Showcase::from_descriptor(
        &descriptor(32),
        Options::default(),
        &mut rng,
    );
    let max = showcase.max_scroll();

    let mut frame = 0_u32;
    c.bench_function("advance_frame", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let scroll = (frame % 600) as f32 / 600.0 * max;
            showcase.advance(black_box(scroll), 1.0 / 60.0);
        })
    });
}

criterion_group!(benches, easing_benchmark, scrub_benchmark, advance_benchmark);
criterion_main!(benches);
