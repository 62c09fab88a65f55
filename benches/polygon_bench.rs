use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use herbrand::extension::{lower_jumps, upper_from_lower};
use herbrand::{EisensteinEngine, NewtonPolygon, PresentedCompletion, Value, WeakExtension};

fn bench_polygon_hull(c: &mut Criterion) {
    // sawtooth profile: many interior points get discarded by the hull
    let points: Vec<(i64, Value)> = (0..500)
        .map(|i| (i, Value::from_integer((500 - i) * 3 + i % 7)))
        .collect();

    c.bench_function("newton_polygon_500_points", |b| {
        b.iter(|| NewtonPolygon::from_points(black_box(points.clone())))
    });
}

fn bench_jump_extraction(c: &mut Criterion) {
    let points: Vec<(i64, Value)> = (0..200)
        .map(|i| (i, Value::from_integer((200 - i) * (200 - i) / 40)))
        .collect();
    let polygon = NewtonPolygon::from_points(points);

    c.bench_function("jump_extraction_200_points", |b| {
        b.iter(|| {
            let lower = lower_jumps(black_box(&polygon), 200);
            upper_from_lower(&lower, 200)
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    c.bench_function("sextic_filtration_pipeline", |b| {
        b.iter(|| {
            let target = PresentedCompletion::eisenstein(3, &[3, 0, 3, 0, 0, 0, 1]).unwrap();
            let base =
                Arc::new(PresentedCompletion::rationals(3).with_splitting_field(target));
            let f = base.polynomial_over_rationals(&[18, 0, 0, 6, 6, 0, 1]);
            let ext = WeakExtension::new(base, &[f], 1, EisensteinEngine).unwrap();
            black_box(ext.upper_jumps().unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_polygon_hull,
    bench_jump_extraction,
    bench_full_pipeline
);
criterion_main!(benches);
