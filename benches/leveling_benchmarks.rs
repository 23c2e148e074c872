use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ascend::engine::leveling::{cumulative_xp_for_level, level_for_xp, level_state};

fn bench_level_for_xp(c: &mut Criterion) {
    c.bench_function("level_for_xp (fresh profile)", |b| {
        b.iter(|| level_for_xp(black_box(320)))
    });

    c.bench_function("level_for_xp (1M XP)", |b| {
        b.iter(|| level_for_xp(black_box(1_000_000)))
    });

    // Worst case: the threshold walk runs all the way to the level cap.
    c.bench_function("level_for_xp (capped)", |b| {
        b.iter(|| level_for_xp(black_box(i64::MAX)))
    });
}

fn bench_cumulative(c: &mut Criterion) {
    c.bench_function("cumulative_xp_for_level (level 100)", |b| {
        b.iter(|| cumulative_xp_for_level(black_box(100)))
    });
}

fn bench_level_state(c: &mut Criterion) {
    c.bench_function("level_state (1M XP)", |b| {
        b.iter(|| level_state(black_box(1_000_000)))
    });
}

criterion_group!(benches, bench_level_for_xp, bench_cumulative, bench_level_state);
criterion_main!(benches);
