// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_motion::{Animator, SpringTiming, Timing, TimingCurve};

fn bench_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_motion");

    for (damping, velocity) in [(1.0, 0.0), (0.7, 2000.0), (1.6, 0.0)] {
        let spring = SpringTiming::new(damping, 0.3).with_initial_velocity(velocity);
        group.bench_function(format!("settling_duration(z={damping},v={velocity})"), |b| {
            b.iter(|| black_box(spring.settling_duration(black_box(velocity / 400.0))));
        });

        group.bench_function(format!("spring_run_to_end(z={damping},v={velocity})"), |b| {
            b.iter_batched(
                || Animator::new(Timing::Spring(spring)),
                |mut animator| {
                    animator.start(500.0, 100.0);
                    while animator.is_running() {
                        black_box(animator.tick(1.0 / 120.0));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("ease_in_out_progress", |b| {
        let curve = TimingCurve::EaseInOut;
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..=100 {
                sum += curve.progress(black_box(f64::from(i) / 100.0));
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_motion);
criterion_main!(benches);
