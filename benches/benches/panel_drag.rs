// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point, Size};
use understory_floating_panel::{
    FloatingPanel, HostContainer, Insertion, PanSource, TrackedScroll,
};

fn attached() -> FloatingPanel {
    let mut panel = FloatingPanel::new();
    panel.add_panel(
        HostContainer::plain(Size::new(375.0, 812.0))
            .with_safe_area(Insets::new(0.0, 44.0, 0.0, 34.0)),
        Insertion::Front,
        false,
    );
    panel.track_scroll_view(TrackedScroll::new(4000.0, 600.0));
    panel
}

fn drag(panel: &mut FloatingPanel, source: PanSource, from_y: f64, to_y: f64, steps: u32) {
    panel.pointer_down(Point::new(180.0, from_y), 0.0, source);
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        panel.pointer_moved(Point::new(180.0, from_y + (to_y - from_y) * t), t * 0.25);
    }
    panel.pointer_up(Point::new(180.0, to_y), 0.25);
    while panel.tick(1.0 / 120.0) {}
}

fn bench_panel(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_floating_panel");

    for steps in [30_u32, 120] {
        group.bench_function(format!("surface_drag_and_settle(steps={steps})"), |b| {
            b.iter_batched(
                attached,
                |mut panel| {
                    drag(&mut panel, PanSource::Surface, 540.0, 120.0, steps);
                    black_box(panel.state())
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("scroll_handoff(steps={steps})"), |b| {
            b.iter_batched(
                attached,
                |mut panel| {
                    drag(&mut panel, PanSource::Scroll, 700.0, 0.0, steps);
                    black_box(panel.tracked_scroll().map(TrackedScroll::content_offset))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("backdrop_alpha_sweep", |b| {
        let panel = attached();
        let adapter = panel.layout_adapter();
        b.iter(|| {
            let mut sum = 0.0;
            for y in (0..812).step_by(4) {
                sum += adapter.backdrop_alpha_at(black_box(f64::from(y)));
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_panel);
criterion_main!(benches);
