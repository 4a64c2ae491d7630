#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use rangetrack_core::event::{PointerEvent, TouchEvent, TouchPoint};
use rangetrack_core::geometry::{ClientRect, Percentages};
use rangetrack_web::{ListenerRegistry, Track, TrackClassNames, TrackConfig, TrackHandlers, TrackSurface};
use std::hint::black_box;

struct BenchNode(ListenerRegistry);

impl TrackSurface for BenchNode {
    type Document = ListenerRegistry;

    fn bounding_client_rect(&self) -> ClientRect {
        ClientRect::new(40.0, 200.0, 640.0, 8.0)
    }

    fn owner_document(&self) -> ListenerRegistry {
        self.0.clone()
    }
}

fn track() -> Track<BenchNode> {
    let handlers = TrackHandlers::new(|_, position| {
        black_box(position);
    })
    .on_track_drag(|_, position| {
        black_box(position);
    })
    .on_track_mouse_up(|_, position| {
        black_box(position);
    });
    let mut track = Track::new(TrackConfig::default(), handlers);
    track.mount(BenchNode(ListenerRegistry::new()));
    track
}

fn bench_track_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("track/gesture/lifecycle");

    group.bench_function("mouse_down_move_64_up", |b| {
        let mut track = track();
        b.iter(|| {
            let down = track.mouse_down(PointerEvent::new(60.0, 204.0));
            black_box(down.sequence);
            for step in 0..64_u32 {
                let dispatch = track.document_mouse_move(PointerEvent::new(60.0 + f64::from(step), 204.0));
                black_box(dispatch.position);
            }
            let up = track.document_mouse_up(PointerEvent::new(130.0, 204.0));
            black_box(up.listener_change);
        });
    });

    group.bench_function("touch_start_move_64_end", |b| {
        let mut track = track();
        b.iter(|| {
            track.touch_start(TouchEvent::single(TouchPoint::new(0, 60.0, 204.0)));
            for step in 0..64_u32 {
                let event = TouchEvent::single(TouchPoint::new(0, 60.0 + f64::from(step), 204.0));
                black_box(track.document_touch_move(event).position);
            }
            let end = track.document_touch_end(TouchEvent::lifted(TouchPoint::new(0, 130.0, 204.0)));
            black_box(end.suppress_default);
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let class_names = TrackClassNames::new("track", "track--active");
    let track = track();
    c.bench_function("track/render/active_style", |b| {
        b.iter(|| {
            let node = track.render(&class_names, black_box(Percentages::new(0.2, 0.7)), ());
            black_box(node.active_track.style.to_css());
        });
    });
}

criterion_group!(benches, bench_track_lifecycle, bench_render);
criterion_main!(benches);
