use std::convert::Infallible;

use shared::{FieldConfig, FrameClock, ParticleField, Phase, Renderer, Rgb, Surface};

#[derive(Default)]
struct FakeClock {
    next: u32,
    requested: Vec<u32>,
    cancelled: Vec<u32>,
}

impl FrameClock for FakeClock {
    type Handle = u32;
    type Error = Infallible;

    fn request(&mut self) -> Result<u32, Infallible> {
        self.next += 1;
        self.requested.push(self.next);
        Ok(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

#[derive(Debug, PartialEq)]
enum Op {
    Clear(f64, f64),
    Trail(Rgb),
    Head(Rgb),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Clear(width, height));
        Ok(())
    }

    fn stroke_trail(
        &mut self,
        _head: (f64, f64),
        _tail: (f64, f64),
        _line_width: f64,
        color: Rgb,
        _opacity: f64,
    ) -> Result<(), Infallible> {
        self.ops.push(Op::Trail(color));
        Ok(())
    }

    fn fill_head(
        &mut self,
        _center: (f64, f64),
        _radius: f64,
        color: Rgb,
        _opacity: f64,
    ) -> Result<(), Infallible> {
        self.ops.push(Op::Head(color));
        Ok(())
    }
}

fn renderer() -> Renderer<FakeClock> {
    let field = ParticleField::new(FieldConfig::default(), 800.0, 600.0, 9).unwrap();

    Renderer::new(field, FakeClock::default())
}

fn pump(renderer: &mut Renderer<FakeClock>, surface: &mut Recorder, frames: usize) {
    for _ in 0..frames {
        let handle = renderer.pending().expect("a frame should be pending");
        renderer.frame(handle, surface).unwrap();
    }
}

#[test]
fn start_draws_and_schedules() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();

    assert_eq!(renderer.phase(), Phase::Running);
    assert_eq!(renderer.frames(), 1);
    assert_eq!(renderer.pending(), Some(1));
    assert_eq!(surface.ops[0], Op::Clear(800.0, 600.0));
    assert_eq!(surface.ops.len(), 1 + 2 * 20);
}

#[test]
fn one_frame_in_flight() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    pump(&mut renderer, &mut surface, 10);

    assert_eq!(renderer.frames(), 11);
    assert_eq!(renderer.clock().requested.len(), 11);
    assert_eq!(renderer.pending(), Some(11));
}

#[test]
fn stale_handle_is_ignored() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    pump(&mut renderer, &mut surface, 1);

    let drawn = surface.ops.len();
    renderer.frame(1, &mut surface).unwrap();

    assert_eq!(surface.ops.len(), drawn);
    assert_eq!(renderer.frames(), 2);
}

#[test]
fn start_twice_is_a_no_op() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    renderer.start(&mut surface).unwrap();

    assert_eq!(renderer.frames(), 1);
    assert_eq!(renderer.clock().requested, vec![1]);
}

#[test]
fn pool_size_holds_across_frames() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();

    for _ in 0..100 {
        pump(&mut renderer, &mut surface, 30);
        assert_eq!(renderer.field().background().len(), 20);
    }
}

#[test]
fn hue_cycles_every_sixty_frames() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    let start = renderer.field().hue();

    pump(&mut renderer, &mut surface, 60);

    assert_eq!(renderer.field().hue(), start);
}

#[test]
fn pointer_moves_are_rate_limited() {
    let mut close = renderer();
    let mut apart = renderer();
    let mut surface = Recorder::default();

    close.start(&mut surface).unwrap();
    apart.start(&mut surface).unwrap();

    close.pointer_moved(50.0, 50.0, 10_000.0);
    close.pointer_moved(60.0, 50.0, 10_010.0);
    apart.pointer_moved(50.0, 50.0, 10_000.0);
    apart.pointer_moved(60.0, 50.0, 10_060.0);

    assert_eq!(close.field().transient().len(), 1);
    assert_eq!(apart.field().transient().len(), 2);
}

#[test]
fn pointer_particles_drawn_in_rainbow_color() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    renderer.pointer_moved(50.0, 50.0, 0.0);

    surface.ops.clear();
    pump(&mut renderer, &mut surface, 1);

    // Pointer particles come right after the clear.
    assert_eq!(surface.ops[1], Op::Trail(Rgb::from_hue(6.0)));
    assert_eq!(surface.ops[2], Op::Head(Rgb::from_hue(6.0)));
    assert_eq!(surface.ops[3], Op::Trail(Rgb::WHITE));
}

#[test]
fn detach_cancels_pending_frame() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    pump(&mut renderer, &mut surface, 3);

    assert!(renderer.detach());
    assert_eq!(renderer.phase(), Phase::Detached);
    assert_eq!(renderer.pending(), None);
    assert_eq!(renderer.clock().cancelled, vec![4]);
}

#[test]
fn nothing_happens_after_detach() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    let handle = renderer.pending().unwrap();
    renderer.detach();

    let drawn = surface.ops.len();
    let requested = renderer.clock().requested.len();

    renderer.frame(handle, &mut surface).unwrap();
    renderer.resized(100.0, 100.0);

    assert!(!renderer.pointer_moved(10.0, 10.0, 5_000.0));
    assert!(renderer.field().transient().is_empty());
    assert_eq!(surface.ops.len(), drawn);
    assert_eq!(renderer.clock().requested.len(), requested);
    assert_eq!(renderer.field().width(), 800.0);
}

#[test]
fn detach_is_idempotent() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();

    assert!(renderer.detach());
    assert!(!renderer.detach());
    assert_eq!(renderer.clock().cancelled.len(), 1);
}

#[test]
fn detach_before_start_prevents_start() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    assert!(renderer.detach());
    renderer.start(&mut surface).unwrap();

    assert!(surface.ops.is_empty());
    assert!(renderer.clock().requested.is_empty());
    assert!(renderer.clock().cancelled.is_empty());
}

#[test]
fn resize_reaches_field_while_running() {
    let mut renderer = renderer();
    let mut surface = Recorder::default();

    renderer.start(&mut surface).unwrap();
    renderer.resized(1024.0, 768.0);
    pump(&mut renderer, &mut surface, 1);

    assert!(surface.ops.contains(&Op::Clear(1024.0, 768.0)));
}
