//! Mount / frame / resize / unmount lifecycle of the particle field.

use rand::rngs::StdRng;

use crate::core::{FrameHost, FrameId, Viewport};
use crate::particles::{FieldConfig, ParticleField};
use crate::render::{DrawSurface, FieldPainter, FrameStats};

/// Lifecycle state of an animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Built but not started.
    #[default]
    Idle,
    /// Drawing and scheduling frames.
    Running,
    /// Started without a drawing surface; does nothing.
    Inert,
    /// The host refused to schedule a frame. The field is kept but no longer drawn.
    Halted,
    /// Torn down. No further frames are drawn.
    Stopped,
}

/// Particle field plus the surface it is painted on.
pub struct FieldRenderer<S> {
    field: ParticleField,
    painter: FieldPainter,
    surface: S,
}

impl<S: DrawSurface> FieldRenderer<S> {
    /// Size the surface to the viewport and spawn the field over it.
    pub fn new(config: &FieldConfig, mut surface: S, viewport: Viewport, rng: &mut StdRng) -> Self {
        surface.resize(viewport);
        Self {
            field: ParticleField::new(config, viewport, rng),
            painter: FieldPainter::new(config),
            surface,
        }
    }

    /// Advance one frame and paint it.
    pub fn tick(&mut self) -> FrameStats {
        self.field.step();
        self.painter.paint(&mut self.field, &mut self.surface)
    }

    /// Resize both the field bounds and the surface.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.field.resize(viewport);
    }

    /// The simulated field.
    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The drawing surface.
    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Drives a `FieldRenderer` from a `FrameHost`.
///
/// Exactly one frame is pending while running. `unmount` cancels it, so a
/// torn-down loop never draws again.
pub struct AnimationLoop<H: FrameHost, S: DrawSurface> {
    host: H,
    config: FieldConfig,
    surface: Option<S>,
    renderer: Option<FieldRenderer<S>>,
    pending: Option<FrameId>,
    watching_resize: bool,
    state: LoopState,
    frames: u64,
}

impl<H: FrameHost, S: DrawSurface> AnimationLoop<H, S> {
    /// Build an idle loop. `surface` is `None` when the host has no 2D context.
    pub fn new(host: H, surface: Option<S>, config: FieldConfig) -> Self {
        Self {
            host,
            config,
            surface,
            renderer: None,
            pending: None,
            watching_resize: false,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Build and immediately start a loop.
    pub fn mount(host: H, surface: Option<S>, config: FieldConfig) -> Self {
        let mut animation = Self::new(host, surface, config);
        animation.start();
        animation
    }

    /// Size the surface, spawn particles, paint the first frame and schedule
    /// the next. Without a surface the loop goes inert instead.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }

        let Some(surface) = self.surface.take() else {
            log::debug!("No 2D drawing context; particle field disabled");
            self.state = LoopState::Inert;
            return;
        };

        let viewport = self.host.viewport();
        let mut rng = self.config.make_rng();
        let mut renderer = FieldRenderer::new(&self.config, surface, viewport, &mut rng);
        log::debug!(
            "Mounted particle field: {} particles on {}x{} ({:?} search)",
            renderer.field().len(),
            viewport.width,
            viewport.height,
            renderer.field().neighbor_search(),
        );

        self.host.watch_resize();
        self.watching_resize = true;

        let stats = renderer.tick();
        self.frames += 1;
        log::trace!("frame {}: {} links", self.frames, stats.links);

        self.renderer = Some(renderer);
        self.state = LoopState::Running;
        self.schedule_next();
    }

    /// Request the next frame, halting if the host refuses.
    fn schedule_next(&mut self) {
        self.pending = self.host.request_frame();
        if self.pending.is_none() {
            log::warn!(
                "Host refused to schedule frame {}; animation halted",
                self.frames + 1
            );
            self.state = LoopState::Halted;
        }
    }

    /// Handle the host's frame callback.
    ///
    /// Returns `None` and draws nothing when no frame is pending, which
    /// covers stale callbacks and callbacks after teardown.
    pub fn on_frame(&mut self) -> Option<FrameStats> {
        self.pending.take()?;
        let renderer = self.renderer.as_mut()?;

        let stats = renderer.tick();
        self.frames += 1;
        log::trace!("frame {}: {} links", self.frames, stats.links);

        self.schedule_next();
        Some(stats)
    }

    /// Re-read the viewport and resize the field and surface.
    pub fn on_resize(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let viewport = self.host.viewport();
        log::debug!("Resizing particle field to {}x{}", viewport.width, viewport.height);
        renderer.resize(viewport);
    }

    /// Cancel the pending frame, stop watching resizes and drop the field.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
        }
        if self.watching_resize {
            self.host.unwatch_resize();
            self.watching_resize = false;
        }
        if matches!(self.state, LoopState::Running | LoopState::Halted) {
            log::debug!("Unmounted particle field after {} frames", self.frames);
        }
        self.renderer = None;
        self.surface = None;
        self.state = LoopState::Stopped;
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are being drawn.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Whether a frame callback is outstanding.
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames painted so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The live renderer, while running.
    #[inline]
    pub fn renderer(&self) -> Option<&FieldRenderer<S>> {
        self.renderer.as_ref()
    }

    /// The frame host.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the frame host.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: FrameHost, S: DrawSurface> Drop for AnimationLoop<H, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct HostLog {
        requested: Vec<FrameId>,
        cancelled: Vec<FrameId>,
        watching: bool,
        unwatch_calls: usize,
    }

    /// Host that records scheduling calls into a shared log.
    struct MockHost {
        viewport: Rc<RefCell<Viewport>>,
        log: Rc<RefCell<HostLog>>,
        next: i32,
        /// Requests beyond this many are refused.
        limit: Option<i32>,
    }

    impl FrameHost for MockHost {
        fn viewport(&self) -> Viewport {
            *self.viewport.borrow()
        }

        fn request_frame(&mut self) -> Option<FrameId> {
            if self.limit.is_some_and(|limit| self.next >= limit) {
                return None;
            }
            self.next += 1;
            let id = FrameId(self.next);
            self.log.borrow_mut().requested.push(id);
            Some(id)
        }

        fn cancel_frame(&mut self, id: FrameId) {
            self.log.borrow_mut().cancelled.push(id);
        }

        fn watch_resize(&mut self) {
            self.log.borrow_mut().watching = true;
        }

        fn unwatch_resize(&mut self) {
            let mut log = self.log.borrow_mut();
            log.watching = false;
            log.unwatch_calls += 1;
        }
    }

    struct Harness {
        viewport: Rc<RefCell<Viewport>>,
        host_log: Rc<RefCell<HostLog>>,
        draw_log: crate::render::CommandLog,
        animation: AnimationLoop<MockHost, RecordingSurface>,
    }

    fn mounted(config: FieldConfig) -> Harness {
        mounted_with_limit(config, None)
    }

    fn mounted_with_limit(config: FieldConfig, limit: Option<i32>) -> Harness {
        let viewport = Rc::new(RefCell::new(Viewport::new(800, 600)));
        let host_log = Rc::new(RefCell::new(HostLog::default()));
        let host = MockHost {
            viewport: viewport.clone(),
            log: host_log.clone(),
            next: 0,
            limit,
        };
        let surface = RecordingSurface::new();
        let draw_log = surface.log();
        let animation = AnimationLoop::mount(host, Some(surface), config.with_seed(3));
        Harness { viewport, host_log, draw_log, animation }
    }

    fn clears(log: &crate::render::CommandLog) -> usize {
        log.count(|c| *c == DrawCommand::Clear)
    }

    #[test]
    fn test_mount_sizes_surface_and_paints_first_frame() {
        let h = mounted(FieldConfig::default());
        assert!(h.animation.is_running());
        assert_eq!(h.animation.frame_count(), 1);

        let commands = h.draw_log.snapshot();
        assert_eq!(commands[0], DrawCommand::Resize(Viewport::new(800, 600)));
        assert_eq!(commands[1], DrawCommand::Clear);

        let host = h.host_log.borrow();
        assert!(host.watching);
        assert_eq!(host.requested.len(), 1);
    }

    #[test]
    fn test_particle_count_constant_across_frames() {
        let mut h = mounted(FieldConfig::default());
        for _ in 0..200 {
            let stats = h.animation.on_frame().unwrap();
            assert_eq!(stats.particles, 80);
        }
        let renderer = h.animation.renderer().unwrap();
        assert_eq!(renderer.field().len(), 80);
        assert!(renderer
            .field()
            .particles()
            .iter()
            .all(|p| p.is_within(800.0, 600.0)));
        assert_eq!(h.animation.frame_count(), 201);
    }

    #[test]
    fn test_unmount_cancels_exactly_once_and_stops_drawing() {
        let mut h = mounted(FieldConfig::default());
        h.animation.on_frame();
        h.animation.on_frame();
        let pending = *h.host_log.borrow().requested.last().unwrap();

        h.animation.unmount();
        h.animation.unmount();

        {
            let host = h.host_log.borrow();
            assert_eq!(host.cancelled, vec![pending]);
            assert!(!host.watching);
            assert_eq!(host.unwatch_calls, 1);
        }

        let drawn = h.draw_log.len();
        assert_eq!(h.animation.on_frame(), None);
        h.animation.on_resize();
        assert_eq!(h.draw_log.len(), drawn);
        assert_eq!(h.animation.state(), LoopState::Stopped);
        assert_eq!(h.host_log.borrow().requested.len(), 3);
    }

    #[test]
    fn test_drop_tears_down() {
        let h = mounted(FieldConfig::default());
        let host_log = h.host_log.clone();
        drop(h);
        assert_eq!(host_log.borrow().cancelled.len(), 1);
        assert!(!host_log.borrow().watching);
    }

    #[test]
    fn test_stale_callback_is_ignored() {
        let mut h = mounted(FieldConfig::default());
        assert!(h.animation.on_frame().is_some());
        // The host only fires once per request; simulate a duplicate delivery
        // after the pending slot was consumed by unmount.
        h.animation.unmount();
        assert!(h.animation.on_frame().is_none());
        assert_eq!(clears(&h.draw_log), 2);
    }

    #[test]
    fn test_resize_preserves_particles() {
        let mut h = mounted(FieldConfig::default());
        let before = h.animation.renderer().unwrap().field().particles().to_vec();

        *h.viewport.borrow_mut() = Viewport::new(1024, 300);
        h.animation.on_resize();

        let renderer = h.animation.renderer().unwrap();
        assert_eq!(renderer.field().bounds(), (1024.0, 300.0));
        assert_eq!(renderer.field().particles(), &before[..]);
        assert_eq!(
            h.draw_log.snapshot().last(),
            Some(&DrawCommand::Resize(Viewport::new(1024, 300)))
        );

        h.animation.on_frame();
        let field = h.animation.renderer().unwrap().field();
        assert_eq!(field.len(), 80);
        assert!(field.particles().iter().all(|p| p.is_within(1024.0, 300.0)));
    }

    #[test]
    fn test_missing_surface_is_inert() {
        let host_log = Rc::new(RefCell::new(HostLog::default()));
        let host = MockHost {
            viewport: Rc::new(RefCell::new(Viewport::new(800, 600))),
            log: host_log.clone(),
            next: 0,
            limit: None,
        };
        let mut animation: AnimationLoop<MockHost, RecordingSurface> =
            AnimationLoop::mount(host, None, FieldConfig::default());

        assert_eq!(animation.state(), LoopState::Inert);
        assert!(animation.on_frame().is_none());
        assert!(animation.renderer().is_none());
        drop(animation);

        let host = host_log.borrow();
        assert!(host.requested.is_empty());
        assert!(host.cancelled.is_empty());
        assert!(!host.watching);
        assert_eq!(host.unwatch_calls, 0);
    }

    #[test]
    fn test_start_is_not_repeated() {
        let mut h = mounted(FieldConfig::default());
        h.animation.start();
        assert_eq!(h.animation.frame_count(), 1);
        assert_eq!(h.host_log.borrow().requested.len(), 1);
    }

    #[test]
    fn test_refused_frame_halts_loop() {
        let mut h = mounted_with_limit(FieldConfig::default(), Some(1));
        assert!(h.animation.is_running());

        // The frame still paints; scheduling the one after it fails.
        assert!(h.animation.on_frame().is_some());
        assert_eq!(h.animation.state(), LoopState::Halted);
        assert!(!h.animation.is_running());
        assert!(!h.animation.has_pending_frame());

        let drawn = h.draw_log.len();
        assert!(h.animation.on_frame().is_none());
        assert_eq!(h.draw_log.len(), drawn);
        assert_eq!(h.animation.frame_count(), 2);

        h.animation.unmount();
        let host = h.host_log.borrow();
        assert!(host.cancelled.is_empty());
        assert_eq!(host.unwatch_calls, 1);
        assert_eq!(h.animation.state(), LoopState::Stopped);
    }

    #[test]
    fn test_refused_first_request_halts_at_mount() {
        let h = mounted_with_limit(FieldConfig::default(), Some(0));
        assert_eq!(h.animation.state(), LoopState::Halted);
        assert!(!h.animation.is_running());
        assert_eq!(h.animation.frame_count(), 1);
        assert!(h.host_log.borrow().requested.is_empty());
    }
}
