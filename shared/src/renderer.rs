use crate::{FrameClock, ParticleField, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Detached,
}

#[derive(Debug)]
pub enum RenderError<D, C> {
    Draw(D),
    Schedule(C),
}

/// Drives a [`ParticleField`] from a [`FrameClock`], keeping exactly one frame in flight.
pub struct Renderer<C: FrameClock> {
    field: ParticleField,
    clock: C,
    pending: Option<C::Handle>,
    phase: Phase,
    frames: u64,
}

impl<C: FrameClock> Renderer<C> {
    pub fn new(field: ParticleField, clock: C) -> Renderer<C> {
        Renderer {
            field,
            clock,
            pending: None,
            phase: Phase::Idle,
            frames: 0,
        }
    }

    /// Draws the first frame right away and schedules the next one.
    pub fn start<S: Surface>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), RenderError<S::Error, C::Error>> {
        if self.phase != Phase::Idle {
            return Ok(());
        }

        self.phase = Phase::Running;
        self.step(surface)
    }

    /// Runs the frame scheduled under `handle`. Stale or post-detach callbacks do nothing.
    pub fn frame<S: Surface>(
        &mut self,
        handle: C::Handle,
        surface: &mut S,
    ) -> Result<(), RenderError<S::Error, C::Error>> {
        if self.phase != Phase::Running || self.pending != Some(handle) {
            log::debug!("ignoring frame {:?}", handle);
            return Ok(());
        }

        self.pending = None;
        self.step(surface)
    }

    fn step<S: Surface>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), RenderError<S::Error, C::Error>> {
        self.field.tick(surface).map_err(RenderError::Draw)?;
        self.frames += 1;

        let handle = self.clock.request().map_err(RenderError::Schedule)?;
        self.pending = Some(handle);

        Ok(())
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.phase == Phase::Running && self.field.pointer_moved(x, y, now_ms)
    }

    pub fn resized(&mut self, width: f64, height: f64) {
        if self.phase == Phase::Running {
            self.field.resize(width, height);
        }
    }

    /// Cancels the pending frame and stops reacting to events. Returns `false` if already detached.
    pub fn detach(&mut self) -> bool {
        if self.phase == Phase::Detached {
            return false;
        }

        if let Some(handle) = self.pending.take() {
            self.clock.cancel(handle);
        }

        self.phase = Phase::Detached;
        log::debug!("detached after {} frames", self.frames);

        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<C::Handle> {
        self.pending
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
