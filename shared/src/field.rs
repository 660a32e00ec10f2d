use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{ConfigError, FieldConfig, Particle, Rgb, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
}

/// Fixed pool of background particles plus the pointer trail, sized to one canvas.
pub struct ParticleField {
    config: FieldConfig,
    background: Box<[Particle]>,
    transient: Vec<Particle>,
    hue_frame: u32,
    last_spawn: Option<f64>,
    width: f64,
    height: f64,
    rng: ChaCha8Rng,
}

impl ParticleField {
    pub fn new(
        config: FieldConfig,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<ParticleField, ConfigError> {
        config.validate()?;

        let mut field = ParticleField {
            background: Box::default(),
            transient: Vec::new(),
            hue_frame: 0,
            last_spawn: None,
            width,
            height,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        };

        let background: Box<[Particle]> = (0..field.config.background_count)
            .map(|_| field.spawn_background())
            .collect();
        field.background = background;

        log::debug!(
            "seeded {} background particles on {}x{}",
            field.background.len(),
            width,
            height
        );

        Ok(field)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn spawn_background(&mut self) -> Particle {
        let edge = if self.rng.gen_bool(0.5) {
            Edge::Top
        } else {
            Edge::Left
        };

        self.spawn_background_from(edge)
    }

    pub fn spawn_background_from(&mut self, edge: Edge) -> Particle {
        let margin = self.config.spawn_margin;

        // Scaled unit samples, so a zero-sized canvas still spawns at its origin.
        let position = match edge {
            Edge::Top => (self.rng.gen::<f64>() * self.width, -margin),
            Edge::Left => (
                -margin,
                self.rng.gen::<f64>() * self.height * self.config.spawn_band,
            ),
        };

        Particle::random(&mut self.rng, &self.config, position, self.config.color)
    }

    /// Spawns a rainbow particle at the pointer unless the last one is more recent than the spawn interval.
    pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        if let Some(last) = self.last_spawn {
            if now_ms - last < self.config.spawn_interval_ms {
                return false;
            }
        }

        let color = Rgb::from_hue(self.hue());
        let particle = Particle::random(&mut self.rng, &self.config, (x, y), color);

        log::trace!("pointer particle at ({x}, {y}) in {color}");

        self.transient.push(particle);
        self.last_spawn = Some(now_ms);

        true
    }

    /// Clears the surface, advances the hue and moves, draws and culls every particle.
    ///
    /// Pointer particles are walked before background ones, both last to first, which keeps the
    /// draw order of a single list with the pointer particles appended after the pool.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.width, self.height)?;

        self.hue_frame = (self.hue_frame + 1) % self.config.hue_cycle_frames;

        for i in (0..self.transient.len()).rev() {
            let particle = &mut self.transient[i];

            particle.advance();
            particle.draw(surface)?;

            if particle.is_off_screen(self.width, self.height) {
                self.transient.remove(i);
            }
        }

        for i in (0..self.background.len()).rev() {
            let off_screen = {
                let particle = &mut self.background[i];

                particle.advance();
                particle.draw(surface)?;
                particle.is_off_screen(self.width, self.height)
            };

            if off_screen {
                self.background[i] = self.spawn_background();
            }
        }

        Ok(())
    }

    pub fn background(&self) -> &[Particle] {
        &self.background
    }

    pub fn transient(&self) -> &[Particle] {
        &self.transient
    }

    pub fn len(&self) -> usize {
        self.background.len() + self.transient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hue(&self) -> f64 {
        self.config.hue_at(self.hue_frame)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
