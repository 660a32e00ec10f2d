use std::f64::consts::FRAC_PI_4;

use rand::Rng;

use crate::{FieldConfig, Rgb, Surface};

/// Heading shared by every particle: straight down-right.
pub const HEADING: f64 = FRAC_PI_4;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: (f64, f64),
    size: f64,
    speed: f64,
    angle: f64,
    opacity: f64,
    color: Rgb,
    tail_length: f64,
}

impl Particle {
    pub fn new(
        position: (f64, f64),
        size: f64,
        speed: f64,
        opacity: f64,
        color: Rgb,
        tail_length: f64,
    ) -> Particle {
        Particle {
            position,
            size,
            speed,
            angle: HEADING,
            opacity,
            color,
            tail_length,
        }
    }

    /// Builds a particle at `position` with size, speed and opacity drawn from the configured ranges.
    pub fn random<R: Rng>(
        rng: &mut R,
        config: &FieldConfig,
        position: (f64, f64),
        color: Rgb,
    ) -> Particle {
        Particle::new(
            position,
            rng.gen_range(config.size.min..config.size.max),
            rng.gen_range(config.speed.min..config.speed.max),
            rng.gen_range(config.opacity.min..config.opacity.max),
            color,
            config.tail_length,
        )
    }

    pub fn advance(&mut self) {
        self.position.0 += self.angle.cos() * self.speed;
        self.position.1 += self.angle.sin() * self.speed;
    }

    pub fn tail(&self) -> (f64, f64) {
        (
            self.position.0 - self.tail_length * self.angle.cos(),
            self.position.1 - self.tail_length * self.angle.sin(),
        )
    }

    /// Only the right and bottom edges count, since particles only ever travel down-right.
    pub fn is_off_screen(&self, width: f64, height: f64) -> bool {
        self.position.0 > width + self.tail_length || self.position.1 > height + self.tail_length
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.stroke_trail(self.position, self.tail(), self.size, self.color, self.opacity)?;
        surface.fill_head(self.position, self.size / 2.0, self.color, self.opacity)?;

        Ok(())
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn tail_length(&self) -> f64 {
        self.tail_length
    }
}
