mod clock;
pub use clock::*;

mod color;
pub use color::*;

mod config;
pub use config::*;

mod field;
pub use field::*;

mod particle;
pub use particle::*;

mod renderer;
pub use renderer::*;

mod surface;
pub use surface::*;
