use crate::Rgb;

/// 2D drawing target for a single frame.
pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Strokes a line from `head` to `tail`, fading from `color` at `opacity` to fully transparent.
    fn stroke_trail(
        &mut self,
        head: (f64, f64),
        tail: (f64, f64),
        line_width: f64,
        color: Rgb,
        opacity: f64,
    ) -> Result<(), Self::Error>;

    fn fill_head(
        &mut self,
        center: (f64, f64),
        radius: f64,
        color: Rgb,
        opacity: f64,
    ) -> Result<(), Self::Error>;
}
