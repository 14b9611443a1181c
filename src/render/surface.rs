//! Drawing surface trait for pluggable render targets.
//!
//! The host shell (print device, preview canvas) implements this trait and
//! owns the surface's lifetime; the engine only issues drawing calls. A
//! recording implementation used by the integration tests lives in `tests/`.

use crate::chart::Rgb;
use crate::styles::FontSpec;

/// Abstract drawing surface in page units.
pub trait DrawSurface {
    /// Measure rendered text; returns (width, height).
    fn measure_text(&self, text: &str, font: &FontSpec) -> (f32, f32);

    /// Draw text with its top-left corner at (x, y).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &FontSpec);

    /// Draw a straight line of the given width.
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32);

    /// Fill a rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);

    /// Fill a pie slice inside the bounding box (x, y, w, h), sweeping
    /// `sweep_deg` degrees clockwise from `start_deg`.
    #[allow(clippy::too_many_arguments)]
    fn fill_pie_slice(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        start_deg: i32,
        sweep_deg: i32,
        color: Rgb,
    );
}
