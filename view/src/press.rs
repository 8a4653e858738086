//! Press indicator: a filled circle that tracks the participant's press and a
//! stroked ring marking the target.
//!
//! Every redraw starts with a full clear, so the canvas only ever shows the
//! latest pair of radii.

#[cfg(test)]
#[path = "press_test.rs"]
mod press_test;

use crate::config::PressStyle;
use crate::error::ViewError;

/// One drawing step on the press canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    Clear { width: f64, height: f64 },
    FillCircle { x: f64, y: f64, radius: f64, color: String },
    StrokeRing { x: f64, y: f64, radius: f64, width: f64 },
}

/// Something that can execute [`PaintOp`]s.
pub trait Painter {
    /// # Errors
    ///
    /// Returns `Err` if the underlying canvas call fails.
    fn apply(&mut self, op: &PaintOp) -> Result<(), ViewError>;
}

/// Negative and non-finite radii collapse to zero; canvas arcs reject them.
fn sanitize_radius(radius: f64) -> f64 {
    if radius.is_finite() { radius.max(0.0) } else { 0.0 }
}

/// The three operations that redraw the indicator.
pub fn press_ops(style: &PressStyle, circle: f64, ring: f64) -> [PaintOp; 3] {
    let (x, y) = style.center();
    [
        PaintOp::Clear { width: style.size, height: style.size },
        PaintOp::FillCircle { x, y, radius: sanitize_radius(circle), color: style.fill.clone() },
        PaintOp::StrokeRing { x, y, radius: sanitize_radius(ring), width: style.ring_width },
    ]
}

/// Clear the canvas and draw circle and ring.
///
/// # Errors
///
/// Propagates the first failing [`Painter::apply`].
pub fn paint_press(painter: &mut impl Painter, style: &PressStyle, circle: f64, ring: f64) -> Result<(), ViewError> {
    for op in press_ops(style, circle, ring) {
        painter.apply(&op)?;
    }
    Ok(())
}
