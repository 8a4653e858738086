//! Line-oriented render targets: each mutation becomes one line of output.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::Write;

use view::ViewError;
use view::surface::{Navigator, TextSlot, ViewSurface};

fn render_error(err: std::io::Error) -> ViewError {
    ViewError::Render(err.to_string())
}

pub struct TerminalSurface<W> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> ViewSurface for TerminalSurface<W> {
    fn set_text(&mut self, slot: TextSlot, text: &str) -> Result<(), ViewError> {
        writeln!(self.out, "{:<21} {text}", slot.label()).map_err(render_error)
    }

    fn draw_press(&mut self, circle: f64, ring: f64) -> Result<(), ViewError> {
        let bar = press_bar(circle, ring);
        writeln!(self.out, "{:<21} circle={circle:.1} ring={ring:.1} {bar}", "press").map_err(render_error)
    }
}

pub struct TerminalNavigator<W> {
    out: W,
}

impl<W: Write> TerminalNavigator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Navigator for TerminalNavigator<W> {
    fn goto_slide(&mut self, index: u32) -> Result<(), ViewError> {
        writeln!(self.out, "{:<21} {index}", "goto").map_err(render_error)
    }
}

/// One-line gauge: `#` up to the circle, `|` at the ring, one cell per 5px.
pub fn press_bar(circle: f64, ring: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cells = |radius: f64| if radius.is_finite() { (radius.max(0.0) / 5.0).round() as usize } else { 0 };
    let (fill, mark) = (cells(circle), cells(ring));
    let width = fill.max(mark + 1);
    (0..width)
        .map(|i| {
            if i == mark {
                '|'
            } else if i < fill {
                '#'
            } else {
                '.'
            }
        })
        .collect()
}
