//! Offline replay of recorded inbound frames through the router.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::BufRead;

use view::router::Effect;
use view::session::SurveyView;
use view::surface::{Navigator, ViewSurface};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub rendered: usize,
    pub dropped: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Feed every non-blank line of `reader` to `view` as one text frame.
///
/// # Errors
///
/// Returns the I/O error if reading fails; frame failures are counted, not
/// returned.
pub fn replay<R, S, N>(reader: R, view: &mut SurveyView<S, N>) -> std::io::Result<ReplaySummary>
where
    R: BufRead,
    S: ViewSurface,
    N: Navigator,
{
    let mut summary = ReplaySummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        summary.frames += 1;
        match view.handle_text(text) {
            Ok(Effect::Dropped { slide }) => {
                tracing::debug!(line = index + 1, slide, "materialIndex for unmapped slide");
                summary.dropped += 1;
            }
            Ok(Effect::Ignored) => summary.ignored += 1,
            Ok(_) => summary.rendered += 1,
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "frame failed");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
