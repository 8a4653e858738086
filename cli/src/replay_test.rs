use view::config::ViewConfig;

use super::*;
use crate::terminal::{TerminalNavigator, TerminalSurface};

fn view() -> SurveyView<TerminalSurface<Vec<u8>>, TerminalNavigator<Vec<u8>>> {
    SurveyView::new(&ViewConfig::default(), TerminalSurface::new(Vec::new()), TerminalNavigator::new(Vec::new()))
}

#[test]
fn replay_counts_each_outcome() {
    let recording = "\
{\"type\":\"goto\",\"slide\":1}
{\"type\":\"consentID\",\"id\":\"17\"}

{\"type\":\"materialIndex\",\"slide\":9,\"value\":2}
{\"type\":\"ping\"}
{\"type\":\"press\",\"circle\":1}
not json
{\"type\":\"press\",\"circle\":20,\"ring\":40}
";
    let mut view = view();
    let summary = replay(recording.as_bytes(), &mut view).expect("replay");
    assert_eq!(
        summary,
        ReplaySummary { frames: 7, rendered: 3, dropped: 1, ignored: 1, failed: 2 }
    );

    let surface = std::str::from_utf8(view.surface().output()).expect("utf8");
    assert_eq!(surface.lines().count(), 2);
    let navigator = std::str::from_utf8(view.navigator().output()).expect("utf8");
    assert_eq!(navigator.lines().count(), 1);
}

#[test]
fn replay_of_empty_input_is_empty() {
    let mut view = view();
    let summary = replay("\n\n".as_bytes(), &mut view).expect("replay");
    assert_eq!(summary, ReplaySummary::default());
}
