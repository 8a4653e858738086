//! Outbound helpers wired to UI controls.
//!
//! Each helper produces the frames for one control and hands them to the
//! [`Outbox`]. None of them validate anything beyond the integer parse of a
//! Likert answer.

#[cfg(test)]
#[path = "outbound_test.rs"]
mod outbound_test;

use messages::Outbound;

use crate::config::ViewConfig;
use crate::transport::{Outbox, SendError};

/// Read access to the page's named radio groups.
pub trait RadioGroups {
    /// Values of the checked options in `group`, in document order.
    fn checked_values(&self, group: &str) -> Vec<String>;
}

/// Parse an option value the way `parseInt(value, 10)` does.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits; trailing text is ignored. `None` when no digit leads.
pub fn parse_likert_value(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let Ok(magnitude) = rest[..digits_len].parse::<i64>() else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Likert frames for the given groups; unanswered groups contribute none.
pub fn likert_messages<S: AsRef<str>>(groups: &[S], radios: &impl RadioGroups) -> Vec<Outbound> {
    let mut out = Vec::new();
    for group in groups {
        let name = group.as_ref();
        for raw in radios.checked_values(name) {
            match parse_likert_value(&raw) {
                Some(value) => out.push(Outbound::Likert { name: name.to_owned(), value }),
                None => log::warn!("likert group '{name}' has non-numeric value '{raw}', skipped"),
            }
        }
    }
    out
}

/// # Errors
///
/// Returns the [`SendError`] of the outbox.
pub fn send_begin(outbox: &Outbox) -> Result<(), SendError> {
    outbox.send(&Outbound::Begin)
}

/// # Errors
///
/// Returns the [`SendError`] of the outbox.
pub fn send_consent(outbox: &Outbox) -> Result<(), SendError> {
    outbox.send(&Outbound::Consent)
}

/// Submit one or more Likert groups; returns how many frames were sent.
///
/// # Errors
///
/// Stops at the first [`SendError`].
pub fn submit_radios<S: AsRef<str>>(outbox: &Outbox, groups: &[S], radios: &impl RadioGroups) -> Result<usize, SendError> {
    let messages = likert_messages(groups, radios);
    for message in &messages {
        outbox.send(message)?;
    }
    Ok(messages.len())
}

/// Report a deck move when the config asks for it; returns whether a frame went out.
///
/// # Errors
///
/// Returns the [`SendError`] of the outbox.
pub fn report_slide_change(outbox: &Outbox, config: &ViewConfig, index: u32) -> Result<bool, SendError> {
    if !config.report_slide_changes {
        return Ok(false);
    }
    outbox.send(&Outbound::SlideChange { value: index })?;
    Ok(true)
}
