//! Wall-clock time helpers.
//!
//! Times are plain `"H:MM"` / `"HH:MM"` strings. There is no
//! timezone handling; parsing is purely lexical.

/// Parses `"H:MM"` or `"HH:MM"` into minutes since midnight.
///
/// The result is `hours * 60 + minutes` with no upper bound on the hour,
/// so `"24:15"` or `"25:00"` from a slice running past midnight still
/// parse. Each part must be one or two digits and the minutes must be
/// below 60. A trailing `":SS"` part is accepted and ignored. Empty or
/// malformed input yields `None`.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::time_to_minutes;
///
/// assert_eq!(time_to_minutes("09:15"), Some(555));
/// assert_eq!(time_to_minutes("7:05"), Some(425));
/// assert_eq!(time_to_minutes(""), None);
/// assert_eq!(time_to_minutes("nine"), None);
/// ```
pub fn time_to_minutes(hhmm: &str) -> Option<u32> {
    let mut parts = hhmm.trim().split(':');
    let hours = parse_component(parts.next()?)?;
    let minutes = parse_component(parts.next()?)?;
    if let Some(seconds) = parts.next() {
        parse_component(seconds)?;
    }
    if parts.next().is_some() || minutes >= 60 {
        return None;
    }

    Some(hours * 60 + minutes)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::minutes_to_time;
///
/// assert_eq!(minutes_to_time(555), "09:15");
/// assert_eq!(minutes_to_time(0), "00:00");
/// ```
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
