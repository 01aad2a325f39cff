//! Hour formatting for report sentences.

use rust_decimal::{Decimal, RoundingStrategy};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Formats a minute count as hours with at most one decimal.
///
/// The value is rounded half away from zero at one decimal place and the
/// decimal is dropped when the result is whole.
///
/// # Examples
///
/// ```
/// use ggd_compliance::analysis::minutes_to_hours_str;
///
/// assert_eq!(minutes_to_hours_str(60), "1");
/// assert_eq!(minutes_to_hours_str(90), "1.5");
/// assert_eq!(minutes_to_hours_str(45), "0.8");
/// ```
pub fn minutes_to_hours_str(minutes: u32) -> String {
    let hours = Decimal::from(minutes) / MINUTES_PER_HOUR;
    hours
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
