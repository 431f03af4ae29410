use std::fmt;

/// Breakdown of an elapsed-time value into display units.
///
/// Every field is derived from the same millisecond value by floor
/// division. The plain fields are windowed to their natural modulus
/// (milliseconds to 0..=999, seconds and minutes to 0..=59, hours to
/// 0..=23); the `*_total` fields are cumulative. Days have no natural
/// bound, so `days` and `days_total` are equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub milliseconds: u64,
    pub milliseconds_total: u64,
    pub hundredths: u64,
    pub hundredths_total: u64,
    pub tenths: u64,
    pub tenths_total: u64,
    pub seconds: u64,
    pub seconds_total: u64,
    pub minutes: u64,
    pub minutes_total: u64,
    pub hours: u64,
    pub hours_total: u64,
    pub days: u64,
    pub days_total: u64,
}

impl TimeParts {
    /// Break a millisecond value down into display units.
    ///
    /// Negative input clamps to zero; a running timer never reports a
    /// negative elapsed value because completion clamps first.
    pub fn from_millis(current_ms: i64) -> Self {
        let t = current_ms.max(0) as u64;
        Self {
            milliseconds: t % 1000,
            milliseconds_total: t,
            hundredths: (t % 1000) / 10,
            hundredths_total: t / 10,
            tenths: (t % 1000) / 100,
            tenths_total: t / 100,
            seconds: (t / 1000) % 60,
            seconds_total: t / 1000,
            minutes: (t / 60_000) % 60,
            minutes_total: t / 60_000,
            hours: (t / 3_600_000) % 24,
            hours_total: t / 3_600_000,
            days: t / 86_400_000,
            days_total: t / 86_400_000,
        }
    }
}

/// Pad a value against a literal template, for display formatting.
///
/// With `pad_left` the value is aligned to the template's right edge,
/// otherwise to its left; either way the result is exactly as wide as the
/// template. A `None` value returns the template unchanged.
///
/// ```
/// use interval_timer::pad;
///
/// assert_eq!(pad("00", Some(5), true), "05");
/// assert_eq!(pad("00", Some(5), false), "50");
/// assert_eq!(pad::<u64>("00", None, true), "00");
/// ```
pub fn pad<T: fmt::Display>(template: &str, value: Option<T>, pad_left: bool) -> String {
    let Some(value) = value else {
        return template.to_string();
    };
    let value = value.to_string();
    let width = template.chars().count();
    if pad_left {
        let combined: Vec<char> = format!("{template}{value}").chars().collect();
        combined[combined.len() - width..].iter().collect()
    } else {
        format!("{value}{template}").chars().take(width).collect()
    }
}
