//! Term/week arithmetic over epoch days.
//!
//! All date math works on integer day counts since the Unix epoch; no
//! calendar structures are involved. Week boundaries are Mondays.

const DAYS_IN_WEEK: i64 = 7;

/// Earliest supported epoch day.
pub const MIN_DATE: i64 = 0;

/// Latest supported epoch day (9999-12-31).
pub const MAX_DATE: i64 = 2_932_896;

/// Day of week in `0..=6` for a day count since the Unix epoch, with 0 being
/// Monday. Day 0 (1970-01-01) is a Thursday, hence the fixed +3 offset.
#[inline]
pub fn day_of_week(epoch_day: i64) -> i64 {
    (epoch_day + 3).rem_euclid(DAYS_IN_WEEK)
}

/// Week count assuming `0 <= start <= end`.
///
/// Equivalent to aligning both dates down to their week's Monday and counting
/// the boundaries spanned inclusively:
///
/// ```text
/// d1 = start - day_of_week(start)      // Monday of start's week
/// d2 = end + 6 - day_of_week(end)      // Sunday of end's week
/// 1 + (d2 - d1) / 7
/// ```
fn week_count_ordered(start: i64, end: i64) -> i64 {
    debug_assert!(start >= 0, "start date must be non-negative: {start}");
    debug_assert!(end >= 0, "end date must be non-negative: {end}");
    debug_assert!(start <= end, "start {start} must not exceed end {end}");
    1 + ((end - day_of_week(end)) - (start - day_of_week(start)) + (DAYS_IN_WEEK - 1))
        / DAYS_IN_WEEK
}

/// Signed number of Monday-aligned week boundaries spanned between `start`
/// and `end`, inclusive.
///
/// Two days in the same Monday-aligned week count as 1. When `start > end`
/// the result is the negation of `week_count(end, start)`.
pub fn week_count(start: i64, end: i64) -> i64 {
    if start <= end {
        week_count_ordered(start, end)
    } else {
        -week_count_ordered(end, start)
    }
}

/// Whether `now` falls in an "even" display week relative to a term starting
/// at `start`.
///
/// True exactly when [`week_count`] is odd: week 1 of the term shows the
/// "even" variant. Deployed data files assume this inversion; changing it
/// would flip every existing timetable.
pub fn is_even(start: i64, now: i64) -> bool {
    week_count(start, now) % 2 != 0
}

/// Current wall-clock epoch day, clamped into `[MIN_DATE, MAX_DATE]`.
///
/// An out-of-range system clock degrades to the nearest supported day rather
/// than failing.
pub fn today() -> i64 {
    let day = chrono::Utc::now().timestamp().div_euclid(24 * 60 * 60);
    day.clamp(MIN_DATE, MAX_DATE)
}
