//! Date generator.

use crate::random::RandomSource;
use chrono::{DateTime, Duration, Utc};
use fixture_core::FixtureValue;

/// Generate a timestamp within `spread_days` either side of `now`, at
/// millisecond resolution.
///
/// A spread chrono cannot represent collapses to zero, and an offset landing
/// outside chrono's date range falls back to `now`.
pub fn generate_date<R: RandomSource>(
    random: &mut R,
    now: DateTime<Utc>,
    spread_days: i64,
) -> FixtureValue {
    let spread_ms = Duration::try_days(spread_days)
        .map(|spread| spread.num_milliseconds().abs())
        .unwrap_or(0);
    let offset = random.int_between(-spread_ms, spread_ms);
    let date = now
        .checked_add_signed(Duration::milliseconds(offset))
        .unwrap_or(now);
    FixtureValue::Date(date)
}
