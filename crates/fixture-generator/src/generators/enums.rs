//! Literal-set generators: enums and native enums.

use crate::random::RandomSource;
use fixture_core::FixtureValue;

/// Pick one declared enum value, or `None` when there are none.
pub fn pick_enum_value<R: RandomSource>(
    random: &mut R,
    values: &[FixtureValue],
) -> Option<FixtureValue> {
    if values.is_empty() {
        return None;
    }
    Some(values[random.pick(values.len())].clone())
}

/// Values of the forward-declared members of a native enum.
///
/// Numeric enum encodings add a reverse-index entry `"0" -> "Apple"` for every
/// `Apple -> 0`; those entries are not members and are skipped.
pub fn forward_members(entries: &[(String, FixtureValue)]) -> Vec<&FixtureValue> {
    entries
        .iter()
        .filter(|(key, value)| !is_reverse_entry(key, value, entries))
        .map(|(_, value)| value)
        .collect()
}

/// Pick one forward-declared member value of a native enum.
pub fn pick_native_enum_value<R: RandomSource>(
    random: &mut R,
    entries: &[(String, FixtureValue)],
) -> Option<FixtureValue> {
    let members = forward_members(entries);
    if members.is_empty() {
        return None;
    }
    Some(members[random.pick(members.len())].clone())
}

fn is_reverse_entry(key: &str, value: &FixtureValue, entries: &[(String, FixtureValue)]) -> bool {
    let Some(target) = value.as_str() else {
        return false;
    };
    let Ok(number) = key.parse::<f64>() else {
        return false;
    };
    entries
        .iter()
        .any(|(name, v)| name == target && v.as_f64() == Some(number))
}
