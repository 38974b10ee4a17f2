//! Numeric value generators.

use crate::random::RandomSource;
use fixture_core::{Constraints, FixtureValue};

/// Largest integer a double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Generate a number.
///
/// Without bounds the draw is an integer in `[default_min, default_max]`.
/// Declared bounds replace the defaults; a one-sided bound keeps the default
/// width on the open side, and a non-finite bound counts as open. Integral
/// bounds (or an `int` constraint) give an integer draw, anything else a
/// float draw. An `int` range holding no integer yields the integer just
/// above `min`.
pub fn generate_number<R: RandomSource>(
    random: &mut R,
    constraints: &Constraints,
    default_min: f64,
    default_max: f64,
) -> FixtureValue {
    let span = default_max - default_min;
    let declared_min = constraints.min.filter(|v| v.is_finite());
    let declared_max = constraints.max.filter(|v| v.is_finite());
    let (min, max) = match (declared_min, declared_max) {
        (Some(lo), Some(hi)) => (lo, hi.max(lo)),
        (Some(lo), None) if default_max >= lo => (lo, default_max),
        (Some(lo), None) => (lo, lo + span),
        (None, Some(hi)) if default_min <= hi => (default_min, hi),
        (None, Some(hi)) => (hi - span, hi),
        (None, None) => (default_min, default_max),
    };

    let integral = constraints.int || (min.fract() == 0.0 && max.fract() == 0.0);
    if integral {
        let lo = min.ceil() as i64;
        let hi = max.floor() as i64;
        if lo > hi {
            return FixtureValue::Number(lo as f64);
        }
        FixtureValue::Number(random.int_between(lo, hi) as f64)
    } else {
        FixtureValue::Number(random.float_between(min, max))
    }
}

/// Generate a bigint in `[1, MAX_SAFE_INTEGER]`.
pub fn generate_bigint<R: RandomSource>(random: &mut R) -> FixtureValue {
    FixtureValue::BigInt(random.int_between(1, MAX_SAFE_INTEGER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;

    fn bounds(min: Option<f64>, max: Option<f64>, int: bool) -> Constraints {
        Constraints {
            min,
            max,
            int,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_range_is_integral() {
        let mut random = RngSource::seeded(42);

        for _ in 0..200 {
            let n = generate_number(&mut random, &Constraints::default(), 1.0, 500.0)
                .as_f64()
                .expect("Expected Number value");
            assert!((1.0..=500.0).contains(&n));
            assert_eq!(n.fract(), 0.0);
        }
    }

    #[test]
    fn test_declared_bounds() {
        let mut random = RngSource::seeded(42);
        let constraints = bounds(Some(10.0), Some(20.0), false);

        for _ in 0..100 {
            let n = generate_number(&mut random, &constraints, 1.0, 500.0)
                .as_f64()
                .unwrap();
            assert!((10.0..=20.0).contains(&n));
        }
    }

    #[test]
    fn test_fractional_bounds_draw_floats() {
        let mut random = RngSource::seeded(42);
        let constraints = bounds(Some(0.25), Some(0.75), false);

        let n = generate_number(&mut random, &constraints, 1.0, 500.0)
            .as_f64()
            .unwrap();
        assert!((0.25..=0.75).contains(&n));
    }

    #[test]
    fn test_int_constraint_with_fractional_bounds() {
        let mut random = RngSource::seeded(42);
        let constraints = bounds(Some(0.5), Some(3.5), true);

        for _ in 0..50 {
            let n = generate_number(&mut random, &constraints, 1.0, 500.0)
                .as_f64()
                .unwrap();
            assert!((1.0..=3.0).contains(&n));
            assert_eq!(n.fract(), 0.0);
        }
    }

    #[test]
    fn test_int_constraint_without_integer_in_range() {
        let mut random = RngSource::seeded(42);
        let constraints = bounds(Some(0.5), Some(0.7), true);

        let n = generate_number(&mut random, &constraints, 1.0, 500.0)
            .as_f64()
            .unwrap();
        assert_eq!(n, 1.0);
    }

    #[test]
    fn test_infinite_bounds_are_open() {
        let mut random = RngSource::seeded(42);

        for constraints in [
            bounds(None, Some(f64::INFINITY), false),
            bounds(Some(f64::NEG_INFINITY), None, false),
            bounds(Some(f64::NEG_INFINITY), Some(f64::INFINITY), false),
            bounds(Some(f64::NAN), None, true),
        ] {
            let n = generate_number(&mut random, &constraints, 1.0, 500.0)
                .as_f64()
                .unwrap();
            assert!((1.0..=500.0).contains(&n), "{constraints:?} gave {n}");
            assert_eq!(n.fract(), 0.0);
        }

        let below = generate_number(
            &mut random,
            &bounds(Some(f64::NEG_INFINITY), Some(-10.0), false),
            1.0,
            500.0,
        )
        .as_f64()
        .unwrap();
        assert!((-509.0..=-10.0).contains(&below));
    }

    #[test]
    fn test_one_sided_bounds() {
        let mut random = RngSource::seeded(42);

        let above = generate_number(&mut random, &bounds(Some(1000.0), None, false), 1.0, 500.0)
            .as_f64()
            .unwrap();
        assert!((1000.0..=1499.0).contains(&above));

        let below = generate_number(&mut random, &bounds(None, Some(-10.0), false), 1.0, 500.0)
            .as_f64()
            .unwrap();
        assert!((-509.0..=-10.0).contains(&below));
    }

    #[test]
    fn test_bigint_range() {
        let mut random = RngSource::seeded(42);

        for _ in 0..100 {
            let n = generate_bigint(&mut random)
                .as_bigint()
                .expect("Expected BigInt value");
            assert!((1..=MAX_SAFE_INTEGER).contains(&n));
        }
    }
}
