//! String and symbol generators.
//!
//! Strings carry the name of the field they were generated for, so a value
//! seen in a failing assertion can be traced back to its field:
//!
//! - with a naming context: `{context}-{uuid}`
//! - without: `{uuid}`

use super::uuid::generate_uuid_v4;
use crate::random::RandomSource;
use fixture_core::{Constraints, FixtureValue};

const PADDING: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a string, embedding the naming context when there is one.
///
/// `min_length` pads with random alphanumerics and `max_length` truncates;
/// when both are set and contradict, `max_length` wins.
pub fn generate_string<R: RandomSource>(
    random: &mut R,
    context: Option<&str>,
    constraints: &Constraints,
) -> FixtureValue {
    let token = generate_uuid_v4(random).to_string();
    let mut value = match context {
        Some(name) => format!("{name}-{token}"),
        None => token,
    };

    if let Some(min) = constraints.min_length {
        let len = value.chars().count();
        for _ in len..min {
            value.push(PADDING[random.pick(PADDING.len())] as char);
        }
    }

    if let Some(max) = constraints.max_length {
        if value.chars().count() > max {
            value = value.chars().take(max).collect();
        }
    }

    FixtureValue::String(value)
}

/// Generate a unique symbol.
pub fn generate_symbol<R: RandomSource>(random: &mut R) -> FixtureValue {
    FixtureValue::Symbol(format!("symbol-{}", generate_uuid_v4(random)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;

    #[test]
    fn test_string_embeds_context() {
        let mut random = RngSource::seeded(42);
        let value = generate_string(&mut random, Some("email"), &Constraints::default());

        let s = value.as_str().expect("Expected String value");
        assert!(s.starts_with("email-"));
        assert_eq!(s.len(), 6 + 36); // "email-" + UUID
    }

    #[test]
    fn test_string_without_context_is_uuid() {
        let mut random = RngSource::seeded(42);
        let value = generate_string(&mut random, None, &Constraints::default());

        let s = value.as_str().expect("Expected String value");
        assert!(uuid::Uuid::parse_str(s).is_ok());
    }

    #[test]
    fn test_string_min_length_pads() {
        let mut random = RngSource::seeded(42);
        let constraints = Constraints {
            min_length: Some(60),
            ..Default::default()
        };
        let value = generate_string(&mut random, Some("bio"), &constraints);

        let s = value.as_str().unwrap();
        assert_eq!(s.chars().count(), 60);
        assert!(s.starts_with("bio-"));
        assert!(s[40..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_string_max_length_truncates() {
        let mut random = RngSource::seeded(42);
        let constraints = Constraints {
            max_length: Some(8),
            ..Default::default()
        };
        let value = generate_string(&mut random, Some("code"), &constraints);

        let s = value.as_str().unwrap();
        assert_eq!(s.chars().count(), 8);
        assert!(s.starts_with("code-"));
    }

    #[test]
    fn test_symbols_are_unique() {
        let mut random = RngSource::seeded(42);
        let a = generate_symbol(&mut random);
        let b = generate_symbol(&mut random);

        assert!(matches!(&a, FixtureValue::Symbol(s) if s.starts_with("symbol-")));
        assert_ne!(a, b);
    }
}
