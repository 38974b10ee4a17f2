//! Combinators: unions, discriminated unions, intersections and lazy schemas.

use crate::generator::{missing, FixtureGenerator, GenerateError};
use crate::random::RandomSource;
use fixture_core::{classify, FixtureValue, SchemaNode, TypeTag};
use tracing::warn;

impl<S: RandomSource> FixtureGenerator<S> {
    pub(crate) fn generate_union<N: SchemaNode>(
        &mut self,
        node: &N,
        context: Option<&str>,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let members = node.member_schemas();
        if members.is_empty() {
            return Err(missing(TypeTag::Union, "members"));
        }
        let member = &members[self.random.pick(members.len())];
        self.generate(member, context, depth)
    }

    /// Pick one option, generate it as an object, then pin the discriminant
    /// field to the literal that option declares for it.
    pub(crate) fn generate_discriminated_union<N: SchemaNode>(
        &mut self,
        node: &N,
        context: Option<&str>,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let tag = TypeTag::DiscriminatedUnion;
        let key = node
            .discriminant_key()
            .ok_or_else(|| missing(tag, "discriminator"))?;
        let options = node.member_schemas();
        if options.is_empty() {
            return Err(missing(tag, "options"));
        }

        let option = &options[self.random.pick(options.len())];
        let discriminant = option
            .shape()
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, field)| field)
            .and_then(declared_literal)
            .ok_or_else(|| missing(tag, "discriminant literal in option"))?
            .clone();

        match self.generate(option, context, depth)? {
            FixtureValue::Object(mut fields) => {
                fields.insert(key.to_string(), discriminant);
                Ok(FixtureValue::Object(fields))
            }
            _ => Err(missing(tag, "object option")),
        }
    }

    /// Every member is generated in order; objects merge with later fields
    /// winning, anything else replaces what came before.
    pub(crate) fn generate_intersection<N: SchemaNode>(
        &mut self,
        node: &N,
        context: Option<&str>,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let mut merged: Option<FixtureValue> = None;

        for member in node.member_schemas() {
            let value = self.generate(member, context, depth)?;
            merged = Some(match (merged, value) {
                (Some(FixtureValue::Object(mut base)), FixtureValue::Object(fields)) => {
                    base.extend(fields);
                    FixtureValue::Object(base)
                }
                (_, value) => value,
            });
        }

        merged.ok_or_else(|| missing(TypeTag::Intersection, "members"))
    }

    pub(crate) fn generate_lazy<N: SchemaNode>(
        &mut self,
        node: &N,
        context: Option<&str>,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let max_depth = self.config.max_depth;
        if depth >= max_depth {
            warn!(max_depth, "Lazy schema nesting exceeded the recursion limit");
            return Err(GenerateError::RecursionLimit { depth: max_depth });
        }

        let resolved = node
            .lazy_resolve()
            .ok_or_else(|| missing(TypeTag::Lazy, "resolvable target"))?;
        self.generate(&resolved, context, depth + 1)
    }
}

/// The literal a field declares, looking through wrappers.
fn declared_literal<N: SchemaNode>(field: &N) -> Option<&FixtureValue> {
    let mut current = field;
    loop {
        match classify(current).ok()? {
            TypeTag::Literal => return current.literal_value(),
            tag if tag.is_wrapper() => current = current.inner_schema()?,
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::toggle::BoolToggle;
    use fixture_core::Schema;
    use std::collections::VecDeque;

    fn generator() -> FixtureGenerator {
        FixtureGenerator::seeded(42)
    }

    /// Replays scripted picks; bounded draws return their lower bound.
    struct ScriptedSource {
        picks: VecDeque<usize>,
    }

    impl ScriptedSource {
        fn new(picks: impl IntoIterator<Item = usize>) -> Self {
            Self {
                picks: picks.into_iter().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn pick(&mut self, len: usize) -> usize {
            self.picks.pop_front().unwrap_or(0) % len
        }

        fn int_between(&mut self, min: i64, _max: i64) -> i64 {
            min
        }

        fn float_between(&mut self, min: f64, _max: f64) -> f64 {
            min
        }

        fn fill_bytes(&mut self, bytes: &mut [u8]) {
            bytes.fill(7);
        }
    }

    fn pets() -> Schema {
        Schema::discriminated_union(
            "type",
            [
                Schema::object([
                    ("type", Schema::literal("a")),
                    ("a", Schema::string()),
                ]),
                Schema::object([
                    ("type", Schema::literal("b").readonly()),
                    ("b", Schema::number()),
                ]),
            ],
        )
    }

    #[test]
    fn test_union_picks_a_member() {
        let mut generator = generator();
        let schema = Schema::string().or(Schema::number());

        for _ in 0..20 {
            let value = generator.create(&schema).unwrap();
            assert!(value.as_str().is_some() || value.as_f64().is_some());
        }
    }

    #[test]
    fn test_union_passes_context_through() {
        let mut generator = FixtureGenerator::with_source(
            GeneratorConfig::default(),
            ScriptedSource::new([0]),
        )
        .with_toggle(BoolToggle::new());
        let schema = Schema::object([("label", Schema::string().or(Schema::number()))]);

        let value = generator.create(&schema).unwrap();
        assert!(value.get("label").unwrap().as_str().unwrap().starts_with("label-"));
    }

    #[test]
    fn test_discriminated_union_matches_chosen_option() {
        for (pick, discriminant, field) in [(0, "a", "a"), (1, "b", "b")] {
            let mut generator = FixtureGenerator::with_source(
                GeneratorConfig::default(),
                ScriptedSource::new([pick]),
            );
            let value = generator.create(&pets()).unwrap();
            let fields = value.as_object().expect("Expected Object value");

            assert_eq!(fields.len(), 2);
            assert_eq!(fields["type"], FixtureValue::from(discriminant));
            assert!(fields.contains_key(field));
        }
    }

    #[test]
    fn test_discriminated_union_random_options() {
        let mut generator = generator();

        for _ in 0..20 {
            let value = generator.create(&pets()).unwrap();
            match value.get("type").and_then(FixtureValue::as_str) {
                Some("a") => assert!(value.get("a").unwrap().as_str().is_some()),
                Some("b") => assert!(value.get("b").unwrap().as_f64().is_some()),
                other => panic!("unexpected discriminant {other:?}"),
            }
        }
    }

    #[test]
    fn test_discriminated_union_option_without_literal() {
        let mut generator = generator();
        let schema = Schema::discriminated_union(
            "type",
            [Schema::object([("type", Schema::string())])],
        );

        let err = generator.create(&schema).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MissingDefinition {
                tag: TypeTag::DiscriminatedUnion,
                ..
            }
        ));
    }

    #[test]
    fn test_intersection_merges_objects() {
        let mut generator = generator();
        let schema = Schema::object([("id", Schema::string()), ("shared", Schema::string())])
            .and(Schema::object([("age", Schema::number()), ("shared", Schema::number())]));

        let value = generator.create(&schema).unwrap();
        let fields = value.as_object().unwrap();

        assert_eq!(fields.len(), 3);
        assert!(fields["id"].as_str().is_some());
        assert!(fields["age"].as_f64().is_some());
        assert!(fields["shared"].as_f64().is_some());
    }

    #[test]
    fn test_intersection_of_scalars_keeps_last() {
        let mut generator = generator();
        let schema = Schema::string().and(Schema::literal(5.0));

        assert_eq!(generator.create(&schema).unwrap(), FixtureValue::Number(5.0));
    }

    #[test]
    fn test_lazy_resolves_target() {
        let mut generator = generator();
        let schema = Schema::object([("inner", Schema::lazy(Schema::string))]);

        let value = generator.create(&schema).unwrap();
        assert!(value.get("inner").unwrap().as_str().unwrap().starts_with("inner-"));
    }

    #[test]
    fn test_recursive_schema_hits_recursion_limit() {
        fn category() -> Schema {
            Schema::object([
                ("name", Schema::string()),
                ("subcategories", Schema::array(Schema::lazy(category))),
            ])
        }

        let mut generator = FixtureGenerator::new(
            GeneratorConfig::default().with_seed(42).with_max_depth(4),
        );
        let err = generator.create(&category()).unwrap_err();

        assert!(matches!(err, GenerateError::RecursionLimit { depth: 4 }));
    }

    #[test]
    fn test_nested_lazy_within_limit() {
        let mut generator = FixtureGenerator::new(
            GeneratorConfig::default().with_seed(42).with_max_depth(2),
        );
        let schema = Schema::lazy(|| Schema::lazy(Schema::number));

        assert!(generator.create(&schema).unwrap().as_f64().is_some());
    }
}
