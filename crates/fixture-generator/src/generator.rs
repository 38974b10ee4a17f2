//! Fixture generator: the recursive dispatcher behind `create`.

use crate::config::GeneratorConfig;
use crate::generators::{enums, numeric, text, timestamp};
use crate::random::{RandomSource, RngSource};
use crate::toggle::BoolToggle;
use chrono::Utc;
use fixture_core::{classify, FixtureValue, SchemaNode, TypeTag, UnsupportedSchemaError};
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Schema type discriminator not in the catalogue
    #[error("Unsupported schema type: {tag}")]
    UnsupportedSchema { tag: String },

    /// Lazy schemas nested deeper than the configured ceiling
    #[error("Recursion limit of {depth} lazy schema levels exceeded")]
    RecursionLimit { depth: usize },

    /// A recognised node lacks the child or payload its type requires
    #[error("Malformed {tag} schema: missing {part}")]
    MissingDefinition { tag: TypeTag, part: &'static str },

    /// The element or key schema cannot yield enough distinct values
    #[error("{tag} schema needs {required} distinct values but only {produced} could be drawn")]
    NotEnoughDistinct {
        tag: TypeTag,
        required: usize,
        produced: usize,
    },
}

impl From<UnsupportedSchemaError> for GenerateError {
    fn from(err: UnsupportedSchemaError) -> Self {
        GenerateError::UnsupportedSchema { tag: err.tag }
    }
}

pub(crate) fn missing(tag: TypeTag, part: &'static str) -> GenerateError {
    GenerateError::MissingDefinition { tag, part }
}

/// Produces fixture values from any [`SchemaNode`].
///
/// All randomness goes through the [`RandomSource`]; booleans go through a
/// [`BoolToggle`]. Generators seeded through `config.seed` own a private
/// toggle, so the same seed always yields the same fixtures. All others use
/// the process-wide shared toggle unless it is replaced with
/// [`with_toggle`](FixtureGenerator::with_toggle).
pub struct FixtureGenerator<S = RngSource<StdRng>> {
    pub(crate) config: GeneratorConfig,
    pub(crate) random: S,
    pub(crate) toggle: BoolToggle,
}

impl FixtureGenerator<RngSource<StdRng>> {
    /// Create a generator.
    ///
    /// With `config.seed` set it is fully deterministic: a seeded random
    /// source and a fresh boolean toggle. Otherwise it is seeded from entropy
    /// and shares the process-wide toggle.
    pub fn new(config: GeneratorConfig) -> Self {
        match config.seed {
            Some(seed) => {
                Self::with_source(config, RngSource::seeded(seed)).with_toggle(BoolToggle::new())
            }
            None => Self::with_source(config, RngSource::from_entropy()),
        }
    }

    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(GeneratorConfig::default().with_seed(seed))
    }
}

impl Default for FixtureGenerator<RngSource<StdRng>> {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<S: RandomSource> FixtureGenerator<S> {
    /// Create a generator drawing from the given random source.
    pub fn with_source(config: GeneratorConfig, random: S) -> Self {
        Self {
            config,
            random,
            toggle: BoolToggle::shared(),
        }
    }

    /// Replace the boolean toggle, e.g. with a private one for isolation.
    pub fn with_toggle(mut self, toggle: BoolToggle) -> Self {
        self.toggle = toggle;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one fixture value for `schema`.
    ///
    /// Any failure aborts the whole value; nothing partial is returned.
    pub fn create<N: SchemaNode>(&mut self, schema: &N) -> Result<FixtureValue, GenerateError> {
        let value = self.generate(schema, None, 0)?;
        debug!(
            schema = schema.type_name(),
            kind = value.kind(),
            "Created fixture"
        );
        Ok(value)
    }

    /// Generate `count` independent fixture values for `schema`.
    pub fn create_many<N: SchemaNode>(
        &mut self,
        schema: &N,
        count: usize,
    ) -> Result<Vec<FixtureValue>, GenerateError> {
        (0..count).map(|_| self.create(schema)).collect()
    }

    /// Generate a value for `node`.
    ///
    /// `context` is the name of the enclosing object field, if any; `depth`
    /// counts the lazy schemas entered so far in this invocation.
    pub(crate) fn generate<N: SchemaNode>(
        &mut self,
        node: &N,
        context: Option<&str>,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let tag = classify(node)?;
        trace!(%tag, ?context, depth, "Generating value");

        match tag {
            TypeTag::String => Ok(text::generate_string(
                &mut self.random,
                context,
                &node.constraints(),
            )),
            TypeTag::Number => Ok(numeric::generate_number(
                &mut self.random,
                &node.constraints(),
                self.config.number_min,
                self.config.number_max,
            )),
            TypeTag::NaN => Ok(FixtureValue::Number(f64::NAN)),
            TypeTag::BigInt => Ok(numeric::generate_bigint(&mut self.random)),
            TypeTag::Boolean => Ok(FixtureValue::Bool(self.toggle.next())),
            TypeTag::Date => Ok(timestamp::generate_date(
                &mut self.random,
                Utc::now(),
                self.config.date_spread_days,
            )),
            TypeTag::Symbol => Ok(text::generate_symbol(&mut self.random)),
            TypeTag::Function => self.generate_function(node, depth),

            TypeTag::Undefined => Ok(FixtureValue::Undefined),
            TypeTag::Null | TypeTag::Any | TypeTag::Unknown | TypeTag::Never => {
                Ok(FixtureValue::Null)
            }
            TypeTag::Void => Ok(FixtureValue::function(|| FixtureValue::Undefined)),

            TypeTag::Literal => node
                .literal_value()
                .cloned()
                .ok_or_else(|| missing(tag, "literal value")),
            TypeTag::Enum => enums::pick_enum_value(&mut self.random, node.enum_values())
                .ok_or_else(|| missing(tag, "values")),
            TypeTag::NativeEnum => {
                enums::pick_native_enum_value(&mut self.random, node.native_enum_entries())
                    .ok_or_else(|| missing(tag, "members"))
            }

            TypeTag::Object => self.generate_object(node, depth),
            TypeTag::Array => self.generate_array(node, depth),
            TypeTag::Tuple => self.generate_tuple(node, depth),
            TypeTag::Record => self.generate_record(node, depth),
            TypeTag::Map => self.generate_map(node, depth),
            TypeTag::Set => self.generate_set(node, depth),

            TypeTag::Union => self.generate_union(node, context, depth),
            TypeTag::DiscriminatedUnion => self.generate_discriminated_union(node, context, depth),
            TypeTag::Intersection => self.generate_intersection(node, context, depth),
            TypeTag::Lazy => self.generate_lazy(node, context, depth),

            TypeTag::Optional
            | TypeTag::Nullable
            | TypeTag::Default
            | TypeTag::Catch
            | TypeTag::Promise
            | TypeTag::Branded
            | TypeTag::Pipeline
            | TypeTag::Readonly
            | TypeTag::Effects => {
                let inner = node
                    .inner_schema()
                    .ok_or_else(|| missing(tag, "inner schema"))?;
                self.generate(inner, context, depth)
            }
        }
    }

    /// The return value is generated once, now; every call of the produced
    /// function returns a copy of it.
    fn generate_function<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let output = match node.inner_schema() {
            Some(returns) => self.generate(returns, None, depth)?,
            None => FixtureValue::Undefined,
        };
        Ok(FixtureValue::function(move || output.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::Schema;

    fn generator() -> FixtureGenerator {
        FixtureGenerator::seeded(42)
    }

    #[test]
    fn test_primitive_kinds() {
        let mut generator = generator();

        let s = generator.create(&Schema::string()).unwrap();
        assert!(s.as_str().is_some());

        let n = generator.create(&Schema::number()).unwrap().as_f64().unwrap();
        assert!((1.0..=500.0).contains(&n));

        let b = generator.create(&Schema::bigint()).unwrap().as_bigint().unwrap();
        assert!((1..=numeric::MAX_SAFE_INTEGER).contains(&b));

        let nan = generator.create(&Schema::nan()).unwrap().as_f64().unwrap();
        assert!(nan.is_nan());

        assert!(generator.create(&Schema::date()).unwrap().as_date().is_some());
        assert!(generator.create(&Schema::boolean()).unwrap().as_bool().is_some());
        assert_eq!(
            generator.create(&Schema::literal("tuna")).unwrap(),
            FixtureValue::from("tuna")
        );
    }

    #[test]
    fn test_empty_kinds() {
        let mut generator = generator();

        assert!(generator.create(&Schema::undefined()).unwrap().is_undefined());
        for schema in [Schema::null(), Schema::any(), Schema::unknown(), Schema::never()] {
            assert!(generator.create(&schema).unwrap().is_null());
        }

        let void = generator.create(&Schema::void()).unwrap();
        assert!(void.as_function().unwrap().call().is_undefined());
    }

    #[test]
    fn test_function_returns_generated_value() {
        let mut generator = generator();
        let value = generator
            .create(&Schema::function().returns(Schema::number()))
            .unwrap();

        let f = value.as_function().expect("Expected Function value");
        let first = f.call();
        assert!(first.as_f64().is_some());
        assert_eq!(first, f.call());

        let bare = generator.create(&Schema::function()).unwrap();
        assert!(bare.as_function().unwrap().call().is_undefined());
    }

    #[test]
    fn test_boolean_alternation() {
        let mut generator = generator();
        let schema = Schema::boolean();

        let one = generator.create(&schema).unwrap();
        let two = generator.create(&schema).unwrap();
        let three = generator.create(&schema).unwrap();
        let four = generator.create(&schema).unwrap();

        assert_ne!(one, two);
        assert_eq!(one, three);
        assert_eq!(two, four);
    }

    #[test]
    fn test_wrappers_generate_inner_value() {
        let mut generator = generator();
        let wrapped = [
            Schema::string().optional(),
            Schema::string().nullable(),
            Schema::string().nullish(),
            Schema::string().with_default("fallback"),
            Schema::string().catch("caught"),
            Schema::string().promise(),
            Schema::string().brand(),
            Schema::string().pipeline(),
            Schema::string().readonly(),
            Schema::string().effects(),
        ];

        for schema in &wrapped {
            let value = generator.create(schema).unwrap();
            let s = value.as_str().expect("Expected String value");
            assert_ne!(s, "fallback");
            assert_ne!(s, "caught");
        }
    }

    #[test]
    fn test_enums() {
        let mut generator = generator();
        let fish = Schema::enumeration(["Salmon", "Tuna", "Trout"]);
        let fruits = Schema::native_enum([
            ("Apple", FixtureValue::Number(0.0)),
            ("Banana", FixtureValue::Number(1.0)),
            ("0", FixtureValue::from("Apple")),
            ("1", FixtureValue::from("Banana")),
        ]);

        for _ in 0..20 {
            let value = generator.create(&fish).unwrap();
            assert!(["Salmon", "Tuna", "Trout"].contains(&value.as_str().unwrap()));

            let value = generator.create(&fruits).unwrap();
            assert!(value.as_f64().is_some());
        }
    }

    #[test]
    fn test_unsupported_schema() {
        let mut generator = generator();
        let err = generator
            .create(&Schema::custom("I_DONT_EXIST"))
            .unwrap_err();

        assert!(matches!(&err, GenerateError::UnsupportedSchema { tag } if tag == "I_DONT_EXIST"));
        assert!(err.to_string().contains("I_DONT_EXIST"));
    }

    #[test]
    fn test_missing_definitions() {
        let mut generator = generator();

        let err = generator.create(&Schema::custom("optional")).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MissingDefinition {
                tag: TypeTag::Optional,
                ..
            }
        ));

        let err = generator
            .create(&Schema::enumeration(Vec::<&str>::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MissingDefinition {
                tag: TypeTag::Enum,
                ..
            }
        ));
    }

    #[test]
    fn test_same_seed_same_output() {
        let schema = Schema::object([
            ("name", Schema::string()),
            ("age", Schema::number()),
            ("tags", Schema::array(Schema::string())),
            ("rank", Schema::bigint()),
        ]);

        let a = generator().create(&schema).unwrap();
        let b = generator().create(&schema).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_same_seed_same_booleans() {
        let schema = Schema::object([("name", Schema::string()), ("active", Schema::boolean())]);
        let mut a = FixtureGenerator::seeded(42);
        let mut b = FixtureGenerator::seeded(42);

        assert_eq!(a.config().seed, Some(42));
        for _ in 0..4 {
            assert_eq!(a.create(&schema).unwrap(), b.create(&schema).unwrap());
        }
    }

    #[test]
    fn test_seeded_generator_alternates_from_true() {
        let mut generator = FixtureGenerator::seeded(7);

        assert_eq!(generator.create(&Schema::boolean()).unwrap(), FixtureValue::Bool(true));
        assert_eq!(generator.create(&Schema::boolean()).unwrap(), FixtureValue::Bool(false));
    }

    #[test]
    fn test_create_many() {
        let mut generator = generator();
        let values = generator.create_many(&Schema::string(), 5).unwrap();

        assert_eq!(values.len(), 5);
        assert_ne!(values[0], values[1]);
    }
}
