//! schema-fixture
//!
//! Generate realistic fixture values directly from the schema used to
//! validate them, so test data never drifts from its contract.
//!
//! # Crates
//!
//! - `fixture_core` - schema capability trait, bundled `Schema` builders,
//!   YAML schema documents and the `FixtureValue` output type
//! - `fixture_generator` - the generator itself, its configuration and
//!   randomness source
//!
//! # Usage
//!
//! ```rust
//! use schema_fixture::{create, Schema};
//!
//! let user = Schema::object([
//!     ("name", Schema::string()),
//!     ("age", Schema::number()),
//!     ("roles", Schema::enumeration(["admin", "member"]).into_array()),
//! ]);
//!
//! let fixture = create(&user).unwrap();
//! assert_eq!(fixture.get("roles").unwrap().as_array().unwrap().len(), 3);
//! ```
//!
//! For reproducible fixtures build a [`FixtureGenerator`] from a seeded
//! [`GeneratorConfig`], optionally loaded with [`load_config`].

pub mod config;
pub mod testing;

pub use config::load_config;
pub use fixture_core::{
    classify, Constraints, FixtureFn, FixtureValue, Schema, SchemaDocument, SchemaError,
    SchemaNode, TypeTag, UnsupportedSchemaError,
};
pub use fixture_generator::{
    BoolToggle, ConfigError, FixtureGenerator, GenerateError, GeneratorConfig, RandomSource,
    RngSource,
};

/// Generate one fixture value for `schema`.
///
/// Uses a fresh entropy-seeded generator with default configuration and the
/// process-wide boolean toggle.
pub fn create<N: SchemaNode>(schema: &N) -> Result<FixtureValue, GenerateError> {
    FixtureGenerator::default().create(schema)
}
