//! Core types for the schema-fixture generator.
//!
//! This crate provides the foundational types shared by the generator and
//! its callers:
//!
//! - [`SchemaNode`] - Capability surface the generator interrogates schemas through
//! - [`TypeTag`] - Closed catalogue of every recognised schema variant
//! - [`Schema`] - Bundled schema description with builder constructors
//! - [`SchemaDocument`] - Named schema definitions loaded from YAML
//! - [`FixtureValue`] - Generated fixture values
//!
//! # Architecture
//!
//! ```text
//! fixture-core (this crate)
//!    │
//!    ├─── fixture-generator   (generic over SchemaNode, produces FixtureValue)
//!    │
//!    └─── schema-fixture      (facade: create(), config loading)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::{classify, Schema, TypeTag};
//!
//! let schema = Schema::object([
//!     ("name", Schema::string()),
//!     ("age", Schema::number().optional()),
//! ]);
//!
//! assert_eq!(classify(&schema).unwrap(), TypeTag::Object);
//! ```

pub mod node;
pub mod schema;
pub mod tags;
pub mod values;

// Re-exports for convenience
pub use node::{Constraints, SchemaNode};
pub use schema::{
    FieldDefinition, LazyGetter, NodeDefinition, Schema, SchemaDef, SchemaDocument, SchemaError,
};
pub use tags::{classify, TypeTag, UnsupportedSchemaError};
pub use values::{FixtureFn, FixtureValue};
