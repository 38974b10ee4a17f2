//! Type-directed fixture generator.
//!
//! This crate provides the `FixtureGenerator`, which walks any schema
//! implementing [`fixture_core::SchemaNode`] and synthesizes a value that
//! structurally satisfies it. All randomness goes through a
//! [`RandomSource`]; a seeded source makes output reproducible.
//!
//! # Architecture
//!
//! ```text
//! SchemaNode (Schema, SchemaDocument, ...)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │   FixtureGenerator   │
//! │                      │
//! │  - config            │
//! │  - random (StdRng)   │
//! │  - toggle (booleans) │
//! └──────────┬───────────┘
//!            │  classify → dispatch → recurse
//!            ▼
//!      FixtureValue
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_core::Schema;
//! use fixture_generator::FixtureGenerator;
//!
//! let schema = Schema::object([
//!     ("name", Schema::string()),
//!     ("age", Schema::number()),
//! ]);
//!
//! let mut generator = FixtureGenerator::seeded(42);
//! let person = generator.create(&schema).unwrap();
//! assert!(person.get("name").unwrap().as_str().unwrap().starts_with("name-"));
//! ```
//!
//! # Generation policy
//!
//! - `string` - `{field}-{uuid}` inside an object field, a bare UUID elsewhere
//! - `number` - integer in `[1, 500]`, narrowed by declared bounds
//! - `bigint` - integer in `[1, 2^53 - 1]`
//! - `boolean` - strictly alternates across calls on one toggle
//! - `date` - within two years either side of now
//! - `array`, `record`, `map`, `set` - exactly three entries
//! - wrappers (`optional`, `nullable`, `default`, ...) - always the inner value
//! - `lazy` - resolved on demand, bounded by `max_depth`

mod composite;
pub mod config;
mod containers;
pub mod generator;
pub mod generators;
pub mod random;
pub mod toggle;

// Re-exports for convenience
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{FixtureGenerator, GenerateError};
pub use random::{RandomSource, RngSource};
pub use toggle::BoolToggle;
