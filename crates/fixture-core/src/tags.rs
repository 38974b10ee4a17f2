//! Type-tag catalogue.
//!
//! `TypeTag` is the closed set of schema variants the generator understands.
//! Every node is mapped onto exactly one tag by [`classify`]; a node whose
//! discriminator is not in the catalogue is rejected rather than guessed at.

use crate::node::SchemaNode;
use std::fmt;
use std::str::FromStr;

/// Error returned when a schema's type discriminator is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported schema type: {tag}")]
pub struct UnsupportedSchemaError {
    /// The discriminator exactly as the schema declared it
    pub tag: String,
}

/// Every schema variant recognised by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    // Primitives
    String,
    Number,
    NaN,
    BigInt,
    Boolean,
    Date,
    Symbol,
    Function,

    // Empty and catch-all kinds
    Undefined,
    Null,
    Any,
    Unknown,
    Never,
    Void,

    // Containers
    Array,
    Object,
    Tuple,
    Record,
    Map,
    Set,

    // Combinators
    Union,
    DiscriminatedUnion,
    Intersection,
    Lazy,

    // Value sets
    Literal,
    Enum,
    NativeEnum,

    // Single-child wrappers
    Optional,
    Nullable,
    Default,
    Catch,
    Promise,
    Branded,
    Pipeline,
    Readonly,
    Effects,
}

impl TypeTag {
    /// All tags in catalogue order.
    pub const ALL: [TypeTag; 36] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::NaN,
        TypeTag::BigInt,
        TypeTag::Boolean,
        TypeTag::Date,
        TypeTag::Symbol,
        TypeTag::Function,
        TypeTag::Undefined,
        TypeTag::Null,
        TypeTag::Any,
        TypeTag::Unknown,
        TypeTag::Never,
        TypeTag::Void,
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Tuple,
        TypeTag::Record,
        TypeTag::Map,
        TypeTag::Set,
        TypeTag::Union,
        TypeTag::DiscriminatedUnion,
        TypeTag::Intersection,
        TypeTag::Lazy,
        TypeTag::Literal,
        TypeTag::Enum,
        TypeTag::NativeEnum,
        TypeTag::Optional,
        TypeTag::Nullable,
        TypeTag::Default,
        TypeTag::Catch,
        TypeTag::Promise,
        TypeTag::Branded,
        TypeTag::Pipeline,
        TypeTag::Readonly,
        TypeTag::Effects,
    ];

    /// Canonical discriminator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::NaN => "nan",
            TypeTag::BigInt => "bigint",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Symbol => "symbol",
            TypeTag::Function => "function",
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Any => "any",
            TypeTag::Unknown => "unknown",
            TypeTag::Never => "never",
            TypeTag::Void => "void",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Tuple => "tuple",
            TypeTag::Record => "record",
            TypeTag::Map => "map",
            TypeTag::Set => "set",
            TypeTag::Union => "union",
            TypeTag::DiscriminatedUnion => "discriminated-union",
            TypeTag::Intersection => "intersection",
            TypeTag::Lazy => "lazy",
            TypeTag::Literal => "literal",
            TypeTag::Enum => "enum",
            TypeTag::NativeEnum => "native-enum",
            TypeTag::Optional => "optional",
            TypeTag::Nullable => "nullable",
            TypeTag::Default => "default",
            TypeTag::Catch => "catch",
            TypeTag::Promise => "promise",
            TypeTag::Branded => "branded",
            TypeTag::Pipeline => "pipeline",
            TypeTag::Readonly => "readonly",
            TypeTag::Effects => "effects",
        }
    }

    /// Wrappers decorate exactly one inner schema and generate as that schema.
    pub fn is_wrapper(&self) -> bool {
        matches!(
            self,
            TypeTag::Optional
                | TypeTag::Nullable
                | TypeTag::Default
                | TypeTag::Catch
                | TypeTag::Promise
                | TypeTag::Branded
                | TypeTag::Pipeline
                | TypeTag::Readonly
                | TypeTag::Effects
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = UnsupportedSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnsupportedSchemaError { tag: s.to_string() })
    }
}

/// Map a schema node onto its catalogue entry.
pub fn classify<N: SchemaNode>(node: &N) -> Result<TypeTag, UnsupportedSchemaError> {
    node.type_name().parse()
}
