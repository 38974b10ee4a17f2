//! The capability surface schemas are read through.
//!
//! The generator never inspects a concrete schema type. Anything that can
//! answer these questions can be turned into fixtures, including the bundled
//! [`Schema`](crate::Schema).

use crate::values::FixtureValue;
use serde::{Deserialize, Serialize};

/// Structural constraints the generator knows how to honour.
///
/// Refinement predicates are not represented here; only bounds that shape
/// the generated value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Inclusive lower bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Numbers must be integral
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub int: bool,

    /// Minimum string length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum string length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl Constraints {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Read-only view of a schema node.
///
/// Accessors that do not apply to a node's type return `None` or an empty
/// slice. Maps and records expose their keys through [`key_schema`] and their
/// values through [`element_schema`]; functions expose their return type
/// through [`inner_schema`].
///
/// [`key_schema`]: SchemaNode::key_schema
/// [`element_schema`]: SchemaNode::element_schema
/// [`inner_schema`]: SchemaNode::inner_schema
pub trait SchemaNode: Sized {
    /// Type discriminator, e.g. `"string"` or `"discriminated-union"`.
    fn type_name(&self) -> &str;

    /// Object fields in declaration order.
    fn shape(&self) -> &[(String, Self)];

    /// Element schema of arrays and sets, value schema of records and maps.
    fn element_schema(&self) -> Option<&Self>;

    /// Positional schemas of tuples.
    fn element_schemas(&self) -> &[Self];

    /// Key schema of records and maps.
    fn key_schema(&self) -> Option<&Self>;

    /// Members of unions and intersections, options of discriminated unions.
    fn member_schemas(&self) -> &[Self];

    /// Discriminant field name of discriminated unions.
    fn discriminant_key(&self) -> Option<&str>;

    /// The single child of wrapper nodes.
    fn inner_schema(&self) -> Option<&Self>;

    /// Resolve a lazy node to the schema it stands for.
    ///
    /// Called once per traversal step; implementations need not memoise.
    fn lazy_resolve(&self) -> Option<Self>;

    /// Stored value of literal nodes.
    fn literal_value(&self) -> Option<&FixtureValue>;

    /// Declared values of enum nodes.
    fn enum_values(&self) -> &[FixtureValue];

    /// Every `name -> value` entry of a native enum, reverse-index entries
    /// included.
    fn native_enum_entries(&self) -> &[(String, FixtureValue)];

    /// Structural constraints attached to the node.
    fn constraints(&self) -> Constraints {
        Constraints::default()
    }
}
