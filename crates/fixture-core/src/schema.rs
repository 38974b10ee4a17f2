//! Bundled schema description.
//!
//! ## Type Hierarchy
//!
//! **Runtime nodes** (what the generator walks):
//! - `Schema` - Cheap-to-clone handle around a `SchemaDef`
//! - `SchemaDef` - Type discriminator plus every child/payload a variant may carry
//! - `LazyGetter` - Deferred schema lookup, the only way to build a cycle
//!
//! **Serialized form** (YAML schema files):
//! - `NodeDefinition` - One node as written in YAML
//! - `FieldDefinition` - Named object field
//! - `SchemaDocument` - Named definitions plus a root, with `ref` lookups
//!
//! ## Usage
//!
//! - Use the builder constructors (`Schema::string()`, `Schema::object(..)`, ...)
//!   when schemas are declared in Rust
//! - Use `SchemaDocument::from_file` for schemas kept next to fixtures on disk

use crate::node::{Constraints, SchemaNode};
use crate::tags::TypeTag;
use crate::values::FixtureValue;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Weak};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema document operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A lazy node references a definition that does not exist
    #[error("Lazy reference to undefined schema: {0}")]
    UndefinedReference(String),
}

// ============================================================================
// Runtime Nodes
// ============================================================================

/// Deferred schema lookup for self-referential schemas.
#[derive(Clone)]
pub struct LazyGetter(Arc<dyn Fn() -> Option<Schema> + Send + Sync>);

impl LazyGetter {
    /// Wrap a lookup. Returning `None` means the target no longer exists.
    pub fn new(f: impl Fn() -> Option<Schema> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the lookup.
    pub fn resolve(&self) -> Option<Schema> {
        (self.0)()
    }
}

impl fmt::Debug for LazyGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyGetter(..)")
    }
}

/// Definition behind a [`Schema`] handle.
///
/// Which fields are populated depends on `type_name`; the rest stay empty.
#[derive(Debug, Clone, Default)]
pub struct SchemaDef {
    /// Type discriminator
    pub type_name: String,

    /// Object fields in declaration order
    pub shape: Vec<(String, Schema)>,

    /// Array/set element, record/map value
    pub element: Option<Schema>,

    /// Tuple positions
    pub elements: Vec<Schema>,

    /// Record/map key
    pub key: Option<Schema>,

    /// Union/intersection members, discriminated-union options
    pub members: Vec<Schema>,

    /// Discriminant field name
    pub discriminator: Option<String>,

    /// Wrapped schema, or a function's return type
    pub inner: Option<Schema>,

    /// Lazy target
    pub getter: Option<LazyGetter>,

    /// Literal value, or the fallback of `default`/`catch` wrappers
    pub literal: Option<FixtureValue>,

    /// Enum values
    pub values: Vec<FixtureValue>,

    /// Native enum entries, reverse-index entries included
    pub entries: Vec<(String, FixtureValue)>,

    /// Structural constraints
    pub constraints: Constraints,
}

impl SchemaDef {
    fn tagged(tag: TypeTag) -> Self {
        Self {
            type_name: tag.as_str().to_string(),
            ..Default::default()
        }
    }
}

/// A schema node.
///
/// Cloning is cheap; children are shared.
#[derive(Debug, Clone)]
pub struct Schema(Arc<SchemaDef>);

impl Schema {
    /// Wrap a hand-built definition.
    pub fn from_def(def: SchemaDef) -> Self {
        Self(Arc::new(def))
    }

    /// Access the definition.
    pub fn def(&self) -> &SchemaDef {
        &self.0
    }

    fn tagged(tag: TypeTag) -> Self {
        Self::from_def(SchemaDef::tagged(tag))
    }

    fn with(self, f: impl FnOnce(&mut SchemaDef)) -> Self {
        let mut def = Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone());
        f(&mut def);
        Self::from_def(def)
    }

    fn wrap(self, tag: TypeTag) -> Self {
        let mut def = SchemaDef::tagged(tag);
        def.inner = Some(self);
        Self::from_def(def)
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    pub fn string() -> Self {
        Self::tagged(TypeTag::String)
    }

    pub fn number() -> Self {
        Self::tagged(TypeTag::Number)
    }

    pub fn nan() -> Self {
        Self::tagged(TypeTag::NaN)
    }

    pub fn bigint() -> Self {
        Self::tagged(TypeTag::BigInt)
    }

    pub fn boolean() -> Self {
        Self::tagged(TypeTag::Boolean)
    }

    pub fn date() -> Self {
        Self::tagged(TypeTag::Date)
    }

    pub fn symbol() -> Self {
        Self::tagged(TypeTag::Symbol)
    }

    pub fn undefined() -> Self {
        Self::tagged(TypeTag::Undefined)
    }

    pub fn null() -> Self {
        Self::tagged(TypeTag::Null)
    }

    pub fn any() -> Self {
        Self::tagged(TypeTag::Any)
    }

    pub fn unknown() -> Self {
        Self::tagged(TypeTag::Unknown)
    }

    pub fn never() -> Self {
        Self::tagged(TypeTag::Never)
    }

    pub fn void() -> Self {
        Self::tagged(TypeTag::Void)
    }

    /// A function with no declared return type.
    pub fn function() -> Self {
        Self::tagged(TypeTag::Function)
    }

    /// Declare a function's return type.
    pub fn returns(self, output: Schema) -> Self {
        self.with(|def| def.inner = Some(output))
    }

    // ------------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------------

    pub fn array(element: Schema) -> Self {
        Self::tagged(TypeTag::Array).with(|def| def.element = Some(element))
    }

    /// Object with the given fields. A repeated name keeps its last schema.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        let mut shape = Vec::new();
        for (name, schema) in fields {
            upsert_field(&mut shape, name.into(), schema);
        }
        Self::tagged(TypeTag::Object).with(|def| def.shape = shape)
    }

    pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Self {
        let elements = items.into_iter().collect();
        Self::tagged(TypeTag::Tuple).with(|def| def.elements = elements)
    }

    /// Record with string keys.
    pub fn record(value: Schema) -> Self {
        Self::tagged(TypeTag::Record).with(|def| def.element = Some(value))
    }

    /// Record with an explicit key schema.
    pub fn record_with_key(key: Schema, value: Schema) -> Self {
        Self::tagged(TypeTag::Record).with(|def| {
            def.key = Some(key);
            def.element = Some(value);
        })
    }

    pub fn map(key: Schema, value: Schema) -> Self {
        Self::tagged(TypeTag::Map).with(|def| {
            def.key = Some(key);
            def.element = Some(value);
        })
    }

    pub fn set(element: Schema) -> Self {
        Self::tagged(TypeTag::Set).with(|def| def.element = Some(element))
    }

    // ------------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------------

    pub fn union(members: impl IntoIterator<Item = Schema>) -> Self {
        let members = members.into_iter().collect();
        Self::tagged(TypeTag::Union).with(|def| def.members = members)
    }

    pub fn discriminated_union(
        discriminator: impl Into<String>,
        options: impl IntoIterator<Item = Schema>,
    ) -> Self {
        let discriminator = discriminator.into();
        let members = options.into_iter().collect();
        Self::tagged(TypeTag::DiscriminatedUnion).with(|def| {
            def.discriminator = Some(discriminator);
            def.members = members;
        })
    }

    pub fn intersection(left: Schema, right: Schema) -> Self {
        Self::tagged(TypeTag::Intersection).with(|def| def.members = vec![left, right])
    }

    /// Schema produced on demand, typically to refer back to an enclosing one.
    pub fn lazy(getter: impl Fn() -> Schema + Send + Sync + 'static) -> Self {
        let getter = LazyGetter::new(move || Some(getter()));
        Self::tagged(TypeTag::Lazy).with(|def| def.getter = Some(getter))
    }

    // ------------------------------------------------------------------------
    // Value sets
    // ------------------------------------------------------------------------

    pub fn literal(value: impl Into<FixtureValue>) -> Self {
        let value = value.into();
        Self::tagged(TypeTag::Literal).with(|def| def.literal = Some(value))
    }

    pub fn enumeration<V: Into<FixtureValue>>(values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::tagged(TypeTag::Enum).with(|def| def.values = values)
    }

    /// Native enum entries as declared, including any reverse-index entries
    /// a numeric enum encoding adds.
    pub fn native_enum<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FixtureValue>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::tagged(TypeTag::NativeEnum).with(|def| def.entries = entries)
    }

    /// Node with an arbitrary discriminator, recognised or not.
    pub fn custom(type_name: impl Into<String>) -> Self {
        Self::from_def(SchemaDef {
            type_name: type_name.into(),
            ..Default::default()
        })
    }

    // ------------------------------------------------------------------------
    // Wrappers and shorthands
    // ------------------------------------------------------------------------

    pub fn optional(self) -> Self {
        self.wrap(TypeTag::Optional)
    }

    pub fn nullable(self) -> Self {
        self.wrap(TypeTag::Nullable)
    }

    /// Optional and nullable.
    pub fn nullish(self) -> Self {
        self.nullable().optional()
    }

    pub fn with_default(self, value: impl Into<FixtureValue>) -> Self {
        let value = value.into();
        self.wrap(TypeTag::Default).with(|def| def.literal = Some(value))
    }

    pub fn catch(self, value: impl Into<FixtureValue>) -> Self {
        let value = value.into();
        self.wrap(TypeTag::Catch).with(|def| def.literal = Some(value))
    }

    pub fn promise(self) -> Self {
        self.wrap(TypeTag::Promise)
    }

    pub fn brand(self) -> Self {
        self.wrap(TypeTag::Branded)
    }

    pub fn pipeline(self) -> Self {
        self.wrap(TypeTag::Pipeline)
    }

    pub fn readonly(self) -> Self {
        self.wrap(TypeTag::Readonly)
    }

    /// Refinement or transform around this schema. The predicate itself is
    /// not modelled.
    pub fn effects(self) -> Self {
        self.wrap(TypeTag::Effects)
    }

    /// Array of this schema.
    pub fn into_array(self) -> Self {
        Self::array(self)
    }

    /// Union of this schema and `other`.
    pub fn or(self, other: Schema) -> Self {
        Self::union([self, other])
    }

    /// Intersection of this schema and `other`.
    pub fn and(self, other: Schema) -> Self {
        Self::intersection(self, other)
    }

    /// Merge the fields of another object schema; its fields win on collision.
    pub fn merge(self, other: &Schema) -> Self {
        let extra = other.def().shape.clone();
        self.with(|def| {
            for (name, schema) in extra {
                upsert_field(&mut def.shape, name, schema);
            }
        })
    }

    // ------------------------------------------------------------------------
    // Constraints
    // ------------------------------------------------------------------------

    pub fn min(self, min: f64) -> Self {
        self.with(|def| def.constraints.min = Some(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.with(|def| def.constraints.max = Some(max))
    }

    pub fn int(self) -> Self {
        self.with(|def| def.constraints.int = true)
    }

    pub fn min_length(self, len: usize) -> Self {
        self.with(|def| def.constraints.min_length = Some(len))
    }

    pub fn max_length(self, len: usize) -> Self {
        self.with(|def| def.constraints.max_length = Some(len))
    }
}

fn upsert_field(shape: &mut Vec<(String, Schema)>, name: String, schema: Schema) {
    match shape.iter_mut().find(|(existing, _)| *existing == name) {
        Some(slot) => slot.1 = schema,
        None => shape.push((name, schema)),
    }
}

impl SchemaNode for Schema {
    fn type_name(&self) -> &str {
        &self.0.type_name
    }

    fn shape(&self) -> &[(String, Self)] {
        &self.0.shape
    }

    fn element_schema(&self) -> Option<&Self> {
        self.0.element.as_ref()
    }

    fn element_schemas(&self) -> &[Self] {
        &self.0.elements
    }

    fn key_schema(&self) -> Option<&Self> {
        self.0.key.as_ref()
    }

    fn member_schemas(&self) -> &[Self] {
        &self.0.members
    }

    fn discriminant_key(&self) -> Option<&str> {
        self.0.discriminator.as_deref()
    }

    fn inner_schema(&self) -> Option<&Self> {
        self.0.inner.as_ref()
    }

    fn lazy_resolve(&self) -> Option<Self> {
        self.0.getter.as_ref().and_then(LazyGetter::resolve)
    }

    fn literal_value(&self) -> Option<&FixtureValue> {
        self.0.literal.as_ref()
    }

    fn enum_values(&self) -> &[FixtureValue] {
        &self.0.values
    }

    fn native_enum_entries(&self) -> &[(String, FixtureValue)] {
        &self.0.entries
    }

    fn constraints(&self) -> Constraints {
        self.0.constraints
    }
}

// ============================================================================
// Serialized Form
// ============================================================================

/// A schema node as written in a YAML schema file.
///
/// ```yaml
/// type: object
/// fields:
///   - name: email
///     type: string
///     min_length: 8
///   - name: tags
///     type: set
///     element: { type: enum, values: [red, green, blue] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Type discriminator
    #[serde(rename = "type")]
    pub type_name: String,

    /// Object fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,

    /// Array/set element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<NodeDefinition>>,

    /// Tuple positions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NodeDefinition>,

    /// Record/map key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<NodeDefinition>>,

    /// Record/map value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<NodeDefinition>>,

    /// Union/intersection members, discriminated-union options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<NodeDefinition>,

    /// Discriminant field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,

    /// Wrapped schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<NodeDefinition>>,

    /// Function return type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<Box<NodeDefinition>>,

    /// Name of the definition a lazy node stands for
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<YamlValue>,

    /// Enum values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<YamlValue>,

    /// Native enum entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<serde_yaml::Mapping>,

    /// Structural constraints
    #[serde(flatten)]
    pub constraints: Constraints,
}

/// Named object field in a YAML schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Field schema
    #[serde(flatten)]
    pub schema: NodeDefinition,
}

type Definitions = HashMap<String, Schema>;

impl NodeDefinition {
    /// Names of every definition this node (or a descendant) refers to.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(name) = &self.reference {
            refs.push(name);
        }
        let children = self
            .fields
            .iter()
            .map(|f| &f.schema)
            .chain(self.items.iter())
            .chain(self.members.iter())
            .chain(self.element.as_deref())
            .chain(self.key.as_deref())
            .chain(self.value.as_deref())
            .chain(self.inner.as_deref())
            .chain(self.returns.as_deref());
        for child in children {
            child.collect_references(refs);
        }
    }

    fn build(&self, definitions: &Weak<Definitions>) -> Schema {
        let build_boxed =
            |node: &Option<Box<NodeDefinition>>| node.as_ref().map(|n| n.build(definitions));

        let mut def = SchemaDef {
            type_name: self.type_name.clone(),
            constraints: self.constraints,
            ..Default::default()
        };

        for field in &self.fields {
            upsert_field(
                &mut def.shape,
                field.name.clone(),
                field.schema.build(definitions),
            );
        }
        def.element = build_boxed(&self.element).or_else(|| build_boxed(&self.value));
        def.elements = self.items.iter().map(|s| s.build(definitions)).collect();
        def.key = build_boxed(&self.key);
        def.members = self.members.iter().map(|s| s.build(definitions)).collect();
        def.discriminator = self.discriminator.clone();
        def.inner = build_boxed(&self.inner).or_else(|| build_boxed(&self.returns));

        if let Some(name) = &self.reference {
            let name = name.clone();
            let definitions = definitions.clone();
            def.getter = Some(LazyGetter::new(move || {
                definitions
                    .upgrade()
                    .and_then(|defs| defs.get(&name).cloned())
            }));
        }

        def.literal = self.literal.as_ref().map(FixtureValue::from_yaml);
        def.values = self.values.iter().map(FixtureValue::from_yaml).collect();
        if let Some(entries) = &self.entries {
            def.entries = entries
                .iter()
                .filter_map(|(k, v)| {
                    let key = match k {
                        YamlValue::String(s) => s.clone(),
                        YamlValue::Number(n) => n.to_string(),
                        _ => return None,
                    };
                    Some((key, FixtureValue::from_yaml(v)))
                })
                .collect();
        }

        Schema::from_def(def)
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentDefinition {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    definitions: BTreeMap<String, NodeDefinition>,

    root: NodeDefinition,
}

/// A YAML schema file: named definitions plus the root schema.
///
/// `type: lazy` nodes refer to definitions with `ref`, which is how recursive
/// schemas are written:
///
/// ```yaml
/// version: 1
/// definitions:
///   category:
///     type: object
///     fields:
///       - name: name
///         type: string
///       - name: children
///         type: array
///         element: { type: lazy, ref: category }
/// root: { type: lazy, ref: category }
/// ```
///
/// Lazy nodes look definitions up through the document, so keep it alive
/// while generating from any of its schemas.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    version: u32,
    definitions: Arc<Definitions>,
    root: Schema,
}

impl SchemaDocument {
    /// Load a document from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let parsed: DocumentDefinition = serde_yaml::from_str(yaml)?;

        let undefined = parsed
            .definitions
            .values()
            .chain(std::iter::once(&parsed.root))
            .flat_map(NodeDefinition::references)
            .find(|name| !parsed.definitions.contains_key(*name));
        if let Some(name) = undefined {
            return Err(SchemaError::UndefinedReference(name.to_string()));
        }

        let definitions = Arc::new_cyclic(|weak: &Weak<Definitions>| {
            parsed
                .definitions
                .iter()
                .map(|(name, def)| (name.clone(), def.build(weak)))
                .collect::<Definitions>()
        });
        let root = parsed.root.build(&Arc::downgrade(&definitions));

        Ok(Self {
            version: parsed.version,
            definitions,
            root,
        })
    }

    /// Document format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The root schema.
    pub fn root(&self) -> &Schema {
        &self.root
    }

    /// A named definition.
    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// Names of all definitions, sorted.
    pub fn definition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// ============================================================================
// Tests
// ============================================================================
