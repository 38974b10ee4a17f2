//! Generated fixture values.
//!
//! `FixtureValue` is the output of the generator. It models the value kinds a
//! schema can describe (including absent values, symbols and callables) and
//! converts to `serde_json::Value` when a fixture has to be written out.

use chrono::{DateTime, Utc};
use serde_json::json;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A zero-argument callable produced for `void` and `function` schemas.
///
/// The closure only ever captures data generated up front, so calling it is
/// cheap and side-effect free.
#[derive(Clone)]
pub struct FixtureFn(Arc<dyn Fn() -> FixtureValue + Send + Sync>);

impl FixtureFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn() -> FixtureValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the callable.
    pub fn call(&self) -> FixtureValue {
        (self.0)()
    }
}

impl fmt::Debug for FixtureFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FixtureFn(..)")
    }
}

impl PartialEq for FixtureFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    /// Absent value
    Undefined,

    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// Double-precision number (may be NaN)
    Number(f64),

    /// Arbitrary-precision integer, limited to the safe integer range
    BigInt(i64),

    /// String value
    String(String),

    /// Unique symbol, identified by its description
    Symbol(String),

    /// Point in time
    Date(DateTime<Utc>),

    /// Ordered sequence (arrays and tuples)
    Array(Vec<FixtureValue>),

    /// String-keyed mapping (objects and records)
    Object(BTreeMap<String, FixtureValue>),

    /// Key-to-value container with non-string keys allowed
    Map(Vec<(FixtureValue, FixtureValue)>),

    /// Collection of distinct values
    Set(Vec<FixtureValue>),

    /// Callable
    Function(FixtureFn),
}

impl FixtureValue {
    /// Create a callable value.
    pub fn function(f: impl Fn() -> FixtureValue + Send + Sync + 'static) -> Self {
        Self::Function(FixtureFn::new(f))
    }

    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Function(_) => "function",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is undefined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a bigint.
    pub fn as_bigint(&self) -> Option<i64> {
        match self {
            Self::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&Vec<FixtureValue>> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as an object.
    pub fn as_object(&self) -> Option<&BTreeMap<String, FixtureValue>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Try to get this value as map entries.
    pub fn as_map(&self) -> Option<&Vec<(FixtureValue, FixtureValue)>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as set members.
    pub fn as_set(&self) -> Option<&Vec<FixtureValue>> {
        match self {
            Self::Set(members) => Some(members),
            _ => None,
        }
    }

    /// Try to get this value as a callable.
    pub fn as_function(&self) -> Option<&FixtureFn> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Look up a field of an object value.
    pub fn get(&self, field: &str) -> Option<&FixtureValue> {
        self.as_object().and_then(|obj| obj.get(field))
    }

    /// Textual form used when this value becomes a record key.
    ///
    /// Integral numbers print without a fraction so that they parse back as
    /// numbers.
    pub fn to_key_string(&self) -> String {
        match self {
            Self::String(s) | Self::Symbol(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::BigInt(i) => i.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Date(dt) => dt.to_rfc3339(),
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            other => other.to_json().to_string(),
        }
    }

    /// Convert to JSON.
    ///
    /// Absent values, callables and non-finite numbers become `null`, dates
    /// become RFC 3339 strings, sets become arrays and maps become arrays of
    /// `[key, value]` pairs.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null | Self::Function(_) => serde_json::Value::Null,
            Self::Bool(b) => json!(*b),
            Self::Number(n) => number_to_json(*n),
            Self::BigInt(i) => json!(*i),
            Self::String(s) | Self::Symbol(s) => json!(s),
            Self::Date(dt) => json!(dt.to_rfc3339()),
            Self::Array(items) | Self::Set(items) => {
                serde_json::Value::Array(items.iter().map(FixtureValue::to_json).collect())
            }
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Map(entries) => serde_json::Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!([k.to_json(), v.to_json()]))
                    .collect(),
            ),
        }
    }

    /// Convert a YAML value (e.g. a literal declared in a schema file).
    pub fn from_yaml(yaml: &YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(*b),
            YamlValue::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::String(n.to_string()),
            },
            YamlValue::String(s) => Self::String(s.clone()),
            YamlValue::Sequence(items) => Self::Array(items.iter().map(Self::from_yaml).collect()),
            YamlValue::Mapping(map) => {
                let values: BTreeMap<String, FixtureValue> = map
                    .iter()
                    .filter_map(|(k, v)| {
                        let key = match k {
                            YamlValue::String(s) => s.clone(),
                            YamlValue::Number(n) => n.to_string(),
                            YamlValue::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((key, Self::from_yaml(v)))
                    })
                    .collect();
                Self::Object(values)
            }
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        json!(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl From<&FixtureValue> for serde_json::Value {
    fn from(value: &FixtureValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for FixtureValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FixtureValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FixtureValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for FixtureValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
