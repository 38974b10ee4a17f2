//! Container policies: objects, arrays, tuples, records, maps and sets.
//!
//! Arrays, records, maps and sets always hold exactly
//! `config.collection_size` entries. Elements of every container except
//! objects are generated without a naming context.

use crate::generator::{missing, FixtureGenerator, GenerateError};
use crate::generators::text;
use crate::random::RandomSource;
use fixture_core::{Constraints, FixtureValue, SchemaNode, TypeTag};
use std::collections::BTreeMap;
use tracing::warn;

impl<S: RandomSource> FixtureGenerator<S> {
    pub(crate) fn generate_object<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let mut fields = BTreeMap::new();
        for (name, field) in node.shape() {
            let value = self.generate(field, Some(name), depth)?;
            fields.insert(name.clone(), value);
        }
        Ok(FixtureValue::Object(fields))
    }

    pub(crate) fn generate_array<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let element = node
            .element_schema()
            .ok_or_else(|| missing(TypeTag::Array, "element schema"))?;

        let items = (0..self.config.collection_size)
            .map(|_| self.generate(element, None, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FixtureValue::Array(items))
    }

    pub(crate) fn generate_tuple<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let items = node
            .element_schemas()
            .iter()
            .map(|element| self.generate(element, None, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FixtureValue::Array(items))
    }

    /// Keys come from the key schema (a plain string when none is declared)
    /// and are stored as text, so they must be distinct as text. A key schema
    /// with fewer distinct values than `collection_size`, such as a two-value
    /// enum, fails with [`GenerateError::NotEnoughDistinct`].
    pub(crate) fn generate_record<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let value_schema = node
            .element_schema()
            .ok_or_else(|| missing(TypeTag::Record, "value schema"))?;
        let key_schema = node.key_schema();

        let keys = self.collect_distinct(TypeTag::Record, |gen| {
            let key = match key_schema {
                Some(schema) => gen.generate(schema, None, depth)?,
                None => text::generate_string(&mut gen.random, None, &Constraints::default()),
            };
            Ok(FixtureValue::String(key.to_key_string()))
        })?;

        let mut entries = BTreeMap::new();
        for key in keys {
            let value = self.generate(value_schema, None, depth)?;
            entries.insert(key.to_key_string(), value);
        }
        Ok(FixtureValue::Object(entries))
    }

    pub(crate) fn generate_map<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let key_schema = node
            .key_schema()
            .ok_or_else(|| missing(TypeTag::Map, "key schema"))?;
        let value_schema = node
            .element_schema()
            .ok_or_else(|| missing(TypeTag::Map, "value schema"))?;

        let keys = self.collect_distinct(TypeTag::Map, |gen| {
            gen.generate(key_schema, None, depth)
        })?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let value = self.generate(value_schema, None, depth)?;
            entries.push((key, value));
        }
        Ok(FixtureValue::Map(entries))
    }

    pub(crate) fn generate_set<N: SchemaNode>(
        &mut self,
        node: &N,
        depth: usize,
    ) -> Result<FixtureValue, GenerateError> {
        let element = node
            .element_schema()
            .ok_or_else(|| missing(TypeTag::Set, "element schema"))?;

        let items = self.collect_distinct(TypeTag::Set, |gen| gen.generate(element, None, depth))?;
        Ok(FixtureValue::Set(items))
    }

    /// Draw until `collection_size` distinct values are held, giving up after
    /// `unique_attempts` draws.
    fn collect_distinct<F>(
        &mut self,
        tag: TypeTag,
        mut draw: F,
    ) -> Result<Vec<FixtureValue>, GenerateError>
    where
        F: FnMut(&mut Self) -> Result<FixtureValue, GenerateError>,
    {
        let required = self.config.collection_size;
        let mut distinct: Vec<FixtureValue> = Vec::with_capacity(required);
        let mut attempts = 0;

        while distinct.len() < required {
            if attempts >= self.config.unique_attempts {
                warn!(
                    %tag,
                    required,
                    produced = distinct.len(),
                    attempts,
                    "Could not draw enough distinct values"
                );
                return Err(GenerateError::NotEnoughDistinct {
                    tag,
                    required,
                    produced: distinct.len(),
                });
            }
            attempts += 1;

            let value = draw(self)?;
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }

        Ok(distinct)
    }
}
