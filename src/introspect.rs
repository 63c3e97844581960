//! Field introspection over an entity descriptor.
//!
//! The "real" fields of an entity are its persisted columns minus its
//! relationship attributes. That set gates generic updates and drives
//! equality; everything else here is a view over it.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use sea_query::Value;
use serde::Serialize;

use crate::active_model::RecordError;
use crate::descriptor::EntityDescriptor;
use crate::query::Column;

/// A reference to a field: either its plain name or an attribute handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Name(Cow<'a, str>),
    Column(Column),
}

impl FieldRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            FieldRef::Name(name) => name.as_ref(),
            FieldRef::Column(column) => column.name(),
        }
    }

    pub fn into_name(self) -> String {
        match self {
            FieldRef::Name(name) => name.into_owned(),
            FieldRef::Column(column) => column.name().to_string(),
        }
    }
}

impl<'a> From<&'a str> for FieldRef<'a> {
    fn from(name: &'a str) -> Self {
        FieldRef::Name(Cow::Borrowed(name))
    }
}

impl<'a> From<&'a String> for FieldRef<'a> {
    fn from(name: &'a String) -> Self {
        FieldRef::Name(Cow::Borrowed(name.as_str()))
    }
}

impl From<String> for FieldRef<'static> {
    fn from(name: String) -> Self {
        FieldRef::Name(Cow::Owned(name))
    }
}

impl From<Column> for FieldRef<'static> {
    fn from(column: Column) -> Self {
        FieldRef::Column(column)
    }
}

/// Reduce a field reference to its plain name.
pub fn normalize<'a>(field: impl Into<FieldRef<'a>>) -> String {
    field.into().into_name()
}

/// Persisted column names minus relationship names.
pub fn keys(descriptor: &EntityDescriptor) -> BTreeSet<&'static str> {
    descriptor
        .columns
        .iter()
        .map(|c| c.name)
        .filter(|name| !descriptor.is_relation(name))
        .collect()
}

/// Real fields in declaration order, without the normalized `exclude` names.
pub fn fields<'a, I, F>(descriptor: &EntityDescriptor, exclude: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = F>,
    F: Into<FieldRef<'a>>,
{
    let exclude: BTreeSet<String> = exclude.into_iter().map(normalize).collect();
    descriptor
        .columns
        .iter()
        .map(|c| c.name)
        .filter(|name| !descriptor.is_relation(name) && !exclude.contains(*name))
        .collect()
}

/// Resolve a plain name or handle to the handle of a declared column.
pub fn column_handle<'a>(
    descriptor: &EntityDescriptor,
    field: impl Into<FieldRef<'a>>,
) -> Result<Column, RecordError> {
    let field = field.into();
    if descriptor.is_relation(field.name()) {
        return Err(RecordError::invalid_field(field.into_name()));
    }
    descriptor
        .handle(field.name())
        .ok_or_else(|| RecordError::invalid_field(field.into_name()))
}

/// One entry of an external-facing form/table descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    /// Human label: the key with underscores replaced by spaces
    pub name: String,
    /// Raw column name
    pub key: &'static str,
}

/// `{name, key}` pairs for every column not in `exclude`, in declaration order.
pub fn schema<'a, I, F>(descriptor: &EntityDescriptor, exclude: I) -> Vec<SchemaEntry>
where
    I: IntoIterator<Item = F>,
    F: Into<FieldRef<'a>>,
{
    let exclude: BTreeSet<String> = exclude.into_iter().map(normalize).collect();
    descriptor
        .columns
        .iter()
        .filter(|c| !exclude.contains(c.name))
        .map(|c| SchemaEntry {
            name: c.display_name(),
            key: c.name,
        })
        .collect()
}

/// Validate a single `field = value` input against the declared columns.
pub fn check_input<'a>(
    descriptor: &EntityDescriptor,
    field: impl Into<FieldRef<'a>>,
    value: Value,
) -> Result<(&'static str, Value), RecordError> {
    let handle = column_handle(descriptor, field)?;
    Ok((handle.name(), value))
}

/// Normalize and validate the keys of an equality filter set.
pub fn checked_filters<'a, I, F, V>(
    descriptor: &EntityDescriptor,
    filters: I,
) -> Result<BTreeMap<&'static str, Value>, RecordError>
where
    I: IntoIterator<Item = (F, V)>,
    F: Into<FieldRef<'a>>,
    V: Into<Value>,
{
    filters
        .into_iter()
        .map(|(field, value)| check_input(descriptor, field, value.into()))
        .collect()
}
