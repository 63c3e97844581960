//! Depth-bounded projection of records into plain JSON data.
//!
//! [`prepare`] turns a record into a `serde_json` object holding its column
//! values, with temporal values rendered as strings. Relationships are
//! expanded at most one hop: a related record contributes its own columns but
//! never its relationships. Cycles therefore cannot recurse, and chains longer
//! than two entities are cut after the first hop.
//!
//! Every column is projected, nulls as `null`, unless it is excluded or
//! protected. `password`, the configured `protected_fields` and every
//! `#[protected]` column are protected unless the caller asks for
//! [`PrepareOptions::expose_protected`]. Caller exclusions always apply.
//!
//! Relationship resolution never fails the projection: an unset or unknown
//! relationship is logged at debug level and its key omitted.

use std::collections::BTreeSet;

use serde_json::{Map, Value as JsonValue};

use crate::active_model::Record;
use crate::config;
use crate::query::ColumnDefinition;
use crate::relation::Related;
use crate::value::json;

/// Field name excluded from every projection by default.
pub const PASSWORD_FIELD: &str = "password";

/// Which relationships to expand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Relations {
    /// Columns only
    #[default]
    None,
    /// Every declared relationship
    All,
    /// Only the named relationships; names that are not declared are ignored
    Only(Vec<String>),
}

impl Relations {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Relations::Only(names.into_iter().map(Into::into).collect())
    }

    fn includes(&self, name: &str) -> bool {
        match self {
            Relations::None => false,
            Relations::All => true,
            Relations::Only(names) => names.iter().any(|n| n == name),
        }
    }
}

/// Options for [`prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOptions {
    pub relations: Relations,
    /// `false` returns the live record instead of a projection
    pub as_plain: bool,
    /// Extra field names to leave out, on top of the protected ones
    pub exclude: Vec<String>,
    /// Serialize protected fields too (caller exclusions still apply)
    pub expose_protected: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            relations: Relations::None,
            as_plain: true,
            exclude: Vec::new(),
            expose_protected: false,
        }
    }
}

impl PrepareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relations(mut self, relations: Relations) -> Self {
        self.relations = relations;
        self
    }

    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.exclude.push(field.into());
        self
    }

    pub fn live(mut self) -> Self {
        self.as_plain = false;
        self
    }

    pub fn expose_protected(mut self) -> Self {
        self.expose_protected = true;
        self
    }
}

/// Result of [`prepare`].
#[derive(Debug)]
pub enum Prepared<'a> {
    Plain(Map<String, JsonValue>),
    Live(&'a dyn Record),
}

impl<'a> Prepared<'a> {
    /// The projection, or `None` for a live record.
    pub fn into_plain(self) -> Option<Map<String, JsonValue>> {
        match self {
            Prepared::Plain(map) => Some(map),
            Prepared::Live(_) => None,
        }
    }

    /// The live record, or `None` for a projection.
    pub fn as_live(&self) -> Option<&'a dyn Record> {
        match self {
            Prepared::Plain(_) => None,
            Prepared::Live(record) => Some(*record),
        }
    }

    /// The projection as a JSON value; a live record becomes `null`.
    pub fn into_value(self) -> JsonValue {
        self.into_plain().map(JsonValue::Object).unwrap_or(JsonValue::Null)
    }
}

struct Exclusions<'o> {
    names: BTreeSet<&'o str>,
    expose_protected: bool,
}

impl<'o> Exclusions<'o> {
    fn new(options: &'o PrepareOptions, protected_fields: &'o [String]) -> Self {
        let mut names: BTreeSet<&str> = options.exclude.iter().map(String::as_str).collect();
        if !options.expose_protected {
            names.insert(PASSWORD_FIELD);
            names.extend(protected_fields.iter().map(String::as_str));
        }
        Self {
            names,
            expose_protected: options.expose_protected,
        }
    }

    fn skips(&self, column: &ColumnDefinition) -> bool {
        self.names.contains(column.name) || (column.protected && !self.expose_protected)
    }
}

/// Project `record` according to `options`.
///
/// # Example
///
/// ```no_run
/// use activebase::serializer::{prepare, PrepareOptions, Relations};
/// # fn demo(user: &dyn activebase::Record) {
/// let options = PrepareOptions::new().relations(Relations::only(["orders"]));
/// let data = prepare(user, &options).into_value();
/// assert!(data.get("password").is_none());
/// # }
/// ```
pub fn prepare<'a>(record: &'a dyn Record, options: &PrepareOptions) -> Prepared<'a> {
    if !options.as_plain {
        return Prepared::Live(record);
    }
    let exclusions = Exclusions::new(options, &config::global().protected_fields);
    Prepared::Plain(project(record, &options.relations, &exclusions))
}

fn project(record: &dyn Record, relations: &Relations, exclusions: &Exclusions<'_>) -> Map<String, JsonValue> {
    let descriptor = record.descriptor();
    let mut data = Map::new();

    for column in descriptor.columns.iter().filter(|c| !exclusions.skips(c)) {
        if let Some(value) = record.get(column.name) {
            data.insert(column.name.to_string(), json::to_json(&value));
        }
    }

    for relation in descriptor.relations.iter().filter(|r| relations.includes(r.name)) {
        if exclusions.names.contains(relation.name) {
            continue;
        }
        match record.related(relation.name) {
            // one hop only: related records never expand their own relations
            Ok(Related::One(other)) => {
                let nested = project(other, &Relations::None, exclusions);
                data.insert(relation.name.to_string(), JsonValue::Object(nested));
            }
            Ok(Related::Many(others)) => {
                let nested = others
                    .into_iter()
                    .map(|other| JsonValue::Object(project(other, &Relations::None, exclusions)))
                    .collect();
                data.insert(relation.name.to_string(), JsonValue::Array(nested));
            }
            Err(err) => {
                log::debug!(
                    "Skipping relationship {} of {}: {}",
                    relation.name,
                    descriptor.type_name,
                    err
                );
            }
        }
    }

    data
}
