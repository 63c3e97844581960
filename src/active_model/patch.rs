//! Typed field patches.

use sea_query::Value;

use crate::introspect::{normalize, FieldRef};

/// An ordered set of `field = value` assignments for [`Entity::apply`].
///
/// Field references are normalized on insertion, so a patch built from
/// attribute handles and one built from plain names are indistinguishable.
/// Later assignments to the same field win when the patch is applied.
///
/// ```
/// use activebase::{Patch, Value};
///
/// let patch = Patch::new().set("total", 12.5).set("note", "rush");
/// assert_eq!(patch.len(), 2);
/// assert_eq!(patch.get("note"), Some(&Value::from("rush")));
/// ```
///
/// [`Entity::apply`]: crate::Entity::apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    entries: Vec<(String, Value)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment, builder style.
    pub fn set<'a>(mut self, field: impl Into<FieldRef<'a>>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Add an assignment.
    pub fn insert<'a>(&mut self, field: impl Into<FieldRef<'a>>, value: impl Into<Value>) {
        self.entries.push((normalize(field), value.into()));
    }

    /// The last value assigned to `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a, F, V> FromIterator<(F, V)> for Patch
where
    F: Into<FieldRef<'a>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut patch = Patch::new();
        for (field, value) in iter {
            patch.insert(field, value);
        }
        patch
    }
}

impl IntoIterator for Patch {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
