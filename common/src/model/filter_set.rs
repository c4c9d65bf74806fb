use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::Error;

/// Prefix of the browser storage key holding a form's saved filters.
pub const STORAGE_KEY_PREFIX: &str = "filters_";

/// Storage key for the filter form identified by `form_id`, e.g.
/// `filters_orders`.
pub fn storage_key(form_id: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{form_id}")
}

/// Field name to value mapping saved for one filter form.
///
/// Entries keep the order in which fields were first inserted, which is the
/// document order of the form's controls. Inserting an existing name replaces
/// its value in place, so the last control with a given name wins.
///
/// The set is persisted as a flat JSON object of strings and always rewritten
/// as a whole; there is no merging with a previously stored set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs saved values with the form controls that receive them, given the
    /// `name` of every named control in document order. Each saved value goes
    /// to the first control carrying its name. Saved names without a control
    /// are dropped and controls without a saved value are left out, so they
    /// keep what the server rendered.
    pub fn restore_plan<'a, N>(&'a self, control_names: &[N]) -> Vec<(usize, &'a str)>
    where
        N: AsRef<str>,
    {
        control_names
            .iter()
            .enumerate()
            .filter(|(index, name)| {
                control_names[..*index]
                    .iter()
                    .all(|earlier| earlier.as_ref() != name.as_ref())
            })
            .filter_map(|(index, name)| self.get(name.as_ref()).map(|value| (index, value)))
            .collect()
    }

    /// Encodes the set as the JSON object stored in browser storage.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::EncodeFilters)
    }

    /// Decodes a stored blob.
    ///
    /// The blob must be a JSON object. Values that are not strings are
    /// converted the way a browser converts them when assigned to an input's
    /// `value` (`5` becomes `"5"`, `null` becomes `"null"`).
    pub fn from_json(blob: &str) -> Result<Self, Error> {
        let Value::Object(map) = serde_json::from_str::<Value>(blob).map_err(Error::InvalidFilterJson)?
        else {
            return Err(Error::FilterNotObject);
        };

        let mut filters = Self::new();
        for (name, value) in map {
            filters.insert(name, field_string(&value));
        }
        Ok(filters)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut filters = Self::new();
        for (name, value) in iter {
            filters.insert(name, value);
        }
        filters
    }
}

impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn field_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => integer.to_string(),
            None => number
                .as_f64()
                .map(|float| float.to_string())
                .unwrap_or_else(|| number.to_string()),
        },
        // Arrays join their items with commas, nulls becoming empty strings.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => field_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
