//! Override sets
//!
//! Overrides are addressed by serialized field name. Dotted keys reach into
//! nested structs (`address.city`). Every segment must name a field of the
//! type: an override never creates a field.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{KitError, KitResult};

/// Field name to replacement value, applied after cloning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideSet {
    fields: BTreeMap<String, Value>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply every override to `value`.
    ///
    /// The value must survive a serde round trip unchanged, otherwise fields
    /// nobody overrode could be altered and the clone is refused with
    /// `LossyTemplate`. Unknown keys fail with `UnknownField`, so a rejected
    /// set never yields a half-overridden value. A key missing from the
    /// serialized form (e.g. an `Option` skipped while `None`) is accepted
    /// when the type reads it back.
    pub(crate) fn apply<T>(&self, template: &str, value: T) -> KitResult<T>
    where
        T: Serialize + DeserializeOwned + PartialEq,
    {
        if self.is_empty() {
            return Ok(value);
        }

        let base = serde_json::to_value(&value)?;
        let lossy = |message: String| KitError::LossyTemplate {
            template: template.to_string(),
            message,
        };
        match serde_json::from_value::<T>(base.clone()) {
            Ok(echo) if echo == value => {}
            Ok(_) => return Err(lossy("value changes when serialized and read back".into())),
            Err(err) => return Err(lossy(err.to_string())),
        }

        let unknown = |field: &str| KitError::UnknownField {
            template: template.to_string(),
            field: field.to_string(),
        };
        let mut tree = base.clone();
        let mut absent = Vec::new();
        for (field, replacement) in self.iter() {
            if let Some(slot) = locate(&mut tree, field) {
                *slot = replacement.clone();
            } else if place(&mut tree, field, replacement.clone()) {
                absent.push(field);
            } else {
                return Err(unknown(field));
            }
        }

        let overridden: T = match serde_json::from_value(tree) {
            Ok(overridden) => overridden,
            Err(err) => return Err(self.blame::<T>(template, &base, err)),
        };

        // Absent keys are only fields if the type serializes them back.
        if !absent.is_empty() {
            let mut echo = serde_json::to_value(&overridden)?;
            if let Some(field) = absent.into_iter().find(|f| locate(&mut echo, f).is_none()) {
                return Err(unknown(field));
            }
        }
        Ok(overridden)
    }

    /// Find the first override that does not fit its field on its own.
    fn blame<T: DeserializeOwned>(
        &self,
        template: &str,
        base: &Value,
        err: serde_json::Error,
    ) -> KitError {
        for (field, replacement) in self.iter() {
            let mut single = base.clone();
            let existed = match locate(&mut single, field) {
                Some(slot) => {
                    *slot = replacement.clone();
                    true
                }
                None => {
                    place(&mut single, field, replacement.clone());
                    false
                }
            };
            if let Err(field_err) = serde_json::from_value::<T>(single) {
                if !existed {
                    return KitError::UnknownField {
                        template: template.to_string(),
                        field: field.to_string(),
                    };
                }
                return KitError::InvalidOverride {
                    template: template.to_string(),
                    field: field.to_string(),
                    message: field_err.to_string(),
                };
            }
        }
        // Only the combination fails, blame the whole set.
        KitError::InvalidOverride {
            template: template.to_string(),
            field: self.fields.keys().cloned().collect::<Vec<_>>().join(", "),
            message: err.to_string(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OverrideSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (field, value) in iter {
            set.insert(field, value);
        }
        set
    }
}

fn locate<'a>(tree: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.')
        .try_fold(tree, |node, segment| node.as_object_mut()?.get_mut(segment))
}

/// Insert `value` at a path whose parent exists but whose last segment
/// does not. Returns false when the parent is missing or not an object.
fn place(tree: &mut Value, path: &str, value: Value) -> bool {
    let (parent, last) = match path.rsplit_once('.') {
        Some((parent, last)) => (locate(tree, parent), last),
        None => (Some(tree), path),
    };
    match parent.and_then(Value::as_object_mut) {
        Some(object) => {
            object.insert(last.to_string(), value);
            true
        }
        None => false,
    }
}
