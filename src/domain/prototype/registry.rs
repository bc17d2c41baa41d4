//! Template registry

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::overrides::OverrideSet;
use crate::error::{KitError, KitResult};

/// A value that can be registered and cloned.
///
/// `Clone` produces the deep copy. Serde (without its `rc` feature) has no
/// impls for `Rc`/`Arc`, so a template cannot smuggle a shared pointer that
/// a clone would alias. The serde bounds also drive field overrides.
///
/// Overrides go through the serialized form, so a clone with overrides is
/// only produced when the value reads back equal to itself. Values holding
/// `#[serde(skip)]` fields away from their defaults, or any other state the
/// serialized form drops, fail with `LossyTemplate`; plain `get` and clones
/// without overrides are unaffected.
pub trait Template: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync {}

impl<T> Template for T where T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync {}

/// What `register` does when the name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationPolicy {
    /// Replace the existing template.
    #[default]
    Overwrite,
    /// Fail with `DuplicateName`.
    Strict,
}

/// Named templates, cloned on demand.
#[derive(Debug)]
pub struct CloneRegistry<T> {
    templates: RwLock<BTreeMap<String, T>>,
    policy: RegistrationPolicy,
}

impl<T: Template> CloneRegistry<T> {
    pub fn new() -> Self {
        Self::with_policy(RegistrationPolicy::default())
    }

    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            templates: RwLock::new(BTreeMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Store `template` under `name`, following the registry's policy.
    pub fn register(&self, name: impl Into<String>, template: T) -> KitResult<()> {
        self.insert(name.into(), template, self.policy)
    }

    /// Store `template` under `name`, failing if the name is taken.
    pub fn register_strict(&self, name: impl Into<String>, template: T) -> KitResult<()> {
        self.insert(name.into(), template, RegistrationPolicy::Strict)
    }

    fn insert(&self, name: String, template: T, policy: RegistrationPolicy) -> KitResult<()> {
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        if policy == RegistrationPolicy::Strict && templates.contains_key(&name) {
            return Err(KitError::DuplicateName { name });
        }
        debug!(template = %name, ?policy, "registering template");
        templates.insert(name, template);
        Ok(())
    }

    /// Remove and return the template stored under `name`.
    pub fn unregister(&self, name: &str) -> KitResult<T> {
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        let removed = templates
            .remove(name)
            .ok_or_else(|| KitError::not_found("template", name))?;
        debug!(template = %name, "unregistered template");
        Ok(removed)
    }

    /// Deep-copy the template under `name`, then apply `overrides`.
    pub fn clone(&self, name: &str, overrides: &OverrideSet) -> KitResult<T> {
        let copy = {
            let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
            templates
                .get(name)
                .cloned()
                .ok_or_else(|| KitError::not_found("template", name))?
        };
        debug!(template = %name, overrides = overrides.len(), "cloning template");
        overrides.apply(name, copy)
    }

    /// Deep copy without overrides.
    pub fn get(&self, name: &str) -> KitResult<T> {
        self.clone(name, &OverrideSet::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Template> Default for CloneRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
