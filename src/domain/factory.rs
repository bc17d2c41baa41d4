//! Factories
//!
//! A [`Factory`] creates one kind of product; a [`FactoryRegistry`] picks a
//! factory by key at runtime. Abstract families are a registry whose product
//! is itself a family of factories.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{KitError, KitResult};

/// Creates a product.
pub trait Factory<P>: Send + Sync {
    fn create(&self) -> P;
}

impl<P, F> Factory<P> for F
where
    F: Fn() -> P + Send + Sync,
{
    fn create(&self) -> P {
        self()
    }
}

/// Factories selected by key.
pub struct FactoryRegistry<P> {
    factories: RwLock<BTreeMap<String, Box<dyn Factory<P>>>>,
}

impl<P> FactoryRegistry<P> {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register `factory` under `key`; returns whether a factory was replaced.
    pub fn register<F>(&self, key: impl Into<String>, factory: F) -> bool
    where
        F: Factory<P> + 'static,
    {
        let key = key.into();
        debug!(factory = %key, "registering factory");
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Box::new(factory))
            .is_some()
    }

    pub fn unregister(&self, key: &str) -> KitResult<()> {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| KitError::not_found("factory", key))
    }

    /// Create a product with the factory registered under `key`.
    pub fn create(&self, key: &str) -> KitResult<P> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        let factory = factories
            .get(key)
            .ok_or_else(|| KitError::not_found("factory", key))?;
        Ok(factory.create())
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl<P> Default for FactoryRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
