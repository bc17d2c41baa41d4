//! Component Factory
//!
//! Builds configured toolkit components. This is the single place where
//! configuration turns into registries, trees and sinks.

use std::sync::Arc;

use crate::config::KitConfig;
use crate::domain::ports::AuditSink;
use crate::domain::prototype::{CloneRegistry, Template};
use crate::domain::tree::ComponentTree;
use crate::infrastructure::{FileAuditSink, MemoryAuditSink};

/// Clone registry using the configured registration policy.
pub fn create_clone_registry<T: Template>(config: &KitConfig) -> CloneRegistry<T> {
    CloneRegistry::with_policy(config.registry.policy)
}

/// Component tree using the configured separator.
pub fn create_tree(config: &KitConfig) -> Arc<ComponentTree> {
    Arc::new(ComponentTree::with_separator(config.tree.separator.clone()))
}

/// Audit sink: the configured file, or `fallback` when no path is set.
pub fn create_audit_sink(
    config: &KitConfig,
    fallback: Arc<MemoryAuditSink>,
) -> Arc<dyn AuditSink> {
    match &config.audit.path {
        Some(path) => Arc::new(FileAuditSink::new(path.clone())),
        None => fallback,
    }
}
