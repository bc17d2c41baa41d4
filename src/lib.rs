//! Kitbash - component composition and lifecycle toolkit
//!
//! Kitbash provides reusable building blocks for assembling components:
//! template cloning with field overrides, part-whole trees, stackable
//! wrappers, policy guards, process-wide singletons and stepwise builders.
//! Every piece composes through the [`Capability`] trait.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use config::KitConfig;
pub use domain::adapter::Adapter;
pub use domain::builder::{BuildPlan, Builder, Director, StepError, StepResult};
pub use domain::capability::{capability, Capability, CapabilityExt};
pub use domain::factory::{Factory, FactoryRegistry};
pub use domain::guard::{
    AuditPolicy, FnPolicy, Guard, LazyTarget, PermissionPolicy, Policy, Verdict,
};
pub use domain::outcome::{Denial, Invocation, Outcome};
pub use domain::prototype::{CloneRegistry, OverrideSet, RegistrationPolicy, Template};
pub use domain::singleton::{SingletonRegistry, SlotState};
pub use domain::tree::{ComponentTree, NodeId, NodeKind};
pub use domain::wrapper::{wrap, Behavior, Wrapped};
pub use error::{KitError, KitResult};
