//! Configuration module for Kitbash
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KITBASH_*)
//! 3. Project config (./kitbash.toml)
//! 4. User config (<config dir>/kitbash/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{AuditConfig, KitConfig, LoggingConfig, RegistryConfig, TreeConfig};
