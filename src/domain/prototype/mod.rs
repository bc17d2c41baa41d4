//! Clone Registry
//!
//! Named templates that are cloned on demand, with validated field
//! overrides applied to the clone only.

mod overrides;
mod registry;

pub use overrides::OverrideSet;
pub use registry::{CloneRegistry, RegistrationPolicy, Template};
