//! Domain Layer
//!
//! The composition core of Kitbash - pure logic with no I/O.
//!
//! ## Structure
//!
//! - `outcome` / `capability` - The invocation surface shared by every layer
//! - `prototype/` - Clone registry with validated field overrides
//! - `tree/` - Component tree (leaf/composite) with recursive aggregation
//! - `wrapper` - Behavior layers around a capability (decorators)
//! - `guard` - Policy-mediated access to a capability (proxies)
//! - `singleton/` - Keyed lazily-created single instances
//! - `builder` - Director-driven stepwise construction
//! - `factory` / `adapter` - Keyed creators and output conversion
//! - `ports/` - Interfaces for audit sinks and credential providers
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Audit files and credentials are reached only through ports
//! 2. **Capabilities, not hierarchies** - Every layer is a `Capability`
//! 3. **Denial is a value** - Refusing to delegate yields `Outcome::Denied`

pub mod adapter;
pub mod builder;
pub mod capability;
pub mod factory;
pub mod guard;
pub mod outcome;
pub mod ports;
pub mod prototype;
pub mod singleton;
pub mod tree;
pub mod wrapper;
