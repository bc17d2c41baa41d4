//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring registries and sinks from configuration
//! - The catalog demos run by the `kitbash` binary
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Builds configured components (dependency wiring)
//! - `demos` - Demo payloads exercising each composition idiom

pub mod cli;
pub mod demos;
pub mod factory;

pub use cli::{Cli, Commands};
pub use demos::{run_demo, Demo, DemoContext};
