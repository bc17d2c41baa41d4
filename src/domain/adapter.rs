//! Adapter
//!
//! Presents a capability with an incompatible output as one with the output
//! the caller expects. Denials pass through unconverted.

use super::capability::Capability;
use super::outcome::Invocation;

/// Capability whose delivered output is converted by `convert`.
pub struct Adapter<C, F> {
    source: C,
    convert: F,
}

impl<C, F> Adapter<C, F> {
    pub fn new(source: C, convert: F) -> Self {
        Self { source, convert }
    }

    pub fn source(&self) -> &C {
        &self.source
    }
}

impl<C, F, U> Capability for Adapter<C, F>
where
    C: Capability,
    F: Fn(C::Output) -> U + Send + Sync,
{
    type Output = U;

    fn invoke(&self) -> Invocation<U> {
        Ok(self.source.invoke()?.map(&self.convert))
    }
}
