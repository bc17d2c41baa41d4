//! Stepwise Builder
//!
//! A [`Director`] runs a [`BuildPlan`] against any [`Builder`]: initialize,
//! every step in declared order, then finalize. It knows step names and the
//! trait, never the concrete builder, so swapping builders changes the
//! product but not the orchestration.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{KitError, KitResult};

/// Why a single step could not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The builder has no such step.
    Unsupported,
    /// The step ran and failed.
    Failed(String),
}

impl StepError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Unsupported => write!(f, "unsupported step"),
            StepError::Failed(reason) => write!(f, "{}", reason),
        }
    }
}

pub type StepResult = Result<(), StepError>;

/// Construction capability set driven by a [`Director`].
pub trait Builder {
    type Product;

    /// Start a fresh product, discarding anything in progress.
    fn initialize(&mut self);

    /// Run one named step against the product in progress.
    fn apply(&mut self, step: &str) -> StepResult;

    /// Hand over the finished product.
    fn finalize(&mut self) -> Result<Self::Product, StepError>;

    /// Drop a partially built product after an aborted build.
    fn discard(&mut self) {}
}

/// Ordered list of step names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    steps: Vec<String>,
}

impl BuildPlan {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a step.
    pub fn then(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}

/// Orchestrates a build plan.
#[derive(Debug, Clone)]
pub struct Director {
    plan: BuildPlan,
}

impl Director {
    pub fn new(plan: BuildPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &BuildPlan {
        &self.plan
    }

    /// Build a product; any failing step aborts and nothing is returned.
    pub fn build<B>(&self, builder: &mut B) -> KitResult<B::Product>
    where
        B: Builder + ?Sized,
    {
        builder.initialize();
        for step in self.plan.steps() {
            debug!(step = %step, "applying build step");
            if let Err(err) = builder.apply(step) {
                return Err(abort(builder, step, err));
            }
        }
        builder
            .finalize()
            .map_err(|err| abort(builder, "finalize", err))
    }
}

fn abort<B: Builder + ?Sized>(builder: &mut B, step: &str, err: StepError) -> KitError {
    warn!(step, error = %err, "construction aborted");
    builder.discard();
    KitError::ConstructionAborted {
        step: step.to_string(),
        reason: err.to_string(),
    }
}
