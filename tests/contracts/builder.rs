//! Builder contracts

use kitbash::{BuildPlan, Builder, Director, KitError, StepError, StepResult};

#[derive(Default)]
struct Recorder {
    parts: Option<Vec<String>>,
    fail_on: Option<&'static str>,
    discarded: bool,
}

impl Builder for Recorder {
    type Product = Vec<String>;

    fn initialize(&mut self) {
        self.parts = Some(Vec::new());
    }

    fn apply(&mut self, step: &str) -> StepResult {
        if self.fail_on == Some(step) {
            return Err(StepError::failed("broken"));
        }
        self.parts
            .as_mut()
            .ok_or(StepError::Unsupported)?
            .push(step.to_string());
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<String>, StepError> {
        self.parts.take().ok_or(StepError::Unsupported)
    }

    fn discard(&mut self) {
        self.parts = None;
        self.discarded = true;
    }
}

/// CONTRACT: steps run exactly in plan order.
#[test]
fn contract_steps_follow_plan_order() {
    let director = Director::new(BuildPlan::new(["c", "a", "b"]));
    let product = director.build(&mut Recorder::default()).unwrap();
    assert_eq!(product, vec!["c", "a", "b"]);
}

/// CONTRACT: a failing step yields no product and discards the partial one.
#[test]
fn contract_failed_step_yields_nothing() {
    let mut builder = Recorder {
        fail_on: Some("a"),
        ..Recorder::default()
    };
    let err = Director::new(BuildPlan::new(["c", "a", "b"]))
        .build(&mut builder)
        .unwrap_err();

    assert!(matches!(err, KitError::ConstructionAborted { ref step, .. } if step == "a"));
    assert!(builder.discarded);
    assert!(builder.parts.is_none());
}
