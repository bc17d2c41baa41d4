//! Scenario: House Builders
//!
//! Journey: one director, one plan, two builders. Swapping the builder
//! changes the house but not the orchestration.

use kitbash::{BuildPlan, Builder, Director, StepError, StepResult};

#[derive(Debug, PartialEq)]
struct House {
    foundation: String,
    walls: u32,
    roof: String,
}

struct Materials {
    foundation: &'static str,
    walls: u32,
    roof: &'static str,
    house: Option<House>,
}

impl Materials {
    fn new(foundation: &'static str, walls: u32, roof: &'static str) -> Self {
        Self {
            foundation,
            walls,
            roof,
            house: None,
        }
    }
}

impl Builder for Materials {
    type Product = House;

    fn initialize(&mut self) {
        self.house = Some(House {
            foundation: String::new(),
            walls: 0,
            roof: String::new(),
        });
    }

    fn apply(&mut self, step: &str) -> StepResult {
        let house = self.house.as_mut().ok_or(StepError::Unsupported)?;
        match step {
            "foundation" => house.foundation = self.foundation.to_string(),
            "walls" => house.walls = self.walls,
            "roof" => house.roof = self.roof.to_string(),
            _ => return Err(StepError::Unsupported),
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<House, StepError> {
        self.house.take().ok_or(StepError::Unsupported)
    }
}

#[test]
fn scenario_swap_builders_under_one_director() {
    let director = Director::new(BuildPlan::new(["foundation", "walls", "roof"]));

    let one = director.build(&mut Materials::new("one", 10, "stone")).unwrap();
    let two = director.build(&mut Materials::new("two", 20, "wooden")).unwrap();

    assert_eq!(
        one,
        House {
            foundation: "one".to_string(),
            walls: 10,
            roof: "stone".to_string(),
        }
    );
    assert_eq!(two.roof, "wooden");
    assert_eq!(two.walls, 20);
}
