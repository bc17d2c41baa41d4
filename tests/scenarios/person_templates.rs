//! Scenario: Person Templates
//!
//! Journey: an application registers a default person, then stamps out
//! variants with field overrides.
//!
//! Success Criteria:
//! - Overrides land on the copy only
//! - The stored template keeps its original values

use crate::common::*;
use kitbash::presentation::factory::create_clone_registry;
use kitbash::{KitConfig, OverrideSet};

#[test]
fn scenario_stamp_out_person_variants() {
    let registry = create_clone_registry(&KitConfig::default());
    registry.register("p", Person::new("a", 15)).unwrap();

    let twenty = registry
        .clone("p", &OverrideSet::new().set("age", 20))
        .unwrap();
    let renamed = registry
        .clone("p", &OverrideSet::new().set("name", "b"))
        .unwrap();

    assert_eq!(twenty, Person::new("a", 20));
    assert_eq!(renamed, Person::new("b", 15));
    assert_eq!(registry.get("p").unwrap(), Person::new("a", 15));
}

#[test]
fn scenario_retire_a_template() {
    let registry = create_clone_registry(&KitConfig::default());
    registry.register("vip", customer()).unwrap();
    registry.register("walk-in", customer()).unwrap();

    registry.unregister("vip").unwrap();

    assert_eq!(registry.names(), vec!["walk-in"]);
    assert!(registry.clone("vip", &OverrideSet::new()).is_err());
}
