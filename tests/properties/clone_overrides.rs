//! Property tests for clone registry overrides.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use kitbash::{CloneRegistry, OverrideSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
    tags: Vec<String>,
}

fn profile() -> impl Strategy<Value = Profile> {
    (
        "[a-z]{1,8}",
        any::<u32>(),
        proptest::collection::vec("[a-z]{1,4}", 0..4),
    )
        .prop_map(|(name, age, tags)| Profile { name, age, tags })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an age override changes only age, on the copy only.
    #[test]
    fn property_override_touches_only_named_field(template in profile(), age in any::<u32>()) {
        let registry = CloneRegistry::new();
        registry.register("t", template.clone()).unwrap();

        let cloned = registry.clone("t", &OverrideSet::new().set("age", age)).unwrap();

        prop_assert_eq!(cloned.age, age);
        prop_assert_eq!(&cloned.name, &template.name);
        prop_assert_eq!(&cloned.tags, &template.tags);
        prop_assert_eq!(registry.get("t").unwrap(), template);
    }

    /// PROPERTY: mutating a clone never leaks into the template.
    #[test]
    fn property_clone_mutation_is_isolated(template in profile(), extra in "[a-z]{1,4}") {
        let registry = CloneRegistry::new();
        registry.register("t", template.clone()).unwrap();

        let mut cloned = registry.get("t").unwrap();
        cloned.tags.push(extra);
        cloned.name.push('!');

        prop_assert_eq!(registry.get("t").unwrap(), template);
    }

    /// PROPERTY: any field name outside the struct is rejected.
    #[test]
    fn property_unknown_field_is_rejected(template in profile(), field in "x[a-z]{0,8}") {
        let registry = CloneRegistry::new();
        registry.register("t", template).unwrap();

        prop_assert!(registry.clone("t", &OverrideSet::new().set(field, 1)).is_err());
    }
}
