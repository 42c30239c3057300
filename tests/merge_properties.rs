//! Property tests for the chain resolution merge rules: conditions append
//! in order, relation sets union, scalar clauses are last-writer-wins, and
//! resolution of eager-only chains is idempotent.

use std::collections::BTreeSet;

use proptest::prelude::*;

use scope_engine::query_spec::{Condition, PartialSpec};
use scope_engine::scopes::{ModelBuilder, ScopeDefinition};

type RawPartial = (Vec<Condition>, Option<u64>, Option<u64>, BTreeSet<String>);

fn condition_strategy() -> impl Strategy<Value = Condition> {
    (
        prop::sample::select(vec!["age", "score", "rank"]),
        0i64..100,
    )
        .prop_map(|(field, value)| Condition::eq(field, value))
}

fn raw_partial_strategy() -> impl Strategy<Value = RawPartial> {
    (
        prop::collection::vec(condition_strategy(), 0..3),
        prop::option::of(1u64..50),
        prop::option::of(0u64..10),
        prop::collection::btree_set(
            prop::sample::select(vec!["posts", "comments", "accounts"]).prop_map(String::from),
            0..3,
        ),
    )
}

fn build_partial(raw: &RawPartial) -> PartialSpec {
    let (conditions, limit, offset, includes) = raw;
    let mut partial = PartialSpec::new().conditions(conditions.clone());
    if let Some(limit) = limit {
        partial = partial.limit(*limit);
    }
    if let Some(offset) = offset {
        partial = partial.offset(*offset);
    }
    for relation in includes {
        partial = partial.include(relation.clone());
    }
    partial
}

proptest! {
    #[test]
    fn merge_rules_hold_for_arbitrary_eager_chains(
        raw in prop::collection::vec(raw_partial_strategy(), 1..6)
    ) {
        let mut builder = ModelBuilder::new("records");
        for (i, raw_partial) in raw.iter().enumerate() {
            builder = builder
                .scope(ScopeDefinition::constant(format!("s{i}"), build_partial(raw_partial)))
                .unwrap();
        }
        let model = builder.build();

        let mut chain = model.scope();
        for i in 0..raw.len() {
            chain = chain.invoke(&format!("s{i}")).unwrap();
        }
        let spec = chain.resolve().unwrap();

        // Eager-only chains are deterministic and idempotent.
        prop_assert_eq!(&spec, &chain.resolve().unwrap());

        // Conditions append in invocation order, never deduplicated.
        let expected_conditions: Vec<Condition> =
            raw.iter().flat_map(|(c, _, _, _)| c.clone()).collect();
        prop_assert_eq!(spec.conditions(), expected_conditions.as_slice());

        // Scalar clauses: the last scope that set a value wins.
        let expected_limit = raw.iter().rev().find_map(|(_, limit, _, _)| *limit);
        let expected_offset = raw.iter().rev().find_map(|(_, _, offset, _)| *offset);
        prop_assert_eq!(spec.limit(), expected_limit);
        prop_assert_eq!(spec.offset(), expected_offset);

        // Relation sets union across the whole chain.
        let expected_includes: BTreeSet<String> = raw
            .iter()
            .flat_map(|(_, _, _, includes)| includes.iter().cloned())
            .collect();
        prop_assert_eq!(spec.includes(), &expected_includes);
    }
}
