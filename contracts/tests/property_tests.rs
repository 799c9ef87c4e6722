//! Property tests for the hash registry state machine
//!
//! Random validate/invalidate sequences are checked against a plain set.

mod common;

use common::{TestDao, ALICE, BOB};
use condition_contracts::{ConditionEvent, ValidHashCondition};
use proptest::prelude::*;
use sdk::{set_hash_permission_id, Address, PluginError, B256};
use std::collections::HashSet;

const DAO: Address = Address::repeat_byte(0xda);
const CONDITION: Address = Address::repeat_byte(0xc0);

#[derive(Debug, Clone)]
enum Op {
    Validate(u8),
    Invalidate(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A small hash pool forces repeats and therefore no-op transitions
    prop_oneof![
        (0u8..4).prop_map(Op::Validate),
        (0u8..4).prop_map(Op::Invalidate),
    ]
}

proptest! {
    #[test]
    fn prop_registry_matches_set_model(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let dao = TestDao::deploy(DAO);
        let mut condition = ValidHashCondition::new(CONDITION);
        condition.initialize(dao.handle()).unwrap();
        dao.grant(CONDITION, ALICE, set_hash_permission_id());

        let mut model: HashSet<u8> = HashSet::new();
        let mut emitted = 0usize;

        for op in ops {
            let (id, target) = match op {
                Op::Validate(id) => (id, true),
                Op::Invalidate(id) => (id, false),
            };
            let hash = B256::repeat_byte(id);
            let result = if target {
                condition.validate_hash(ALICE, hash)
            } else {
                condition.invalidate_hash(ALICE, hash)
            };

            if model.contains(&id) == target {
                prop_assert!(
                    matches!(result, Err(PluginError::AlreadySet { .. })),
                    "expected AlreadySet error"
                );
            } else {
                let event = result.unwrap();
                prop_assert_eq!(event.hash(), hash);
                prop_assert_eq!(matches!(event, ConditionEvent::HashValidated(_)), target);
                emitted += 1;
                if target {
                    model.insert(id);
                } else {
                    model.remove(&id);
                }
            }

            for id in 0u8..4 {
                prop_assert_eq!(condition.is_valid(B256::repeat_byte(id)), model.contains(&id));
            }
        }

        prop_assert_eq!(condition.logs().len(), emitted);
    }

    #[test]
    fn prop_unpermitted_caller_never_changes_state(ids in proptest::collection::vec(0u8..8, 1..20)) {
        let dao = TestDao::deploy(DAO);
        let mut condition = ValidHashCondition::new(CONDITION);
        condition.initialize(dao.handle()).unwrap();
        dao.grant(CONDITION, ALICE, set_hash_permission_id());

        for id in ids {
            let hash = B256::repeat_byte(id);
            let result = condition.validate_hash(BOB, hash);
            prop_assert!(
                matches!(result, Err(PluginError::Unauthorized { .. })),
                "expected Unauthorized error"
            );
            prop_assert!(!condition.is_valid(hash));
        }

        prop_assert!(condition.logs().is_empty());
    }
}
