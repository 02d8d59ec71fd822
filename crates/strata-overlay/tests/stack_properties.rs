//! Property tests for stack ordering, tiers and idempotent removal.

use proptest::prelude::*;
use strata_overlay::{DEFAULT_BASE_TIER, OverlayId, OverlayStack, StackStatus};

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    Deregister(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::Register),
        (0u8..6).prop_map(Op::Deregister),
    ]
}

fn id(n: u8) -> OverlayId {
    OverlayId::new(format!("m{n}"))
}

/// Reference model: plain vector with the documented semantics.
fn apply(model: &mut Vec<u8>, op: &Op) {
    match *op {
        Op::Register(n) => {
            if !model.contains(&n) {
                model.push(n);
            }
        }
        Op::Deregister(n) => model.retain(|&m| m != n),
    }
}

proptest! {
    #[test]
    fn top_is_most_recent_open(ops in prop::collection::vec(op(), 0..40)) {
        let stack = OverlayStack::new();
        let mut model = Vec::new();
        for op in &ops {
            match op {
                Op::Register(n) => stack.register(id(*n)),
                Op::Deregister(n) => stack.deregister(&id(*n)),
            }
            apply(&mut model, op);

            for n in 0u8..6 {
                let expected_top = model.last() == Some(&n);
                prop_assert_eq!(stack.snapshot(&id(n)).is_top, expected_top);
            }
            prop_assert_eq!(stack.top(), model.last().map(|&n| id(n)));
        }
    }

    #[test]
    fn tiers_increase_with_open_order(
        base in prop_oneof![Just(DEFAULT_BASE_TIER), (u32::MAX - 8)..=u32::MAX],
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let stack = OverlayStack::with_base_tier(base);
        let mut model = Vec::new();
        for op in &ops {
            match op {
                Op::Register(n) => stack.register(id(*n)),
                Op::Deregister(n) => stack.deregister(&id(*n)),
            }
            apply(&mut model, op);
        }

        let tiers: Vec<u64> = model
            .iter()
            .map(|&n| stack.snapshot(&id(n)).tier.expect("open overlay has a tier"))
            .collect();
        for pair in tiers.windows(2) {
            prop_assert!(pair[1] > pair[0], "tiers must strictly increase: {:?}", tiers);
        }
        for (index, tier) in tiers.iter().enumerate() {
            prop_assert_eq!(*tier, u64::from(stack.base_tier()) + index as u64);
        }
        for n in (0u8..6).filter(|n| !model.contains(n)) {
            prop_assert_eq!(stack.snapshot(&id(n)), StackStatus::default());
        }
    }

    #[test]
    fn repeated_deregister_changes_nothing(
        ops in prop::collection::vec(op(), 0..30),
        victim in 0u8..6,
    ) {
        let stack = OverlayStack::new();
        for op in &ops {
            match op {
                Op::Register(n) => stack.register(id(*n)),
                Op::Deregister(n) => stack.deregister(&id(*n)),
            }
        }

        stack.deregister(&id(victim));
        let after_first = stack.ids();
        stack.deregister(&id(victim));
        stack.deregister(&id(victim));
        prop_assert_eq!(stack.ids(), after_first);
        prop_assert!(!stack.contains(&id(victim)));
    }

    #[test]
    fn register_never_duplicates(ops in prop::collection::vec(op(), 0..40)) {
        let stack = OverlayStack::new();
        let mut model = Vec::new();
        for op in &ops {
            match op {
                Op::Register(n) => stack.register(id(*n)),
                Op::Deregister(n) => stack.deregister(&id(*n)),
            }
            apply(&mut model, op);
        }
        let expected: Vec<OverlayId> = model.iter().map(|&n| id(n)).collect();
        prop_assert_eq!(stack.ids(), expected);
    }
}

#[test]
fn reregister_keeps_single_entry_in_place() {
    let stack = OverlayStack::new();
    stack.register(id(0));
    stack.register(id(1));
    stack.register(id(0));

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.ids(), vec![id(0), id(1)]);
    assert_eq!(stack.snapshot(&id(0)).tier, Some(9999));
}
