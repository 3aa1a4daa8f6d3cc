
use pathrule::{DONE_STATUS, FieldPredicate, GroupKind, Joiner, NodeKind, RuleBuilder};
use proptest::prelude::*;
use strategies::{arb_membership, arb_predicate, arb_predicates, arb_rule, arb_status};

// ---------------------------------------------------------------------------
// Invariant 1: Construction
//
// Any non-empty name and status build, and come back unchanged.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn non_empty_inputs_always_build(
        name in "[A-Za-z][A-Za-z0-9_ ]{0,15}",
        status in arb_status(),
        leaf in any::<bool>(),
    ) {
        let kind = if leaf { NodeKind::Leaf } else { NodeKind::NonLeaf };
        let rule = RuleBuilder::new(name.clone(), status.clone(), vec![])
            .unwrap()
            .build(kind)
            .unwrap();
        prop_assert_eq!(rule.name(), name.as_str());
        prop_assert_eq!(rule.status_to_set(), status.as_str());
        prop_assert_eq!(rule.node_kind(), kind);
    }

    #[test]
    fn generated_rules_build(gen in arb_rule()) {
        prop_assert!(gen.builder().build(gen.kind).is_ok());
    }

    #[test]
    fn build_is_deterministic(gen in arb_rule()) {
        prop_assert_eq!(gen.build(), gen.build());
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Status resolution matrix
//
// Leaf:      then = status,  then[match] = DONE when a break exists.
// Non-leaf:  then = DONE,    then[match] = status when a break exists;
//            nothing at all without a break.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn status_matrix(gen in arb_rule()) {
        let rule = gen.build();
        let status = gen.status.as_str();
        match (gen.kind, gen.brk.is_some()) {
            (NodeKind::Leaf, false) => {
                prop_assert_eq!(rule.default_then_status(), Some(status));
                prop_assert_eq!(rule.break_match_status(), None);
            }
            (NodeKind::Leaf, true) => {
                prop_assert_eq!(rule.default_then_status(), Some(status));
                prop_assert_eq!(rule.break_match_status(), Some(DONE_STATUS));
            }
            (NodeKind::NonLeaf, false) => {
                prop_assert!(rule.status().is_noop());
            }
            (NodeKind::NonLeaf, true) => {
                prop_assert_eq!(rule.default_then_status(), Some(DONE_STATUS));
                prop_assert_eq!(rule.break_match_status(), Some(status));
            }
        }
    }

    #[test]
    fn break_clause_presence_matches_input(gen in arb_rule()) {
        let rule = gen.build();
        prop_assert_eq!(rule.if_break().is_some(), gen.brk.is_some());
        if let (Some(clause), Some((name, op, value))) = (rule.if_break(), &gen.brk) {
            prop_assert_eq!(clause.field(), name.as_str());
            prop_assert_eq!(clause.op(), *op);
            prop_assert_eq!(clause.value(), value);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Constraint groups are carried faithfully
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn groups_keep_input_order(gen in arb_rule()) {
        let rule = gen.build();
        prop_assert_eq!(
            rule.and_constraints().map(|g| g.predicates().to_vec()),
            gen.and.clone()
        );
        prop_assert_eq!(
            rule.xor_constraints().map(|g| g.predicates().to_vec()),
            gen.xor.clone()
        );
        prop_assert_eq!(
            rule.not_constraints().map(|g| g.predicates().to_vec()),
            gen.not.clone()
        );
    }

    #[test]
    fn xor_yields_one_pattern_per_predicate(preds in arb_predicates()) {
        let rule = RuleBuilder::new("r", "DONE", vec![])
            .unwrap()
            .with_xor_constraints(preds.clone())
            .build(NodeKind::Leaf)
            .unwrap();
        let patterns = rule.xor_constraints().unwrap().patterns();
        prop_assert_eq!(patterns.len(), preds.len());
        for (pattern, pred) in patterns.iter().zip(&preds) {
            prop_assert_eq!(pattern.joiner(), Joiner::Single);
            prop_assert_eq!(pattern.predicates()[0], pred);
        }
    }

    #[test]
    fn and_patterns_partition_by_field(preds in arb_predicates()) {
        let rule = RuleBuilder::new("r", "DONE", vec![])
            .unwrap()
            .with_and_constraints(preds.clone())
            .build(NodeKind::Leaf)
            .unwrap();
        let group = rule.constraint_group(GroupKind::AllOf).unwrap();
        let patterns = group.patterns();
        let total: usize = patterns.iter().map(|p| p.predicates().len()).sum();
        prop_assert_eq!(total, preds.len());
        for pattern in &patterns {
            prop_assert!(pattern.predicates().iter().all(|p| p.field() == pattern.field()));
            prop_assert!(!pattern.is_negated());
        }
        let fields: Vec<&str> = patterns.iter().map(|p| p.field()).collect();
        for (i, name) in fields.iter().enumerate() {
            prop_assert!(!fields[..i].contains(name), "field {} appears in two patterns", name);
        }
        prop_assert_eq!(fields, group.fields());
    }

    #[test]
    fn membership_keeps_last_values_per_field(gen in arb_rule()) {
        let rule = gen.build();
        let (Some(group), Some(entries)) = (rule.in_constraints(), &gen.member_of) else {
            return Ok(());
        };
        for (name, _) in entries {
            let last = entries.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.as_slice());
            prop_assert_eq!(group.get(name), last);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Last write wins
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn later_group_replaces_earlier(first in arb_predicates(), second in arb_predicates()) {
        let rule = RuleBuilder::new("r", "DONE", vec![])
            .unwrap()
            .with_and_constraints(first.clone())
            .with_or_constraints(first.clone())
            .with_xor_constraints(first.clone())
            .with_not_constraints(first)
            .with_and_constraints(second.clone())
            .with_or_constraints(second.clone())
            .with_xor_constraints(second.clone())
            .with_not_constraints(second.clone())
            .build(NodeKind::NonLeaf)
            .unwrap();
        for kind in [GroupKind::AllOf, GroupKind::AnyOf, GroupKind::OneOf, GroupKind::NoneOf] {
            let group = rule.constraint_group(kind).unwrap();
            prop_assert_eq!(group.kind(), kind);
            prop_assert_eq!(group.predicates(), second.as_slice());
        }
    }

    #[test]
    fn later_membership_replaces_earlier(first in arb_membership(), second in arb_membership()) {
        let rule = RuleBuilder::new("r", "DONE", vec![])
            .unwrap()
            .with_in_constraints(first.clone())
            .with_not_in_constraints(first)
            .with_in_constraints(second.clone())
            .with_not_in_constraints(second.clone())
            .build(NodeKind::Leaf)
            .unwrap();
        for group in [rule.in_constraints().unwrap(), rule.not_in_constraints().unwrap()] {
            for (name, _) in &second {
                let last = second.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.as_slice());
                prop_assert_eq!(group.get(name), last);
            }
            let fields: Vec<&str> = group.entries().iter().map(|e| e.field()).collect();
            prop_assert!(fields.iter().all(|f| second.iter().any(|(n, _)| n == f)));
        }
        prop_assert!(rule.not_in_constraints().unwrap().is_negated());
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Notation round trip
//
// A checked predicate renders to text that parses back to the same value.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn predicate_display_parses_back(p in arb_predicate()) {
        let text = p.to_string();
        prop_assert_eq!(text.parse::<FieldPredicate>(), Ok(p), "text: {}", text);
    }
}
