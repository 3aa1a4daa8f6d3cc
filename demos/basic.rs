use pathrule::{field, CompareOp, NodeKind, RuleBuilder};

fn main() {
    let rule = RuleBuilder::new("TempRule", "CONTINUE", vec![])
        .expect("name and status are set")
        .with_and_constraints(vec![field("OUTLOOK").eq("sunny")])
        .with_if_break("TEMPERATURE", CompareOp::Gte, 90_i64)
        .build(NodeKind::NonLeaf)
        .expect("failed to build rule");

    println!("{rule}");
    println!("then        -> {:?}", rule.default_then_status());
    println!("then[match] -> {:?}", rule.break_match_status());
}
