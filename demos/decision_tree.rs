//! Walk a small golf decision tree and compile one rule per node.
//!
//! Non-leaf rules set no status, so routing goes through agenda groups: each
//! non-leaf rule gives focus to the group holding its children.

use pathrule::parse::parse_predicates;
use pathrule::{NodeKind, OutputField, RuleBuilder, RuleDescriptor, RuleError};

struct Node {
    id: &'static str,
    predicate: &'static str,
    score: Option<&'static str>,
    children: Vec<Node>,
}

fn tree() -> Node {
    Node {
        id: "root",
        predicate: "OUTLOOK != \"none\"",
        score: None,
        children: vec![
            Node {
                id: "sunny",
                predicate: "OUTLOOK == \"sunny\"",
                score: None,
                children: vec![
                    Node {
                        id: "sunny_humid",
                        predicate: "HUMIDITY > 70",
                        score: Some("will not play"),
                        children: vec![],
                    },
                    Node {
                        id: "sunny_dry",
                        predicate: "HUMIDITY <= 70",
                        score: Some("will play"),
                        children: vec![],
                    },
                ],
            },
            Node {
                id: "overcast",
                predicate: "OUTLOOK == \"overcast\"",
                score: Some("will play"),
                children: vec![],
            },
        ],
    }
}

fn compile(node: &Node, parent: Option<&str>, out: &mut Vec<RuleDescriptor>) -> Result<(), RuleError> {
    let kind = if node.children.is_empty() {
        NodeKind::Leaf
    } else {
        NodeKind::NonLeaf
    };
    let status = match node.score {
        Some(_) => "DONE".to_owned(),
        None => node.id.to_uppercase(),
    };
    let outputs = node
        .score
        .map(|s| vec![OutputField::new("DECISION", s)])
        .unwrap_or_default();
    let predicates = parse_predicates(node.predicate).map_err(|e| RuleError::InvalidArgument {
        argument: "predicate".to_owned(),
        reason: e.to_string(),
    })?;

    let mut builder = RuleBuilder::new(node.id, status, outputs)?
        .with_and_constraints(predicates)
        .with_agenda_group(format!("AGENDA_{}", parent.unwrap_or("MAIN")));
    if kind == NodeKind::NonLeaf {
        builder = builder.with_focused_agenda_group(format!("AGENDA_{}", node.id));
    }
    out.push(builder.build(kind)?);

    for child in &node.children {
        compile(child, Some(node.id), out)?;
    }
    Ok(())
}

fn main() -> Result<(), RuleError> {
    let mut rules = Vec::new();
    compile(&tree(), None, &mut rules)?;
    for rule in &rules {
        println!(
            "{rule}\n  agenda {:?}\n  focus  {:?}\n  then   {:?}",
            rule.agenda_group(),
            rule.focused_agenda_group(),
            rule.default_then_status()
        );
    }
    Ok(())
}
