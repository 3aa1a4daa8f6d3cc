use crate::{BreakPresence, NodeKind, RhsStatus};

/// Status written by a branch that only marks the node as finished.
pub const DONE_STATUS: &str = "DONE";

/// Decide which activation branch carries `status_to_set`.
///
/// A leaf always records its status on the ordinary match; with a break
/// clause the match branch only marks completion. A non-leaf's status is
/// provisional and only becomes final when the break clause short-circuits
/// descent, so it moves to the match branch and the ordinary branch marks
/// completion. A non-leaf without a break clause sets nothing.
#[must_use]
pub fn resolve_status(kind: NodeKind, brk: BreakPresence, status_to_set: &str) -> RhsStatus {
    let (default_then, break_match) = match (kind, brk) {
        (NodeKind::Leaf, BreakPresence::Absent) => (Some(status_to_set), None),
        (NodeKind::Leaf, BreakPresence::Present) => (Some(status_to_set), Some(DONE_STATUS)),
        (NodeKind::NonLeaf, BreakPresence::Absent) => (None, None),
        (NodeKind::NonLeaf, BreakPresence::Present) => (Some(DONE_STATUS), Some(status_to_set)),
    };
    RhsStatus {
        default_then: default_then.map(str::to_owned),
        break_match: break_match.map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_without_break() {
        let s = resolve_status(NodeKind::Leaf, BreakPresence::Absent, "CONTINUE");
        assert_eq!(s.default_then(), Some("CONTINUE"));
        assert_eq!(s.break_match(), None);
    }

    #[test]
    fn leaf_with_break() {
        let s = resolve_status(NodeKind::Leaf, BreakPresence::Present, "CONTINUE");
        assert_eq!(s.default_then(), Some("CONTINUE"));
        assert_eq!(s.break_match(), Some(DONE_STATUS));
    }

    #[test]
    fn non_leaf_without_break() {
        let s = resolve_status(NodeKind::NonLeaf, BreakPresence::Absent, "CONTINUE");
        assert!(s.is_noop());
    }

    #[test]
    fn non_leaf_with_break() {
        let s = resolve_status(NodeKind::NonLeaf, BreakPresence::Present, "CONTINUE");
        assert_eq!(s.default_then(), Some(DONE_STATUS));
        assert_eq!(s.break_match(), Some("CONTINUE"));
    }

    #[test]
    fn status_equal_to_done_is_kept_verbatim() {
        let s = resolve_status(NodeKind::NonLeaf, BreakPresence::Present, DONE_STATUS);
        assert_eq!(s.default_then(), Some("DONE"));
        assert_eq!(s.break_match(), Some("DONE"));
    }
}
