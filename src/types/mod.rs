mod builder;
mod constraint;
mod descriptor;
mod error;
mod predicate;
mod rhs;
mod value;
#[cfg(feature = "serde")]
mod wire;

pub use builder::RuleBuilder;
pub use constraint::{ConstraintGroup, GroupKind, Joiner, MembershipEntry, MembershipGroup, Pattern};
pub use descriptor::RuleDescriptor;
pub use error::RuleError;
pub use predicate::{BreakClause, CompareOp, FieldExpr, FieldPredicate, field};
pub use rhs::{BreakPresence, NodeKind, OutputField, ResultCode, RhsAction, RhsStatus};
pub use value::Value;
