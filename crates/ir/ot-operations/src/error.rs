//! Construction errors and parent-link violations

use crate::kind::OperationKind;
use ot_symbols::SemanticModelId;
use thiserror::Error;

/// Why the binder could not build an operation
///
/// Always fatal to the node being built; there is nothing to retry because
/// construction is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A shared shape was given a kind outside the kinds it serves
    #[error("{shape} cannot represent kind {kind}")]
    KindMismatch {
        /// Shape that rejected the kind
        shape: &'static str,
        /// Kind that was requested
        kind: OperationKind,
    },
    /// A value the kind requires was not supplied
    #[error("{kind} requires {attribute}")]
    MissingAttribute {
        /// Kind being built
        kind: OperationKind,
        /// Missing input
        attribute: &'static str,
    },
    /// Attributes that cannot hold together
    #[error("{kind} has inconsistent {attribute}: {reason}")]
    InconsistentAttribute {
        /// Kind being built
        kind: OperationKind,
        /// Offending attribute
        attribute: &'static str,
        /// What makes it inconsistent
        reason: &'static str,
    },
    /// A statement was given a result type or a constant value
    #[error("statement {kind} cannot carry a result type or constant value")]
    StatementWithValue {
        /// Kind being built
        kind: OperationKind,
    },
    /// A synthetic flow node was given a semantic model
    #[error("synthetic {kind} cannot reference a semantic model")]
    SyntheticWithSemanticModel {
        /// Kind being built
        kind: OperationKind,
    },
}

/// Broken parent link found by verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParentLinkViolation {
    /// A child's parent is not the node that installed it
    #[error("parent link of {child} points at {actual:?}, expected its installing {expected}")]
    WrongParent {
        /// Kind of the child
        child: OperationKind,
        /// Kind of the installing node
        expected: OperationKind,
        /// Kind of the node the child actually points at, if any
        actual: Option<OperationKind>,
    },
    /// A detached slot value was given a parent
    #[error("parent link set on {child}, which {owner} holds in a detached slot")]
    UnexpectedParent {
        /// Kind of the child
        child: OperationKind,
        /// Kind of the node holding the detached slot
        owner: OperationKind,
    },
    /// Parent and child were bound by different semantic models
    #[error("{child} belongs to {child_model:?} but its parent {parent} belongs to {parent_model:?}")]
    SemanticModelMismatch {
        /// Kind of the child
        child: OperationKind,
        /// Kind of the parent
        parent: OperationKind,
        /// Model of the child
        child_model: Option<SemanticModelId>,
        /// Model of the parent
        parent_model: Option<SemanticModelId>,
    },
    /// One node instance reached from two places in the tree
    #[error("{child} is reachable from more than one parent")]
    SharedNode {
        /// Kind of the shared node
        child: OperationKind,
    },
}
