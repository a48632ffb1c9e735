//! Parent-link verification
//!
//! Every installed child must point back at the node that installed it, and
//! both must come from the same semantic model unless one of them is a
//! synthetic flow node. Values held in detached slots must have no parent.
//!
//! The per-install assertion only runs in builds with debug assertions and
//! the `parent-verification` feature. [`Operation::verify_tree`] performs the
//! same checks over a whole tree in any build and reports instead of
//! panicking.

use crate::error::ParentLinkViolation;
use crate::node::{Operation, OperationRef};
use crate::slot::Linkage;
use rustc_hash::FxHashSet;
use std::sync::{Arc, Weak};
use tracing::{error, warn};

/// Whether installs and publications are checked as they happen
pub(crate) const ENABLED: bool = cfg!(all(debug_assertions, feature = "parent-verification"));

/// Panics if any of `children` is not correctly linked to `owner`
pub(crate) fn assert_links(owner: &Operation, linkage: Linkage, children: &[OperationRef]) {
    for child in children {
        if let Err(violation) = check_link(owner, linkage, child) {
            error!(%violation, "parent-link invariant violated");
            panic!("{violation}");
        }
    }
}

/// Checks one installed value against the node holding it
pub(crate) fn check_link(
    owner: &Operation,
    linkage: Linkage,
    child: &Operation,
) -> Result<(), ParentLinkViolation> {
    match linkage {
        Linkage::Detached => {
            if child.parent_link().is_some() {
                return Err(ParentLinkViolation::UnexpectedParent {
                    child: child.kind(),
                    owner: owner.kind(),
                });
            }
            Ok(())
        }
        Linkage::Attached => {
            let linked = child
                .parent_link()
                .is_some_and(|parent| Weak::as_ptr(parent) == std::ptr::from_ref(owner));
            if !linked {
                return Err(ParentLinkViolation::WrongParent {
                    child: child.kind(),
                    expected: owner.kind(),
                    actual: child.parent().map(|parent| parent.kind()),
                });
            }
            let exempt = child.kind().is_synthetic() || owner.kind().is_synthetic();
            if !exempt && child.semantic_model() != owner.semantic_model() {
                return Err(ParentLinkViolation::SemanticModelMismatch {
                    child: child.kind(),
                    parent: owner.kind(),
                    child_model: child.semantic_model(),
                    parent_model: owner.semantic_model(),
                });
            }
            Ok(())
        }
    }
}

impl Operation {
    /// Checks every parent link reachable from this node
    ///
    /// Materializes every lazy slot on the way. Detached values are checked
    /// for a missing parent but not descended into, since they are not part
    /// of this tree.
    #[must_use]
    pub fn verify_tree(&self) -> Vec<ParentLinkViolation> {
        let mut seen = FxHashSet::default();
        let mut pending: Vec<OperationRef> = Vec::new();
        let mut violations = Vec::new();

        seen.insert(std::ptr::from_ref(self));
        check_slots(self, &mut seen, &mut pending, &mut violations);
        while let Some(operation) = pending.pop() {
            check_slots(&operation, &mut seen, &mut pending, &mut violations);
        }

        if !violations.is_empty() {
            warn!(count = violations.len(), root = %self.kind(), "operation tree failed verification");
        }
        violations
    }
}

fn check_slots(
    operation: &Operation,
    seen: &mut FxHashSet<*const Operation>,
    pending: &mut Vec<OperationRef>,
    violations: &mut Vec<ParentLinkViolation>,
) {
    operation.payload().for_each_slot(&mut |slot, linkage| {
        for child in slot.materialize() {
            if let Err(violation) = check_link(operation, linkage, child) {
                violations.push(violation);
            }
            if linkage == Linkage::Detached {
                continue;
            }
            if seen.insert(Arc::as_ptr(child)) {
                pending.push(Arc::clone(child));
            } else {
                violations.push(ParentLinkViolation::SharedNode { child: child.kind() });
            }
        }
    });
}
