//! Tree navigation: descendants, ancestors and root lookup

use crate::node::{Operation, OperationRef};
use crate::OperationKind;
use std::sync::Arc;

/// Pre-order walk over a subtree
///
/// Lazy slots are materialized as the walk reaches them.
pub struct Descendants {
    pending: Vec<OperationRef>,
}

impl Descendants {
    fn push_children(&mut self, operation: &Operation) {
        let first = self.pending.len();
        self.pending.extend(operation.children().cloned());
        self.pending[first..].reverse();
    }
}

impl Iterator for Descendants {
    type Item = OperationRef;

    fn next(&mut self) -> Option<Self::Item> {
        let operation = self.pending.pop()?;
        self.push_children(&operation);
        Some(operation)
    }
}

/// Walk from a node's parent up to the root
pub struct Ancestors {
    next: Option<OperationRef>,
}

impl Iterator for Ancestors {
    type Item = OperationRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl Operation {
    /// Every node below this one, in pre-order
    #[must_use]
    pub fn descendants(&self) -> Descendants {
        let mut walk = Descendants { pending: Vec::new() };
        walk.push_children(self);
        walk
    }
}

/// Navigation that needs an owned handle to the starting node
pub trait OperationTreeExt {
    /// This node followed by every node below it, in pre-order
    fn descendants_and_self(&self) -> Descendants;

    /// Parent, grandparent and so on up to the root
    fn ancestors(&self) -> Ancestors;

    /// Topmost ancestor, or the node itself when it has no parent
    fn root(&self) -> OperationRef;

    /// Nearest ancestor of `kind`
    fn find_ancestor(&self, kind: OperationKind) -> Option<OperationRef>;
}

impl OperationTreeExt for OperationRef {
    fn descendants_and_self(&self) -> Descendants {
        Descendants {
            pending: vec![Arc::clone(self)],
        }
    }

    fn ancestors(&self) -> Ancestors {
        Ancestors { next: self.parent() }
    }

    fn root(&self) -> OperationRef {
        self.ancestors().last().unwrap_or_else(|| Arc::clone(self))
    }

    fn find_ancestor(&self, kind: OperationKind) -> Option<OperationRef> {
        self.ancestors().find(|ancestor| ancestor.kind() == kind)
    }
}
