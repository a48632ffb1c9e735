//! The operation node

use crate::attributes::{CaseKind, LoopKind};
use crate::constant::ConstantValue;
use crate::shape::ShapeCast;
use crate::slot::SlotView;
use crate::verify;
use crate::{ConstructionError, OperationFolder, OperationHeader, OperationKind, OperationPayload, OperationVisitor};
use ot_span::SourceLocus;
use ot_symbols::{SemanticModelId, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use tracing::debug;

/// Shared handle to an operation
pub type OperationRef = Arc<Operation>;

/// One node of a bound operation tree
///
/// Immutable after construction except for two one-shot transitions: the
/// parent link, stamped by the node that installs this one as a child, and
/// the publication of lazy slots.
pub struct Operation {
    header: OperationHeader,
    payload: OperationPayload,
    parent: OnceLock<Weak<Operation>>,
}

impl Operation {
    /// Builds a node and stamps its already-present children
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] when the header or the shape's
    /// attributes are inconsistent with the kind.
    pub fn new(
        header: OperationHeader,
        payload: impl Into<OperationPayload>,
    ) -> Result<OperationRef, ConstructionError> {
        let payload = payload.into();
        let kind = payload.kind();
        if let Err(error) = header
            .validate_for(kind)
            .and_then(|()| payload.validate(&header))
        {
            debug!(%kind, %error, "rejected operation");
            return Err(error);
        }

        let operation = Arc::new_cyclic(|holder: &Weak<Self>| {
            payload.for_each_slot(&mut |slot, linkage| slot.install(holder, linkage));
            Self {
                header,
                payload,
                parent: OnceLock::new(),
            }
        });

        if verify::ENABLED {
            operation.payload.for_each_slot(&mut |slot, linkage| {
                if let Some(children) = slot.published() {
                    verify::assert_links(&operation, linkage, children);
                }
            });
        }
        Ok(operation)
    }

    /// Kind tag
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.payload.kind()
    }

    /// Loop discriminator, for loop statements
    #[must_use]
    pub fn loop_kind(&self) -> Option<LoopKind> {
        LoopKind::of(self.kind())
    }

    /// Case discriminator, for case clauses
    #[must_use]
    pub fn case_kind(&self) -> Option<CaseKind> {
        CaseKind::of(self.kind())
    }

    /// Header facts supplied by the binder
    #[must_use]
    pub const fn header(&self) -> &OperationHeader {
        &self.header
    }

    /// Kind-specific shape
    #[must_use]
    pub const fn payload(&self) -> &OperationPayload {
        &self.payload
    }

    /// Source range the operation was bound from
    #[must_use]
    pub const fn locus(&self) -> SourceLocus {
        self.header.locus
    }

    /// Type of the produced value; `None` for statements
    #[must_use]
    pub const fn result_type(&self) -> Option<TypeId> {
        self.header.result_type
    }

    /// Compile-time constant, if known
    #[must_use]
    pub const fn constant_value(&self) -> Option<&ConstantValue> {
        self.header.constant_value.as_ref()
    }

    /// Whether the compiler synthesized the operation
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        self.header.is_implicit
    }

    /// Semantic model that bound the operation
    #[must_use]
    pub const fn semantic_model(&self) -> Option<SemanticModelId> {
        self.header.semantic_model
    }

    /// Node this one was installed into as a child
    ///
    /// `None` for roots, for nodes not yet installed and for values held in
    /// detached slots.
    #[must_use]
    pub fn parent(&self) -> Option<OperationRef> {
        self.parent.get().and_then(Weak::upgrade)
    }

    pub(crate) fn parent_link(&self) -> Option<&Weak<Self>> {
        self.parent.get()
    }

    /// Records `parent` unless a parent was already recorded
    pub(crate) fn stamp_parent(&self, parent: &Weak<Self>) {
        // A second stamp means the node is shared; verification reports it.
        let _ = self.parent.set(parent.clone());
    }

    /// Direct children in evaluation order, materializing lazy slots as they
    /// are reached
    #[must_use]
    pub fn children(&self) -> Children<'_> {
        Children {
            payload: &self.payload,
            next_slot: 0,
            current: [].iter(),
        }
    }

    /// Attached slots in evaluation order, with their field names
    #[must_use]
    pub fn slots(&self) -> Slots<'_> {
        Slots {
            payload: &self.payload,
            next_slot: 0,
        }
    }

    /// The shape, if it is an `S`
    #[must_use]
    pub fn downcast<S: ShapeCast>(&self) -> Option<&S> {
        S::cast(&self.payload)
    }

    /// Routes this node to the visitor method of its shape
    pub fn accept<V: OperationVisitor + ?Sized>(&self, visitor: &mut V) {
        self.payload.dispatch(self, visitor);
    }

    /// Routes this node and `argument` to the folder method of its shape
    pub fn accept_with<A, V: OperationFolder<A> + ?Sized>(&self, visitor: &mut V, argument: A) -> V::Output {
        self.payload.dispatch_with(self, visitor, argument)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind())
            .field("locus", &self.header.locus)
            .field("result_type", &self.header.result_type)
            .field("constant_value", &self.header.constant_value)
            .field("is_implicit", &self.header.is_implicit)
            .finish_non_exhaustive()
    }
}

/// Iterator over the children of one node
pub struct Children<'a> {
    payload: &'a OperationPayload,
    next_slot: usize,
    current: std::slice::Iter<'a, OperationRef>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a OperationRef;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(child) = self.current.next() {
                return Some(child);
            }
            let view = self.payload.slot(self.next_slot)?;
            self.next_slot += 1;
            self.current = view.operations().iter();
        }
    }
}

impl std::iter::FusedIterator for Children<'_> {}

/// Iterator over the attached slots of one node
pub struct Slots<'a> {
    payload: &'a OperationPayload,
    next_slot: usize,
}

impl<'a> Iterator for Slots<'a> {
    type Item = SlotView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.payload.slot(self.next_slot)?;
        self.next_slot += 1;
        Some(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::BinaryOperatorKind;
    use crate::shapes::{BinaryOperation, BlockOperation, LiteralOperation, ReturnOperation};
    use crate::slot::{Child, ChildList, OptionalChild};
    use ot_span::{FileId, Span};

    fn locus(start: u32, end: u32) -> SourceLocus {
        SourceLocus::new(FileId(0), Span::new(start, end))
    }

    fn literal(value: i64, start: u32) -> OperationRef {
        Operation::new(
            OperationHeader::new(locus(start, start + 1))
                .with_type(TypeId(1))
                .with_constant(value),
            LiteralOperation {},
        )
        .expect("literal")
    }

    fn add(left: OperationRef, right: OperationRef) -> Result<OperationRef, ConstructionError> {
        Operation::new(
            OperationHeader::new(locus(0, 5)).with_type(TypeId(1)),
            BinaryOperation {
                left_operand: Child::eager(left),
                right_operand: Child::eager(right),
                operator_kind: BinaryOperatorKind::Add,
                is_lifted: false,
                is_checked: false,
                is_compare_text: false,
                operator_method: None,
                unary_operator_method: None,
            },
        )
    }

    #[test]
    fn test_binary_children_in_evaluation_order() {
        let left = literal(1, 0);
        let right = literal(2, 4);
        let binary = add(left.clone(), right.clone()).expect("binary");

        let children: Vec<_> = binary.children().collect();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(children[0], &left));
        assert!(Arc::ptr_eq(children[1], &right));
        for child in children {
            assert!(Arc::ptr_eq(&child.parent().expect("parent"), &binary));
        }
        assert!(binary.parent().is_none());
    }

    #[test]
    fn test_slots_expose_field_names() {
        let binary = add(literal(1, 0), literal(2, 4)).expect("binary");
        let names: Vec<_> = binary.slots().map(|view| view.name()).collect();
        assert_eq!(names, ["left_operand", "right_operand"]);
    }

    #[test]
    fn test_downcast() {
        let binary = add(literal(1, 0), literal(2, 4)).expect("binary");
        let shape = binary.downcast::<BinaryOperation>().expect("binary shape");
        assert_eq!(shape.operator_kind, BinaryOperatorKind::Add);
        assert!(binary.downcast::<BlockOperation>().is_none());
    }

    #[test]
    fn test_literal_requires_constant() {
        let error = Operation::new(OperationHeader::new(locus(0, 1)), LiteralOperation {})
            .expect_err("literal without constant");
        assert!(matches!(error, ConstructionError::MissingAttribute { kind: OperationKind::Literal, .. }));
    }

    #[test]
    fn test_shared_shape_rejects_foreign_kind() {
        let error = Operation::new(
            OperationHeader::new(locus(0, 6)),
            ReturnOperation {
                kind: OperationKind::Throw,
                returned_value: OptionalChild::default(),
            },
        )
        .expect_err("throw is not a return kind");
        assert_eq!(
            error,
            ConstructionError::KindMismatch {
                shape: "ReturnOperation",
                kind: OperationKind::Throw,
            }
        );
    }

    #[test]
    fn test_statement_rejects_result_type() {
        let error = Operation::new(
            OperationHeader::new(locus(0, 2)).with_type(TypeId(3)),
            BlockOperation {
                operations: ChildList::default(),
                locals: Vec::new(),
            },
        )
        .expect_err("typed block");
        assert_eq!(error, ConstructionError::StatementWithValue { kind: OperationKind::Block });
    }

    #[test]
    fn test_header_accessors() {
        let operation = literal(7, 3);
        assert_eq!(operation.kind(), OperationKind::Literal);
        assert_eq!(operation.result_type(), Some(TypeId(1)));
        assert_eq!(operation.constant_value(), Some(&ConstantValue::Int(7)));
        assert!(!operation.is_implicit());
        assert_eq!(operation.locus(), locus(3, 4));
        assert_eq!(operation.children().count(), 0);
    }
}
