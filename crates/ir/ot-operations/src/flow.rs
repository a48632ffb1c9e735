//! Synthetic flow nodes
//!
//! The flow-graph builder lowers structured code into basic blocks and needs
//! a few node kinds that have no syntax of their own: captures of
//! intermediate values, null tests, the caught exception of a handler region
//! and so on. They are ordinary operations built with the same slots and
//! visited through the same visitors, but they are always implicit and never
//! belong to a semantic model.

use crate::node::{Operation, OperationRef};
use crate::slot::Child;
use crate::{ConstructionError, OperationHeader, OperationKind};
use derive_more::Display;
use ot_derive::Shape;
use ot_span::SourceLocus;
use ot_symbols::{LocalId, TypeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flow temporary introduced by the flow-graph builder
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("capture#{_0}")]
pub struct CaptureId(pub u32);

/// Flow graph an anonymous function was lowered within
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("context#{_0}")]
pub struct FlowContextId(pub u32);

/// Stores a value into a flow temporary
#[derive(Debug, Shape)]
#[shape(kind = FlowCapture)]
pub struct FlowCaptureOperation {
    /// Captured value
    pub value: Child,
    /// Temporary receiving the value
    pub id: CaptureId,
}

/// Reads a flow temporary
#[derive(Debug, Shape)]
#[shape(kind = FlowCaptureReference)]
pub struct FlowCaptureReferenceOperation {
    /// Temporary being read
    pub id: CaptureId,
    /// The read is the target of the temporary's initialization
    pub is_initialization: bool,
}

/// Null test introduced by lowering `?.`, `??` and similar
#[derive(Debug, Shape)]
#[shape(kind = IsNull)]
pub struct IsNullOperation {
    /// Tested value
    pub operand: Child,
}

/// Exception in flight at the start of a catch region
#[derive(Debug, Shape)]
#[shape(kind = CaughtException)]
pub struct CaughtExceptionOperation {}

/// Anonymous function as seen from a flow graph
///
/// `original` is the bound function node; it keeps its own parent and is not
/// a child of this node.
#[derive(Debug, Shape)]
#[shape(kind = FlowAnonymousFunction, validate = check_original)]
pub struct FlowAnonymousFunctionOperation {
    /// The wrapped function
    pub original: OriginalFunction,
    /// Flow graph the function was lowered within
    pub context: FlowContextId,
}

impl FlowAnonymousFunctionOperation {
    fn check_original(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.original.0.kind() != OperationKind::AnonymousFunction {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::FlowAnonymousFunction,
                attribute: "original",
                reason: "must wrap an anonymous function",
            });
        }
        Ok(())
    }
}

/// Reference to the bound anonymous function a flow node wraps
#[derive(Clone)]
pub struct OriginalFunction(pub OperationRef);

impl OriginalFunction {
    /// The wrapped node
    #[must_use]
    pub const fn operation(&self) -> &OperationRef {
        &self.0
    }
}

impl fmt::Debug for OriginalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.0.kind(), self.0.locus())
    }
}

/// One-time initialization guard of a static local
#[derive(Debug, Shape)]
#[shape(kind = StaticLocalInitializationSemaphore)]
pub struct StaticLocalInitializationSemaphoreOperation {
    /// Guarded local
    pub local: LocalId,
}

/// Builds synthetic nodes for one flow graph
///
/// Every node it builds is implicit and carries no semantic model.
#[derive(Debug, Clone, Copy)]
pub struct FlowNodes {
    context: FlowContextId,
}

impl FlowNodes {
    /// Builder for the flow graph identified by `context`
    #[must_use]
    pub const fn new(context: FlowContextId) -> Self {
        Self { context }
    }

    /// Flow graph this builder belongs to
    #[must_use]
    pub const fn context(&self) -> FlowContextId {
        self.context
    }

    fn header(locus: SourceLocus, result_type: Option<TypeId>) -> OperationHeader {
        let header = OperationHeader::new(locus).implicit();
        match result_type {
            Some(result_type) => header.with_type(result_type),
            None => header,
        }
    }

    /// Captures `value` into temporary `id`
    ///
    /// # Errors
    ///
    /// Propagates construction errors
    pub fn capture(&self, id: CaptureId, value: OperationRef) -> Result<OperationRef, ConstructionError> {
        let locus = value.locus();
        Operation::new(
            Self::header(locus, None),
            FlowCaptureOperation {
                value: Child::eager(value),
                id,
            },
        )
    }

    /// References temporary `id`. An initialization reference is the target
    /// the capture is first written through rather than a read of it.
    ///
    /// # Errors
    ///
    /// Propagates construction errors
    pub fn capture_reference(
        &self,
        locus: SourceLocus,
        id: CaptureId,
        result_type: Option<TypeId>,
        is_initialization: bool,
    ) -> Result<OperationRef, ConstructionError> {
        Operation::new(
            Self::header(locus, result_type),
            FlowCaptureReferenceOperation { id, is_initialization },
        )
    }

    /// Tests `operand` for null
    ///
    /// # Errors
    ///
    /// Propagates construction errors
    pub fn is_null(&self, operand: OperationRef, boolean: TypeId) -> Result<OperationRef, ConstructionError> {
        let locus = operand.locus();
        Operation::new(
            Self::header(locus, Some(boolean)),
            IsNullOperation {
                operand: Child::eager(operand),
            },
        )
    }

    /// Exception caught by a handler region
    ///
    /// # Errors
    ///
    /// Propagates construction errors
    pub fn caught_exception(
        &self,
        locus: SourceLocus,
        exception_type: TypeId,
    ) -> Result<OperationRef, ConstructionError> {
        Operation::new(Self::header(locus, Some(exception_type)), CaughtExceptionOperation {})
    }

    /// Wraps a bound anonymous function for this flow graph
    ///
    /// # Errors
    ///
    /// Fails if `original` is not an anonymous function
    pub fn anonymous_function(&self, original: OperationRef) -> Result<OperationRef, ConstructionError> {
        let header = Self::header(original.locus(), original.result_type());
        Operation::new(
            header,
            FlowAnonymousFunctionOperation {
                original: OriginalFunction(original),
                context: self.context,
            },
        )
    }

    /// Guard for the one-time initialization of static local `local`
    ///
    /// # Errors
    ///
    /// Propagates construction errors
    pub fn static_local_semaphore(
        &self,
        locus: SourceLocus,
        local: LocalId,
        boolean: TypeId,
    ) -> Result<OperationRef, ConstructionError> {
        Operation::new(
            Self::header(locus, Some(boolean)),
            StaticLocalInitializationSemaphoreOperation { local },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::LiteralOperation;
    use ot_span::{FileId, Span};
    use ot_symbols::SemanticModelId;
    use std::sync::Arc;

    fn locus() -> SourceLocus {
        SourceLocus::new(FileId(2), Span::new(10, 14))
    }

    fn bound_literal() -> OperationRef {
        Operation::new(
            OperationHeader::new(locus())
                .with_type(TypeId(1))
                .with_constant(4)
                .in_model(SemanticModelId(9)),
            LiteralOperation {},
        )
        .expect("literal")
    }

    #[test]
    fn test_capture_of_bound_value_is_exempt_from_model_check() {
        let flow = FlowNodes::new(FlowContextId(0));
        let value = bound_literal();
        let capture = flow.capture(CaptureId(1), value.clone()).expect("capture");

        assert!(capture.is_implicit());
        assert_eq!(capture.semantic_model(), None);
        assert!(Arc::ptr_eq(&value.parent().expect("parent"), &capture));
        assert!(capture.verify_tree().is_empty());
    }

    #[test]
    fn test_flow_node_with_model_is_rejected() {
        let error = Operation::new(
            OperationHeader::new(locus()).in_model(SemanticModelId(1)),
            CaughtExceptionOperation {},
        )
        .expect_err("flow nodes have no model");
        assert_eq!(
            error,
            ConstructionError::SyntheticWithSemanticModel {
                kind: OperationKind::CaughtException
            }
        );
    }

    #[test]
    fn test_flow_anonymous_function_requires_function() {
        let flow = FlowNodes::new(FlowContextId(3));
        let error = flow.anonymous_function(bound_literal()).expect_err("not a function");
        assert!(matches!(
            error,
            ConstructionError::InconsistentAttribute {
                kind: OperationKind::FlowAnonymousFunction,
                ..
            }
        ));
    }

    #[test]
    fn test_capture_reference_carries_initialization_flag() {
        let flow = FlowNodes::new(FlowContextId(0));
        for is_initialization in [false, true] {
            let reference = flow
                .capture_reference(locus(), CaptureId(7), Some(TypeId(1)), is_initialization)
                .expect("capture reference");
            let shape = reference
                .downcast::<FlowCaptureReferenceOperation>()
                .expect("shape");
            assert_eq!(shape.id, CaptureId(7));
            assert_eq!(shape.is_initialization, is_initialization);
        }
    }

    #[test]
    fn test_capture_id_display() {
        assert_eq!(CaptureId(4).to_string(), "capture#4");
        assert_eq!(FlowContextId(1).to_string(), "context#1");
    }
}
