//! Synthetic nodes built for flow graphs

use anyhow::Result;
use integration_tests::{BOOL, EXCEPTION, INT, TreeFixture};
use ot_operations::flow::{
    CaptureId, FlowAnonymousFunctionOperation, FlowCaptureReferenceOperation, FlowContextId,
    FlowNodes, StaticLocalInitializationSemaphoreOperation,
};
use ot_operations::shapes::AnonymousFunctionOperation;
use ot_operations::{Child, ConstructionError, Operation, OperationKind, OperationRef};
use ot_span::{FileId, SourceLocus, Span};
use ot_symbols::{LocalId, MethodId, SemanticModelId, TypeId};
use std::sync::Arc;

const DELEGATE: TypeId = TypeId(10);

fn lambda(fixture: TreeFixture) -> Result<OperationRef> {
    let body = fixture.block(vec![fixture.return_statement(Some(fixture.literal(1)?))?])?;
    Ok(Operation::new(
        fixture.value_header(DELEGATE),
        AnonymousFunctionOperation {
            body: Child::eager(body),
            symbol: MethodId(5),
        },
    )?)
}

#[test]
fn test_flow_nodes_are_implicit_and_unbound() -> Result<()> {
    let flow = FlowNodes::new(FlowContextId(1));
    let locus = SourceLocus::new(FileId(0), Span::new(3, 8));

    let reference = flow.capture_reference(locus, CaptureId(2), Some(INT), false)?;
    let caught = flow.caught_exception(locus, EXCEPTION)?;
    let semaphore = flow.static_local_semaphore(locus, LocalId(6), BOOL)?;

    for operation in [&reference, &caught, &semaphore] {
        assert!(operation.is_implicit());
        assert!(operation.kind().is_synthetic());
        assert_eq!(operation.semantic_model(), None);
        assert_eq!(operation.locus(), locus);
        assert_eq!(operation.children().count(), 0);
    }

    let shape = reference
        .downcast::<FlowCaptureReferenceOperation>()
        .expect("capture reference");
    assert_eq!(shape.id, CaptureId(2));
    assert!(!shape.is_initialization);
    assert_eq!(caught.result_type(), Some(EXCEPTION));
    assert_eq!(
        semaphore
            .downcast::<StaticLocalInitializationSemaphoreOperation>()
            .map(|shape| shape.local),
        Some(LocalId(6))
    );
    Ok(())
}

#[test]
fn test_initialization_reference_is_marked() -> Result<()> {
    let flow = FlowNodes::new(FlowContextId(4));
    let locus = SourceLocus::new(FileId(0), Span::new(0, 1));
    let target = flow.capture_reference(locus, CaptureId(3), Some(INT), true)?;
    let read = flow.capture_reference(locus, CaptureId(3), Some(INT), false)?;

    let flags: Vec<_> = [&target, &read]
        .into_iter()
        .filter_map(|operation| operation.downcast::<FlowCaptureReferenceOperation>())
        .map(|shape| (shape.id, shape.is_initialization))
        .collect();
    assert_eq!(flags, [(CaptureId(3), true), (CaptureId(3), false)]);
    assert_eq!(target.kind(), OperationKind::FlowCaptureReference);
    Ok(())
}

#[test]
fn test_is_null_wraps_bound_operand() -> Result<()> {
    let fixture = TreeFixture::new().in_model(Some(SemanticModelId(8)));
    let operand = fixture.local(LocalId(0))?;
    let test = FlowNodes::new(FlowContextId(0)).is_null(operand.clone(), BOOL)?;

    assert_eq!(test.kind(), OperationKind::IsNull);
    assert_eq!(test.result_type(), Some(BOOL));
    assert_eq!(test.locus(), operand.locus());
    assert!(Arc::ptr_eq(&operand.parent().expect("parent"), &test));
    assert!(test.verify_tree().is_empty());
    Ok(())
}

#[test]
fn test_anonymous_function_keeps_original_parent() -> Result<()> {
    let fixture = TreeFixture::new();
    let original = lambda(fixture)?;
    let owner = fixture.expression_statement(original.clone())?;

    let flow = FlowNodes::new(FlowContextId(3));
    let wrapped = flow.anonymous_function(original.clone())?;

    assert_eq!(wrapped.children().count(), 0);
    assert_eq!(wrapped.result_type(), Some(DELEGATE));
    assert!(Arc::ptr_eq(&original.parent().expect("parent"), &owner));

    let shape = wrapped
        .downcast::<FlowAnonymousFunctionOperation>()
        .expect("flow anonymous function");
    assert!(Arc::ptr_eq(shape.original.operation(), &original));
    assert_eq!(shape.context, flow.context());
    Ok(())
}

#[test]
fn test_anonymous_function_requires_a_lambda() -> Result<()> {
    let flow = FlowNodes::new(FlowContextId(0));
    let error = flow
        .anonymous_function(TreeFixture::new().literal(1)?)
        .expect_err("literal is not a function");
    assert!(matches!(
        error,
        ConstructionError::InconsistentAttribute {
            kind: OperationKind::FlowAnonymousFunction,
            attribute: "original",
            ..
        }
    ));
    Ok(())
}
