//! Kind taxonomy, shape coverage and construction-time checks

use anyhow::Result;
use integration_tests::{INT, TreeFixture};
use ot_operations::attributes::{BinaryOperatorKind, LoopKind};
use ot_operations::flow::{FlowContextId, FlowNodes};
use ot_operations::shape::descriptor_for;
use ot_operations::shapes::{
    FieldInitializerOperation, IncrementOrDecrementOperation, LiteralOperation,
    TupleBinaryOperation,
};
use ot_operations::{
    Child, ConstructionError, KindFamily, Operation, OperationHeader, OperationKind,
    OperationPayload,
};
use ot_symbols::{FieldId, LocalId, MethodId, SemanticModelId};
use rustc_hash::FxHashSet;

#[test]
fn test_kind_catalogue() {
    assert_eq!(OperationKind::ALL.len(), 138);
    let unique: FxHashSet<_> = OperationKind::ALL.iter().map(|kind| kind.name()).collect();
    assert_eq!(unique.len(), OperationKind::ALL.len());

    let synthetic: Vec<_> = OperationKind::in_family(KindFamily::Synthetic).collect();
    assert_eq!(
        synthetic,
        [
            OperationKind::FlowCapture,
            OperationKind::FlowCaptureReference,
            OperationKind::IsNull,
            OperationKind::CaughtException,
            OperationKind::FlowAnonymousFunction,
            OperationKind::StaticLocalInitializationSemaphore,
        ]
    );
    assert!(synthetic.iter().all(|kind| kind.is_synthetic()));
    assert!(!OperationKind::Binary.is_synthetic());
}

#[test]
fn test_kind_predicates() {
    assert!(OperationKind::Block.is_statement());
    assert!(OperationKind::MethodBody.is_statement());
    assert!(!OperationKind::Literal.is_statement());

    let loops: Vec<_> = OperationKind::ALL.iter().filter(|kind| kind.is_loop()).collect();
    assert_eq!(loops.len(), 4);
    assert_eq!(LoopKind::of(OperationKind::ForEachLoop), Some(LoopKind::ForEach));
    assert_eq!(LoopKind::of(OperationKind::Block), None);

    for clause in [OperationKind::SwitchCase, OperationKind::CatchClause, OperationKind::ReDimClause] {
        assert_eq!(clause.family(), KindFamily::Statement);
        assert!(clause.is_statement(), "{clause} is a statement");
    }

    assert!(OperationKind::DefaultCaseClause.is_case_clause());
    assert!(OperationKind::ListPattern.is_pattern());
    assert!(!OperationKind::SwitchExpressionArm.is_case_clause());
}

#[test]
fn test_every_kind_routes_to_one_visit_method() {
    let mut methods = FxHashSet::default();
    for descriptor in OperationPayload::SHAPES {
        assert!(descriptor.visit_method.starts_with("visit_"));
        assert!(methods.insert(descriptor.visit_method), "{} reused", descriptor.visit_method);
    }
    for kind in OperationKind::ALL {
        let descriptor = descriptor_for(*kind).expect("every kind has a shape");
        assert!(descriptor.kinds.contains(kind));
    }
    assert_eq!(
        descriptor_for(OperationKind::Decrement).map(|descriptor| descriptor.visit_method),
        Some("visit_increment_or_decrement")
    );
}

#[test]
fn test_shared_shape_accepts_each_of_its_kinds() -> Result<()> {
    let fixture = TreeFixture::new();
    for kind in [OperationKind::Increment, OperationKind::Decrement] {
        let operation = Operation::new(
            fixture.value_header(INT),
            IncrementOrDecrementOperation {
                kind,
                target: Child::eager(fixture.local(LocalId(0))?),
                is_postfix: true,
                is_lifted: false,
                is_checked: false,
                operator_method: None,
            },
        )?;
        assert_eq!(operation.kind(), kind);
    }

    let error = Operation::new(
        fixture.value_header(INT),
        IncrementOrDecrementOperation {
            kind: OperationKind::Unary,
            target: Child::eager(fixture.local(LocalId(0))?),
            is_postfix: false,
            is_lifted: false,
            is_checked: false,
            operator_method: None,
        },
    )
    .expect_err("unary is not an increment");
    assert_eq!(
        error,
        ConstructionError::KindMismatch {
            shape: "IncrementOrDecrementOperation",
            kind: OperationKind::Unary,
        }
    );
    Ok(())
}

#[test]
fn test_checked_user_defined_increment_is_rejected() -> Result<()> {
    let fixture = TreeFixture::new();
    let increment = |is_checked: bool, operator_method: Option<MethodId>| -> Result<_> {
        Ok(Operation::new(
            fixture.value_header(INT),
            IncrementOrDecrementOperation {
                kind: OperationKind::Decrement,
                target: Child::eager(fixture.local(LocalId(0))?),
                is_postfix: false,
                is_lifted: false,
                is_checked,
                operator_method,
            },
        ))
    };

    assert!(increment(true, None)?.is_ok());
    assert!(increment(false, Some(MethodId(2)))?.is_ok());
    let error = increment(true, Some(MethodId(2)))?.expect_err("checked user-defined operator");
    assert!(matches!(
        error,
        ConstructionError::InconsistentAttribute {
            kind: OperationKind::Decrement,
            attribute: "is_checked",
            ..
        }
    ));
    Ok(())
}

#[test]
fn test_rejected_node_leaves_children_unattached() -> Result<()> {
    let fixture = TreeFixture::new();
    let left = fixture.local(LocalId(0))?;
    let right = fixture.local(LocalId(1))?;
    let error = Operation::new(
        fixture.value_header(INT),
        TupleBinaryOperation {
            left_operand: Child::eager(left.clone()),
            right_operand: Child::eager(right.clone()),
            operator_kind: BinaryOperatorKind::Add,
        },
    )
    .expect_err("tuples only compare for equality");
    assert!(matches!(
        error,
        ConstructionError::InconsistentAttribute {
            kind: OperationKind::TupleBinary,
            attribute: "operator_kind",
            ..
        }
    ));
    assert!(left.parent().is_none());
    assert!(right.parent().is_none());
    Ok(())
}

#[test]
fn test_header_checks() {
    let fixture = TreeFixture::new();

    let initializer = Operation::new(
        fixture.statement_header().with_constant(1_i64),
        FieldInitializerOperation {
            value: Child::eager(fixture.literal(1).expect("literal")),
            initialized_fields: vec![FieldId(0)],
            locals: Vec::new(),
        },
    );
    assert!(initializer.is_ok(), "declarations are not statements");

    let missing = Operation::new(
        fixture.statement_header(),
        FieldInitializerOperation {
            value: Child::eager(fixture.literal(1).expect("literal")),
            initialized_fields: Vec::new(),
            locals: Vec::new(),
        },
    )
    .expect_err("no fields");
    assert!(matches!(missing, ConstructionError::MissingAttribute { kind: OperationKind::FieldInitializer, .. }));

    let untyped_literal = Operation::new(OperationHeader::new(fixture.statement_header().locus), LiteralOperation {})
        .expect_err("no constant");
    assert_eq!(untyped_literal.to_string(), "Literal requires constant value");
}

#[test]
fn test_statement_clauses_reject_values() -> Result<()> {
    let fixture = TreeFixture::new();
    for kind in [OperationKind::SwitchCase, OperationKind::CatchClause, OperationKind::ReDimClause] {
        assert_eq!(
            fixture.value_header(INT).validate_for(kind),
            Err(ConstructionError::StatementWithValue { kind })
        );
        assert_eq!(fixture.statement_header().validate_for(kind), Ok(()));
    }

    let error = Operation::new(
        fixture.value_header(INT),
        ot_operations::shapes::CatchClauseOperation {
            exception_declaration_or_expression: ot_operations::OptionalChild::default(),
            filter: ot_operations::OptionalChild::default(),
            handler: Child::eager(fixture.block(Vec::new())?),
            exception_type: integration_tests::EXCEPTION,
            locals: Vec::new(),
        },
    )
    .expect_err("typed catch clause");
    assert_eq!(error, ConstructionError::StatementWithValue { kind: OperationKind::CatchClause });
    Ok(())
}

#[test]
fn test_synthetic_nodes_reject_semantic_models() -> Result<()> {
    let fixture = TreeFixture::new().in_model(Some(SemanticModelId(3)));
    let error = Operation::new(
        fixture.value_header(INT),
        ot_operations::flow::IsNullOperation {
            operand: Child::eager(fixture.local(LocalId(0))?),
        },
    )
    .expect_err("synthetic node bound by a model");
    assert_eq!(error, ConstructionError::SyntheticWithSemanticModel { kind: OperationKind::IsNull });

    let flow = FlowNodes::new(FlowContextId(1));
    let is_null = flow.is_null(fixture.local(LocalId(0))?, integration_tests::BOOL)?;
    assert!(is_null.is_implicit());
    assert_eq!(is_null.semantic_model(), None);
    Ok(())
}
