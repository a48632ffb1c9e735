//! Visitor dispatch and tree dumps

use anyhow::Result;
use expect_test::expect;
use integration_tests::{INT, TreeFixture};
use ot_intern::Interner;
use ot_operations::attributes::BinaryOperatorKind;
use ot_operations::flow::{CaptureId, FlowCaptureOperation, FlowContextId, FlowNodes};
use ot_operations::shapes::{
    DynamicMemberReferenceOperation, LocalReferenceOperation, ReturnOperation,
};
use ot_operations::visitor::{fold_children, walk_children};
use ot_operations::{
    Operation, OperationFolder, OperationKind, OperationRef, OperationVisitor, dump,
};
use ot_symbols::LocalId;

fn sample_body(fixture: TreeFixture) -> Result<OperationRef> {
    let target = fixture.at(0, 1).local(LocalId(0))?;
    let sum = fixture.at(4, 9).binary(
        BinaryOperatorKind::Add,
        fixture.at(4, 5).literal(1)?,
        fixture.at(8, 9).literal(2)?,
    )?;
    let statement = fixture.at(0, 10).assignment_statement(target, sum)?;
    let result = fixture.at(11, 12).return_statement(None)?;
    fixture.at(0, 12).block(vec![statement, result])
}

#[test]
fn test_dump_renders_slots_and_attributes() -> Result<()> {
    let body = sample_body(TreeFixture::new())?;
    expect![[r#"
        Block @ file#0@0..12 locals=[]
          operations:
            ExpressionStatement @ file#0@0..10
              operation:
                SimpleAssignment type=type#1 @ file#0@0..10 is_ref=false
                  target:
                    LocalReference type=type#1 @ file#0@0..1 local=LocalId(0) is_declaration=false
                  value:
                    Binary type=type#1 @ file#0@4..9 operator_kind=Add is_lifted=false is_checked=false is_compare_text=false operator_method=None unary_operator_method=None
                      left_operand:
                        Literal type=type#1 constant=1 @ file#0@4..5
                      right_operand:
                        Literal type=type#1 constant=2 @ file#0@8..9
            Return @ file#0@11..12
              returned_value: <empty>
    "#]]
    .assert_eq(&dump(&body));
    Ok(())
}

#[test]
fn test_dump_marks_implicit_nodes() -> Result<()> {
    let flow = FlowNodes::new(FlowContextId(0));
    let value = TreeFixture::new().at(2, 3).in_model(None).literal(5)?;
    let capture = flow.capture(CaptureId(4), value)?;
    expect![[r#"
        FlowCapture implicit @ file#0@2..3 id=CaptureId(4)
          value:
            Literal type=type#1 constant=5 @ file#0@2..3
    "#]]
    .assert_eq(&dump(&capture));
    Ok(())
}

/// Records which visit method each node reached
#[derive(Default)]
struct Router {
    routes: Vec<(&'static str, OperationKind)>,
}

impl OperationVisitor for Router {
    fn visit_return(&mut self, operation: &Operation, shape: &ReturnOperation) {
        assert_eq!(shape.kind, operation.kind());
        self.routes.push(("return", operation.kind()));
        self.default_visit(operation);
    }

    fn visit_local_reference(&mut self, operation: &Operation, shape: &LocalReferenceOperation) {
        assert!(!shape.is_declaration);
        self.routes.push(("local", operation.kind()));
    }

    fn visit_flow_capture(&mut self, operation: &Operation, _shape: &FlowCaptureOperation) {
        self.routes.push(("capture", operation.kind()));
        self.default_visit(operation);
    }

    fn default_visit(&mut self, operation: &Operation) {
        walk_children(self, operation);
    }
}

#[test]
fn test_shared_shape_kinds_reach_one_method() -> Result<()> {
    let fixture = TreeFixture::new();
    let returned = fixture.return_statement(Some(fixture.local(LocalId(3))?))?;
    let yield_break = Operation::new(
        fixture.statement_header(),
        ReturnOperation {
            kind: OperationKind::YieldBreak,
            returned_value: ot_operations::OptionalChild::default(),
        },
    )?;
    let flow = FlowNodes::new(FlowContextId(2));
    let capture = flow.capture(CaptureId(0), fixture.in_model(None).local(LocalId(4))?)?;
    let body = fixture.block(vec![returned, yield_break, fixture.expression_statement(capture)?])?;

    let mut router = Router::default();
    body.accept(&mut router);
    assert_eq!(
        router.routes,
        [
            ("return", OperationKind::Return),
            ("local", OperationKind::LocalReference),
            ("return", OperationKind::YieldBreak),
            ("capture", OperationKind::FlowCapture),
            ("local", OperationKind::LocalReference),
        ]
    );
    Ok(())
}

/// Counts nodes below a depth limit passed as the folder argument
struct DepthLimitedCounter;

impl OperationFolder<usize> for DepthLimitedCounter {
    type Output = usize;

    fn visit_dynamic_member_reference(
        &mut self,
        _operation: &Operation,
        _shape: &DynamicMemberReferenceOperation,
        _remaining: usize,
    ) -> usize {
        // Late-bound members are opaque to the count.
        0
    }

    fn default_visit(&mut self, operation: &Operation, remaining: usize) -> usize {
        if remaining == 0 {
            return 0;
        }
        1 + fold_children(self, operation, &(remaining - 1)).into_iter().sum::<usize>()
    }
}

#[test]
fn test_folder_argument_reaches_every_level() -> Result<()> {
    let body = sample_body(TreeFixture::new())?;
    assert_eq!(body.accept_with(&mut DepthLimitedCounter, 1), 1);
    assert_eq!(body.accept_with(&mut DepthLimitedCounter, 2), 3);
    assert_eq!(body.accept_with(&mut DepthLimitedCounter, usize::MAX), 1 + body.descendants().count());

    let interner = Interner::new();
    let fixture = TreeFixture::new();
    let member = fixture.dynamic_member(&interner, Some(fixture.local(LocalId(0))?), "Length", INT)?;
    let statement = fixture.expression_statement(member)?;
    assert_eq!(statement.accept_with(&mut DepthLimitedCounter, usize::MAX), 1);
    assert_eq!(interner.get("Length").map(|symbol| interner.resolve(&symbol).to_owned()), Some("Length".to_owned()));
    Ok(())
}
