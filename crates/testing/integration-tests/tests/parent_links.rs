//! Parent-link invariant
//!
//! Every child reachable through `children()` points back at the node that
//! installed it, exactly once. The detached switch-case condition and the
//! semantic-model exemption of synthetic nodes are checked explicitly.

use anyhow::Result;
use integration_tests::TreeFixture;
use ot_operations::attributes::BinaryOperatorKind;
use ot_operations::flow::{CaptureId, FlowContextId, FlowNodes};
use ot_operations::{Operation, OperationKind, OperationRef, OperationTreeExt};
use ot_symbols::{LabelId, LocalId, SemanticModelId};
use std::sync::Arc;

fn method_body(fixture: TreeFixture) -> Result<OperationRef> {
    let condition = fixture.binary(
        BinaryOperatorKind::LessThan,
        fixture.local(LocalId(0))?,
        fixture.literal(10)?,
    )?;
    let increment = fixture.assignment_statement(
        fixture.local(LocalId(0))?,
        fixture.binary(BinaryOperatorKind::Add, fixture.local(LocalId(0))?, fixture.literal(1)?)?,
    )?;
    let body = fixture.block(vec![increment])?;
    let loop_statement = fixture.while_loop(condition, body, true)?;
    let result = fixture.return_statement(Some(fixture.local(LocalId(0))?))?;
    fixture.block(vec![loop_statement, result])
}

#[test]
fn test_every_child_points_at_its_installer() -> Result<()> {
    let root = method_body(TreeFixture::new())?;

    let mut checked = 0;
    for operation in root.descendants_and_self() {
        for child in operation.children() {
            let parent = child.parent().expect("installed child has a parent");
            assert!(Arc::ptr_eq(&parent, &operation), "{:?} under {:?}", child.kind(), operation.kind());
            checked += 1;
        }
    }
    assert_eq!(checked, root.descendants().count());
    assert!(root.parent().is_none());
    assert!(root.verify_tree().is_empty());
    Ok(())
}

#[test]
fn test_switch_case_condition_stays_detached() -> Result<()> {
    let fixture = TreeFixture::new();
    let clause = fixture.pattern_case_clause(fixture.constant_pattern(1)?, None, LabelId(4))?;
    let condition = fixture.binary(
        BinaryOperatorKind::Equals,
        fixture.local(LocalId(2))?,
        fixture.literal(1)?,
    )?;
    let body = fixture.return_statement(None)?;
    let section = fixture.switch_case(vec![clause.clone()], vec![body.clone()], Some(condition.clone()))?;

    let children: Vec<_> = section.children().cloned().collect();
    assert_eq!(children.len(), 2);
    assert!(Arc::ptr_eq(&children[0], &clause));
    assert!(Arc::ptr_eq(&children[1], &body));
    assert!(children.iter().all(|child| !Arc::ptr_eq(child, &condition)));

    assert!(condition.parent().is_none());
    let shape = section
        .downcast::<ot_operations::shapes::SwitchCaseOperation>()
        .expect("switch case shape");
    assert!(Arc::ptr_eq(&shape.condition.get().clone().expect("condition"), &condition));

    // The condition's own children are still linked to it.
    for child in condition.children() {
        assert!(Arc::ptr_eq(&child.parent().expect("parent"), &condition));
    }

    let switch = fixture.switch(fixture.local(LocalId(2))?, vec![section])?;
    assert!(switch.verify_tree().is_empty());
    Ok(())
}

#[test]
fn test_synthetic_nodes_are_exempt_from_model_agreement() -> Result<()> {
    let bound = TreeFixture::new().in_model(Some(SemanticModelId(5)));
    let flow = FlowNodes::new(FlowContextId(0));

    let value = bound.literal(3)?;
    let capture = flow.capture(CaptureId(0), value.clone())?;
    assert_eq!(capture.semantic_model(), None);
    assert_eq!(value.semantic_model(), Some(SemanticModelId(5)));
    assert!(Arc::ptr_eq(&value.parent().expect("parent"), &capture));
    assert!(capture.verify_tree().is_empty());
    Ok(())
}

#[test]
fn test_parent_is_stamped_once() -> Result<()> {
    let fixture = TreeFixture::new();
    let literal = fixture.literal(1)?;
    let statement = fixture.expression_statement(literal.clone())?;
    let block = fixture.block(vec![statement.clone()])?;

    assert!(Arc::ptr_eq(&literal.parent().expect("parent"), &statement));
    assert!(Arc::ptr_eq(&statement.parent().expect("parent"), &block));
    assert!(Arc::ptr_eq(&literal.root(), &block));
    Ok(())
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "parent link of Literal")]
fn test_shared_child_panics_in_debug_builds() {
    let fixture = TreeFixture::new();
    let literal = fixture.literal(1).expect("literal");
    let _first = fixture.expression_statement(literal.clone()).expect("first owner");
    let _second = fixture.expression_statement(literal);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "parent link of Literal")]
fn test_lazy_publication_of_owned_node_panics_in_debug_builds() {
    let fixture = TreeFixture::new();
    let literal = fixture.literal(7).expect("literal");
    let _owner = fixture.expression_statement(literal.clone()).expect("owner");

    let block = fixture
        .block_with(ot_operations::ChildList::lazy(move || vec![literal.clone()]))
        .expect("lazy block");
    let _ = block.children().count();
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "belongs to")]
fn test_model_mismatch_panics_in_debug_builds() {
    let first = TreeFixture::new().in_model(Some(SemanticModelId(1)));
    let second = TreeFixture::new().in_model(Some(SemanticModelId(2)));
    let literal = first.literal(1).expect("literal");
    let _statement = second.expression_statement(literal);
}

#[cfg(not(debug_assertions))]
#[test]
fn test_verify_tree_reports_shared_nodes_in_release_builds() -> Result<()> {
    use ot_operations::ParentLinkViolation;

    let fixture = TreeFixture::new();
    let literal = fixture.literal(1)?;
    let first = fixture.expression_statement(literal.clone())?;
    let second = fixture.expression_statement(literal)?;
    let block = fixture.block(vec![first, second])?;

    let violations = block.verify_tree();
    assert!(violations.contains(&ParentLinkViolation::WrongParent {
        child: OperationKind::Literal,
        expected: OperationKind::ExpressionStatement,
        actual: Some(OperationKind::ExpressionStatement),
    }));
    assert!(violations.contains(&ParentLinkViolation::SharedNode {
        child: OperationKind::Literal
    }));
    Ok(())
}

#[test]
fn test_unattached_node_reports_no_parent() -> Result<()> {
    let operation = TreeFixture::new().literal(1)?;
    assert!(operation.parent().is_none());
    assert_eq!(operation.ancestors().count(), 0);
    assert_eq!(operation.kind(), OperationKind::Literal);
    let _: &Operation = &operation;
    Ok(())
}
