//! Double-dispatch visitor protocol
//!
//! [`Operation::accept`] hands the node to the visitor method of its shape,
//! so consumers never switch on the kind themselves. Methods a visitor does
//! not override fall through to `default_visit`; a visitor that wants a full
//! traversal calls [`walk_children`] from there.

use crate::node::Operation;

pub use crate::shapes::{OperationFolder, OperationVisitor};

/// Visits every child of `operation` in evaluation order
pub fn walk_children<V: OperationVisitor + ?Sized>(visitor: &mut V, operation: &Operation) {
    for child in operation.children() {
        child.accept(visitor);
    }
}

/// Folds every child of `operation` in evaluation order, passing each the
/// same argument
pub fn fold_children<A: Clone, V: OperationFolder<A> + ?Sized>(
    visitor: &mut V,
    operation: &Operation,
    argument: &A,
) -> Vec<V::Output> {
    operation
        .children()
        .map(|child| child.accept_with(visitor, argument.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::BinaryOperatorKind;
    use crate::node::OperationRef;
    use crate::shapes::{BinaryOperation, ExpressionStatementOperation, LiteralOperation};
    use crate::slot::Child;
    use crate::{ConstantValue, OperationHeader, OperationKind};
    use ot_span::{FileId, SourceLocus, Span};
    use ot_symbols::TypeId;

    fn header() -> OperationHeader {
        OperationHeader::new(SourceLocus::new(FileId(0), Span::new(0, 9)))
    }

    fn literal(value: i64) -> OperationRef {
        Operation::new(header().with_type(TypeId(0)).with_constant(value), LiteralOperation {}).expect("literal")
    }

    fn binary(operator_kind: BinaryOperatorKind, left: OperationRef, right: OperationRef) -> OperationRef {
        Operation::new(
            header().with_type(TypeId(0)),
            BinaryOperation {
                left_operand: Child::eager(left),
                right_operand: Child::eager(right),
                operator_kind,
                is_lifted: false,
                is_checked: false,
                is_compare_text: false,
                operator_method: None,
                unary_operator_method: None,
            },
        )
        .expect("binary")
    }

    /// (1 + 2) * 4 as a statement
    fn statement() -> OperationRef {
        let sum = binary(BinaryOperatorKind::Add, literal(1), literal(2));
        let product = binary(BinaryOperatorKind::Multiply, sum, literal(4));
        Operation::new(
            header(),
            ExpressionStatementOperation {
                operation: Child::eager(product),
            },
        )
        .expect("statement")
    }

    #[derive(Default)]
    struct OperatorCollector {
        operators: Vec<BinaryOperatorKind>,
        visited: Vec<OperationKind>,
    }

    impl OperationVisitor for OperatorCollector {
        fn visit_binary(&mut self, operation: &Operation, shape: &BinaryOperation) {
            self.operators.push(shape.operator_kind);
            self.default_visit(operation);
        }

        fn default_visit(&mut self, operation: &Operation) {
            self.visited.push(operation.kind());
            walk_children(self, operation);
        }
    }

    #[test]
    fn test_visitor_dispatches_by_shape() {
        let mut collector = OperatorCollector::default();
        statement().accept(&mut collector);

        assert_eq!(collector.operators, [BinaryOperatorKind::Multiply, BinaryOperatorKind::Add]);
        assert_eq!(
            collector.visited,
            [
                OperationKind::ExpressionStatement,
                OperationKind::Binary,
                OperationKind::Binary,
                OperationKind::Literal,
                OperationKind::Literal,
                OperationKind::Literal,
            ]
        );
    }

    /// Evaluates integer arithmetic, scaling every literal by the argument
    struct Evaluator;

    impl OperationFolder<i64> for Evaluator {
        type Output = Option<i64>;

        fn visit_literal(&mut self, operation: &Operation, _shape: &LiteralOperation, scale: i64) -> Option<i64> {
            operation.constant_value().and_then(ConstantValue::as_i64).map(|value| value * scale)
        }

        fn visit_binary(&mut self, operation: &Operation, shape: &BinaryOperation, scale: i64) -> Option<i64> {
            let values = fold_children(self, operation, &scale);
            let (left, right) = (values[0]?, values[1]?);
            match shape.operator_kind {
                BinaryOperatorKind::Add => left.checked_add(right),
                BinaryOperatorKind::Multiply => left.checked_mul(right),
                _ => None,
            }
        }

        fn default_visit(&mut self, operation: &Operation, scale: i64) -> Option<i64> {
            operation.children().next().and_then(|child| child.accept_with(self, scale))
        }
    }

    #[test]
    fn test_folder_threads_argument_and_result() {
        let root = statement();
        assert_eq!(root.accept_with(&mut Evaluator, 1), Some(12));
        assert_eq!(root.accept_with(&mut Evaluator, 2), Some(48));
    }
}
