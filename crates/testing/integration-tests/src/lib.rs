//! Integration test utilities for the operation tree
//!
//! [`TreeFixture`] plays the binder: it builds small bound trees with
//! predictable loci, types and semantic models so the tests can focus on the
//! tree's own guarantees.

use anyhow::Result;
use ot_operations::attributes::BinaryOperatorKind;
use ot_operations::shapes::{
    BinaryOperation, BlockOperation, CatchClauseOperation, ConstantPatternOperation,
    DynamicMemberReferenceOperation, ExpressionStatementOperation, LiteralOperation, LocalReferenceOperation,
    PatternCaseClauseOperation, ReturnOperation, SimpleAssignmentOperation, SwitchCaseOperation,
    SwitchOperation, TryOperation, WhileLoopOperation,
};
use ot_operations::{
    Child, ChildList, Operation, OperationHeader, OperationKind, OperationRef, OptionalChild,
};
use ot_intern::Interner;
use ot_span::{FileId, SourceLocus, Span};
use ot_symbols::{LabelId, LocalId, SemanticModelId, TypeId};

/// Type of integer values in fixtures
pub const INT: TypeId = TypeId(1);

/// Type of boolean values in fixtures
pub const BOOL: TypeId = TypeId(2);

/// Type of exceptions in fixtures
pub const EXCEPTION: TypeId = TypeId(3);

/// Builder for bound trees
///
/// Every node it builds gets the fixture's current locus and semantic model.
/// The fixture is `Copy`, so it can be moved into lazy slot producers.
#[derive(Debug, Clone, Copy)]
pub struct TreeFixture {
    locus: SourceLocus,
    model: Option<SemanticModelId>,
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFixture {
    /// Fixture for file 0 bound by semantic model 0
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locus: SourceLocus::new(FileId(0), Span::new(0, 0)),
            model: Some(SemanticModelId(0)),
        }
    }

    /// Same fixture, placing nodes at `start..end`
    #[must_use]
    pub const fn at(self, start: u32, end: u32) -> Self {
        Self {
            locus: SourceLocus::new(self.locus.file, Span::new(start, end)),
            ..self
        }
    }

    /// Same fixture, recording `model` (or none) on every node
    #[must_use]
    pub const fn in_model(self, model: Option<SemanticModelId>) -> Self {
        Self { model, ..self }
    }

    /// Header for a statement
    #[must_use]
    pub fn statement_header(&self) -> OperationHeader {
        let header = OperationHeader::new(self.locus);
        match self.model {
            Some(model) => header.in_model(model),
            None => header,
        }
    }

    /// Header for an expression of `result_type`
    #[must_use]
    pub fn value_header(&self, result_type: TypeId) -> OperationHeader {
        self.statement_header().with_type(result_type)
    }

    /// Integer literal
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn literal(&self, value: i64) -> Result<OperationRef> {
        Ok(Operation::new(
            self.value_header(INT).with_constant(value),
            LiteralOperation {},
        )?)
    }

    /// Boolean literal
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn boolean(&self, value: bool) -> Result<OperationRef> {
        Ok(Operation::new(
            self.value_header(BOOL).with_constant(value),
            LiteralOperation {},
        )?)
    }

    /// Integer local read
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn local(&self, local: LocalId) -> Result<OperationRef> {
        Ok(Operation::new(
            self.value_header(INT),
            LocalReferenceOperation {
                local,
                is_declaration: false,
            },
        )?)
    }

    /// Late-bound `instance.name`, typed as `result_type`
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn dynamic_member(
        &self,
        interner: &Interner,
        instance: Option<OperationRef>,
        name: &str,
        result_type: TypeId,
    ) -> Result<OperationRef> {
        Ok(Operation::new(
            self.value_header(result_type),
            DynamicMemberReferenceOperation {
                instance: OptionalChild::eager(instance),
                member_name: interner.intern(name),
                type_arguments: Vec::new(),
                containing_type: None,
            },
        )?)
    }

    /// Binary operation; comparisons produce booleans, everything else integers
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn binary(
        &self,
        operator_kind: BinaryOperatorKind,
        left: OperationRef,
        right: OperationRef,
    ) -> Result<OperationRef> {
        let result_type = if operator_kind.is_comparison() { BOOL } else { INT };
        Ok(Operation::new(
            self.value_header(result_type),
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
        )?)
    }

    /// `target = value` as a statement
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn assignment_statement(&self, target: OperationRef, value: OperationRef) -> Result<OperationRef> {
        let assignment = Operation::new(
            self.value_header(INT),
            SimpleAssignmentOperation {
                target: Child::eager(target),
                value: Child::eager(value),
                is_ref: false,
            },
        )?;
        self.expression_statement(assignment)
    }

    /// Expression evaluated as a statement
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn expression_statement(&self, operation: OperationRef) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            ExpressionStatementOperation {
                operation: Child::eager(operation),
            },
        )?)
    }

    /// Block over already-built statements
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn block(&self, statements: Vec<OperationRef>) -> Result<OperationRef> {
        self.block_with(ChildList::eager(statements))
    }

    /// Block over an arbitrary statement slot
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn block_with(&self, operations: ChildList) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            BlockOperation {
                operations,
                locals: Vec::new(),
            },
        )?)
    }

    /// Return statement
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn return_statement(&self, value: Option<OperationRef>) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            ReturnOperation {
                kind: OperationKind::Return,
                returned_value: OptionalChild::eager(value),
            },
        )?)
    }

    /// `while (condition) body` or `do body while (condition)`
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn while_loop(&self, condition: OperationRef, body: OperationRef, condition_is_top: bool) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            WhileLoopOperation {
                condition: OptionalChild::eager(Some(condition)),
                body: Child::eager(body),
                ignored_condition: OptionalChild::default(),
                condition_is_top,
                condition_is_until: false,
                locals: Vec::new(),
                continue_label: LabelId(0),
                exit_label: LabelId(1),
            },
        )?)
    }

    /// Catch clause catching fixture exceptions
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn catch_clause(&self, handler: OperationRef) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            CatchClauseOperation {
                exception_declaration_or_expression: OptionalChild::default(),
                filter: OptionalChild::default(),
                handler: Child::eager(handler),
                exception_type: EXCEPTION,
                locals: Vec::new(),
            },
        )?)
    }

    /// Try statement
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn try_statement(
        &self,
        body: OperationRef,
        catches: Vec<OperationRef>,
        finally: Option<OperationRef>,
    ) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            TryOperation {
                body: Child::eager(body),
                catches: ChildList::eager(catches),
                finally: OptionalChild::eager(finally),
                exit_label: None,
            },
        )?)
    }

    /// Pattern matching the integer constant `value`
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn constant_pattern(&self, value: i64) -> Result<OperationRef> {
        let constant = self.literal(value)?;
        Ok(Operation::new(
            self.statement_header(),
            ConstantPatternOperation {
                value: Child::eager(constant),
                input_type: INT,
                narrowed_type: INT,
            },
        )?)
    }

    /// `case pattern when guard:`
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn pattern_case_clause(
        &self,
        pattern: OperationRef,
        guard: Option<OperationRef>,
        label: LabelId,
    ) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            PatternCaseClauseOperation {
                pattern: Child::eager(pattern),
                guard: OptionalChild::eager(guard),
                label,
            },
        )?)
    }

    /// Switch section with an optional combined condition
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn switch_case(
        &self,
        clauses: Vec<OperationRef>,
        body: Vec<OperationRef>,
        condition: Option<OperationRef>,
    ) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            SwitchCaseOperation {
                clauses: ChildList::eager(clauses),
                body: ChildList::eager(body),
                condition: OptionalChild::eager(condition),
                locals: Vec::new(),
            },
        )?)
    }

    /// Switch statement
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails
    pub fn switch(&self, value: OperationRef, cases: Vec<OperationRef>) -> Result<OperationRef> {
        Ok(Operation::new(
            self.statement_header(),
            SwitchOperation {
                value: Child::eager(value),
                cases: ChildList::eager(cases),
                locals: Vec::new(),
                exit_label: LabelId(99),
            },
        )?)
    }
}

/// Kinds of `operations`, in order
#[must_use]
pub fn kinds<'a>(operations: impl IntoIterator<Item = &'a OperationRef>) -> Vec<OperationKind> {
    operations.into_iter().map(|operation| operation.kind()).collect()
}
