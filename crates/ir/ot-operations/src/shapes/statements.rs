//! Statement, clause and control-flow shapes

use crate::attributes::{BranchKind, ForEachLoopInfo, LoopKind};
use crate::slot::{Child, ChildList, OptionalChild, SlotView};
use ot_derive::Shape;
use ot_symbols::{EventId, LabelId, LocalId, MethodId, TypeId};

/// Statement list with its own scope
#[derive(Debug, Shape)]
#[shape(kind = Block)]
pub struct BlockOperation {
    /// Statements in order
    pub operations: ChildList,
    /// Locals declared directly in the block
    pub locals: Vec<LocalId>,
}

/// Several declarations in one statement
#[derive(Debug, Shape)]
#[shape(kind = VariableDeclarationGroup)]
pub struct VariableDeclarationGroupOperation {
    /// The declarations
    pub declarations: ChildList,
}

/// Switch statement
#[derive(Debug, Shape)]
#[shape(kind = Switch)]
pub struct SwitchOperation {
    /// Value being switched on
    pub value: Child,
    /// Sections in source order
    pub cases: ChildList,
    /// Locals scoped to the switch
    pub locals: Vec<LocalId>,
    /// Label jumped to by `break`
    pub exit_label: LabelId,
}

/// One section of a switch statement
///
/// `condition` is the combined test of the section's clauses. It is built
/// from values the clauses already own, so it is held detached: it is not a
/// child, and its root never receives a parent.
#[derive(Debug, Shape)]
#[shape(kind = SwitchCase)]
pub struct SwitchCaseOperation {
    /// Case clauses
    pub clauses: ChildList,
    /// Statements of the section
    pub body: ChildList,
    /// Combined condition of all clauses, when the language produces one
    #[slot(detached)]
    pub condition: OptionalChild,
    /// Locals scoped to the section
    pub locals: Vec<LocalId>,
}

/// While, do-while and do-until loops
#[derive(Debug, Shape)]
#[shape(kind = WhileLoop, order = slot_in_evaluation_order)]
pub struct WhileLoopOperation {
    /// Loop condition; absent for an unconditional `do ... loop`
    pub condition: OptionalChild,
    /// Loop body
    pub body: Child,
    /// Second condition of a do loop written with conditions at both ends
    pub ignored_condition: OptionalChild,
    /// Condition is tested before the body
    pub condition_is_top: bool,
    /// Loop runs until the condition becomes true
    pub condition_is_until: bool,
    /// Locals scoped to the loop
    pub locals: Vec<LocalId>,
    /// Target of `continue`
    pub continue_label: LabelId,
    /// Target of `break`
    pub exit_label: LabelId,
}

impl WhileLoopOperation {
    /// Loop discriminator
    #[must_use]
    pub const fn loop_kind(&self) -> LoopKind {
        LoopKind::While
    }

    // A bottom-tested loop runs its body before the condition.
    fn slot_in_evaluation_order(&self, index: usize) -> Option<SlotView<'_>> {
        match (index, self.condition_is_top) {
            (0, true) | (1, false) => Some(SlotView::new("condition", self.condition.as_slice())),
            (1, true) | (0, false) => Some(SlotView::new("body", self.body.as_slice())),
            (2, _) => Some(SlotView::new("ignored_condition", self.ignored_condition.as_slice())),
            _ => None,
        }
    }
}

/// Counted loop
#[derive(Debug, Shape)]
#[shape(kind = ForLoop)]
pub struct ForLoopOperation {
    /// Initializer statements
    pub before: ChildList,
    /// Loop condition, if written
    pub condition: OptionalChild,
    /// Loop body
    pub body: Child,
    /// Increment statements run after each iteration
    pub at_loop_bottom: ChildList,
    /// Locals declared by the initializers
    pub locals: Vec<LocalId>,
    /// Locals declared inside the condition
    pub condition_locals: Vec<LocalId>,
    /// Target of `continue`
    pub continue_label: LabelId,
    /// Target of `break`
    pub exit_label: LabelId,
}

impl ForLoopOperation {
    /// Loop discriminator
    #[must_use]
    pub const fn loop_kind(&self) -> LoopKind {
        LoopKind::For
    }
}

/// Range loop from an initial value to a limit
#[derive(Debug, Shape)]
#[shape(kind = ForToLoop)]
pub struct ForToLoopOperation {
    /// Control variable
    pub loop_control_variable: Child,
    /// Initial value
    pub initial_value: Child,
    /// Limit value
    pub limit_value: Child,
    /// Step value
    pub step_value: Child,
    /// Loop body
    pub body: Child,
    /// Variables named after `Next`
    pub next_variables: ChildList,
    /// Increment is overflow-checked
    pub is_checked: bool,
    /// Locals scoped to the loop
    pub locals: Vec<LocalId>,
    /// Target of `continue`
    pub continue_label: LabelId,
    /// Target of `break`
    pub exit_label: LabelId,
}

impl ForToLoopOperation {
    /// Loop discriminator
    #[must_use]
    pub const fn loop_kind(&self) -> LoopKind {
        LoopKind::ForTo
    }
}

/// Collection loop
#[derive(Debug, Shape)]
#[shape(kind = ForEachLoop)]
pub struct ForEachLoopOperation {
    /// Collection being enumerated
    pub collection: Child,
    /// Control variable or deconstruction target
    pub loop_control_variable: Child,
    /// Loop body
    pub body: Child,
    /// Variables named after `Next`
    pub next_variables: ChildList,
    /// Asynchronous enumeration
    pub is_asynchronous: bool,
    /// Enumeration members; absent in erroneous code
    pub info: Option<ForEachLoopInfo>,
    /// Locals scoped to the loop
    pub locals: Vec<LocalId>,
    /// Target of `continue`
    pub continue_label: LabelId,
    /// Target of `break`
    pub exit_label: LabelId,
}

impl ForEachLoopOperation {
    /// Loop discriminator
    #[must_use]
    pub const fn loop_kind(&self) -> LoopKind {
        LoopKind::ForEach
    }
}

/// Labeled statement
#[derive(Debug, Shape)]
#[shape(kind = Labeled)]
pub struct LabeledOperation {
    /// Statement after the label, if any
    pub operation: OptionalChild,
    /// The label
    pub label: LabelId,
}

/// Goto, break or continue
#[derive(Debug, Shape)]
#[shape(kind = Branch)]
pub struct BranchOperation {
    /// Jump target
    pub target: LabelId,
    /// Kind of jump
    pub branch_kind: BranchKind,
}

/// Empty statement
#[derive(Debug, Shape)]
#[shape(kind = Empty)]
pub struct EmptyOperation {}

/// Return, yield return and yield break
#[derive(Debug, Shape)]
#[shape(kinds(Return, YieldReturn, YieldBreak))]
pub struct ReturnOperation {
    /// Which of the three statements this is
    pub kind: crate::OperationKind,
    /// Returned or yielded value
    pub returned_value: OptionalChild,
}

/// Lock statement
#[derive(Debug, Shape)]
#[shape(kind = Lock)]
pub struct LockOperation {
    /// Value locked on
    pub locked_value: Child,
    /// Protected body
    pub body: Child,
    /// Compiler local recording whether the lock was taken
    pub lock_taken_symbol: Option<LocalId>,
}

/// Try statement
#[derive(Debug, Shape)]
#[shape(kind = Try)]
pub struct TryOperation {
    /// Protected block
    pub body: Child,
    /// Catch clauses
    pub catches: ChildList,
    /// Finally block
    pub finally: OptionalChild,
    /// Label at the end of the statement, where the language has one
    pub exit_label: Option<LabelId>,
}

/// Catch clause
#[derive(Debug, Shape)]
#[shape(kind = CatchClause)]
pub struct CatchClauseOperation {
    /// Exception variable declaration or target expression
    pub exception_declaration_or_expression: OptionalChild,
    /// Exception filter
    pub filter: OptionalChild,
    /// Handler block
    pub handler: Child,
    /// Type of exceptions caught
    pub exception_type: TypeId,
    /// Locals scoped to the clause
    pub locals: Vec<LocalId>,
}

/// Using statement with a body
#[derive(Debug, Shape)]
#[shape(kind = Using)]
pub struct UsingOperation {
    /// Declaration group or expression producing the resources
    pub resources: Child,
    /// Body the resources are scoped to
    pub body: Child,
    /// Locals declared by the resources
    pub locals: Vec<LocalId>,
    /// Asynchronous disposal
    pub is_asynchronous: bool,
}

/// Using declaration scoped to the enclosing block
#[derive(Debug, Shape)]
#[shape(kind = UsingDeclaration)]
pub struct UsingDeclarationOperation {
    /// Declared resources
    pub declaration_group: Child,
    /// Asynchronous disposal
    pub is_asynchronous: bool,
}

/// Fixed statement
#[derive(Debug, Shape)]
#[shape(kind = Fixed)]
pub struct FixedOperation {
    /// Pinned variable declarations
    pub variables: Child,
    /// Body the pins are scoped to
    pub body: Child,
    /// Locals declared by the statement
    pub locals: Vec<LocalId>,
}

/// With block
#[derive(Debug, Shape)]
#[shape(kind = WithStatement)]
pub struct WithStatementOperation {
    /// Value evaluated once for the block
    pub value: Child,
    /// Body of the block
    pub body: Child,
}

/// Expression evaluated for its side effects
#[derive(Debug, Shape)]
#[shape(kind = ExpressionStatement)]
pub struct ExpressionStatementOperation {
    /// The expression
    pub operation: Child,
}

/// Local function declaration
#[derive(Debug, Shape)]
#[shape(kind = LocalFunction)]
pub struct LocalFunctionOperation {
    /// Block or expression body
    pub body: OptionalChild,
    /// Second body of a function written with both forms
    pub ignored_body: OptionalChild,
    /// The function
    pub symbol: MethodId,
}

/// Stop statement
#[derive(Debug, Shape)]
#[shape(kind = Stop)]
pub struct StopOperation {}

/// End statement
#[derive(Debug, Shape)]
#[shape(kind = End)]
pub struct EndOperation {}

/// Event raise
#[derive(Debug, Shape)]
#[shape(kind = RaiseEvent)]
pub struct RaiseEventOperation {
    /// Event being raised
    pub event_reference: Child,
    /// Arguments in evaluation order
    pub arguments: ChildList,
}

impl RaiseEventOperation {
    /// Event targeted by the raise, when `event_reference` is an event reference
    #[must_use]
    pub fn event(&self) -> Option<EventId> {
        self.event_reference
            .get()
            .downcast::<super::EventReferenceOperation>()
            .map(|reference| reference.event)
    }
}

/// Array re-dimension statement
#[derive(Debug, Shape)]
#[shape(kind = ReDim)]
pub struct ReDimOperation {
    /// One clause per array
    pub clauses: ChildList,
    /// Existing elements are kept
    pub preserve: bool,
}

/// One array of a re-dimension statement
#[derive(Debug, Shape)]
#[shape(kind = ReDimClause)]
pub struct ReDimClauseOperation {
    /// Array being re-dimensioned
    pub operand: Child,
    /// New upper bounds
    pub dimension_sizes: ChildList,
}
