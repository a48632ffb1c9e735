//! Operators, assignments and other value-producing expressions

use crate::attributes::{BinaryOperatorKind, ConversionInfo, UnaryOperatorKind};
use crate::slot::{Child, ChildList, OptionalChild};
use crate::{ConstructionError, OperationHeader, OperationKind};
use ot_derive::Shape;
use ot_symbols::{MethodId, SymbolId, TypeId};

fn check_conversion(
    kind: OperationKind,
    attribute: &'static str,
    conversion: &ConversionInfo,
) -> Result<(), ConstructionError> {
    match conversion.inconsistency() {
        Some(reason) => Err(ConstructionError::InconsistentAttribute {
            kind,
            attribute,
            reason,
        }),
        None => Ok(()),
    }
}

/// Unary operator application
#[derive(Debug, Shape)]
#[shape(kind = Unary, validate = check_operator)]
pub struct UnaryOperation {
    /// Operand
    pub operand: Child,
    /// Operator
    pub operator_kind: UnaryOperatorKind,
    /// Operator lifted over nullable operands
    pub is_lifted: bool,
    /// Overflow checked
    pub is_checked: bool,
    /// User-defined operator method
    pub operator_method: Option<MethodId>,
    /// Type a static abstract operator is constrained to
    pub constrained_to_type: Option<TypeId>,
}

impl UnaryOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.is_checked && !self.operator_kind.can_be_checked() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::Unary,
                attribute: "is_checked",
                reason: "only negation can be overflow checked",
            });
        }
        Ok(())
    }
}

/// Binary operator application
#[derive(Debug, Shape)]
#[shape(kind = Binary, validate = check_operator)]
pub struct BinaryOperation {
    /// Left operand
    pub left_operand: Child,
    /// Right operand
    pub right_operand: Child,
    /// Operator
    pub operator_kind: BinaryOperatorKind,
    /// Operator lifted over nullable operands
    pub is_lifted: bool,
    /// Overflow checked
    pub is_checked: bool,
    /// Strings are compared in text mode
    pub is_compare_text: bool,
    /// User-defined operator method
    pub operator_method: Option<MethodId>,
    /// User-defined `true`/`false` operator used by a short-circuit operator
    pub unary_operator_method: Option<MethodId>,
}

impl BinaryOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.is_checked && !self.operator_kind.can_be_checked() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::Binary,
                attribute: "is_checked",
                reason: "operator cannot be overflow checked",
            });
        }
        if self.is_compare_text && !self.operator_kind.can_compare_text() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::Binary,
                attribute: "is_compare_text",
                reason: "text comparison applies to comparisons only",
            });
        }
        if self.unary_operator_method.is_some() && !self.operator_kind.is_conditional() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::Binary,
                attribute: "unary_operator_method",
                reason: "only short-circuit operators use a true/false operator",
            });
        }
        Ok(())
    }
}

/// Element-wise tuple comparison
#[derive(Debug, Shape)]
#[shape(kind = TupleBinary, validate = check_operator)]
pub struct TupleBinaryOperation {
    /// Left tuple
    pub left_operand: Child,
    /// Right tuple
    pub right_operand: Child,
    /// `Equals` or `NotEquals`
    pub operator_kind: BinaryOperatorKind,
}

impl TupleBinaryOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if !matches!(self.operator_kind, BinaryOperatorKind::Equals | BinaryOperatorKind::NotEquals) {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::TupleBinary,
                attribute: "operator_kind",
                reason: "tuples only compare for equality or inequality",
            });
        }
        Ok(())
    }
}

/// `++` and `--`
#[derive(Debug, Shape)]
#[shape(kinds(Increment, Decrement), validate = check_operator)]
pub struct IncrementOrDecrementOperation {
    /// Increment or decrement
    pub kind: OperationKind,
    /// Updated target
    pub target: Child,
    /// Produces the value before the update
    pub is_postfix: bool,
    /// Operator lifted over nullable operands
    pub is_lifted: bool,
    /// Overflow checked
    pub is_checked: bool,
    /// User-defined operator method
    pub operator_method: Option<MethodId>,
}

impl IncrementOrDecrementOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.is_checked && self.operator_method.is_some() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: self.kind,
                attribute: "is_checked",
                reason: "user-defined operators are not overflow checked",
            });
        }
        Ok(())
    }
}

/// Type conversion, implicit or written
#[derive(Debug, Shape)]
#[shape(kind = Conversion, validate = check_conversion_info)]
pub struct ConversionOperation {
    /// Converted value
    pub operand: Child,
    /// Classification of the conversion
    pub conversion: ConversionInfo,
    /// Produces null instead of failing
    pub is_try_cast: bool,
    /// Overflow checked
    pub is_checked: bool,
}

impl ConversionOperation {
    fn check_conversion_info(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        check_conversion(OperationKind::Conversion, "conversion", &self.conversion)
    }
}

/// `condition ? a : b` and if-statements in expression form
#[derive(Debug, Shape)]
#[shape(kind = Conditional)]
pub struct ConditionalOperation {
    /// Condition
    pub condition: Child,
    /// Value when true
    pub when_true: Child,
    /// Value when false; absent for an if-statement without else
    pub when_false: OptionalChild,
    /// Produces a reference rather than a value
    pub is_ref: bool,
}

/// `a ?? b`
#[derive(Debug, Shape)]
#[shape(kind = Coalesce, validate = check_value_conversion)]
pub struct CoalesceOperation {
    /// Tested value
    pub value: Child,
    /// Fallback value
    pub when_null: Child,
    /// Conversion applied to a non-null value
    pub value_conversion: ConversionInfo,
}

impl CoalesceOperation {
    fn check_value_conversion(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        check_conversion(OperationKind::Coalesce, "value_conversion", &self.value_conversion)
    }
}

/// `a ??= b`
#[derive(Debug, Shape)]
#[shape(kind = CoalesceAssignment)]
pub struct CoalesceAssignmentOperation {
    /// Assigned target
    pub target: Child,
    /// Value assigned when the target is null
    pub value: Child,
}

/// `a = b`
#[derive(Debug, Shape)]
#[shape(kind = SimpleAssignment)]
pub struct SimpleAssignmentOperation {
    /// Assigned target
    pub target: Child,
    /// Assigned value
    pub value: Child,
    /// Ref assignment
    pub is_ref: bool,
}

/// `a op= b`
#[derive(Debug, Shape)]
#[shape(kind = CompoundAssignment, validate = check_operator)]
pub struct CompoundAssignmentOperation {
    /// Assigned target
    pub target: Child,
    /// Right operand
    pub value: Child,
    /// Operator
    pub operator_kind: BinaryOperatorKind,
    /// Operator lifted over nullable operands
    pub is_lifted: bool,
    /// Overflow checked
    pub is_checked: bool,
    /// User-defined operator method
    pub operator_method: Option<MethodId>,
    /// Conversion of the target to the operator's input type
    pub in_conversion: ConversionInfo,
    /// Conversion of the result back to the target type
    pub out_conversion: ConversionInfo,
}

impl CompoundAssignmentOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.is_checked && !self.operator_kind.can_be_checked() {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::CompoundAssignment,
                attribute: "is_checked",
                reason: "operator cannot be overflow checked",
            });
        }
        check_conversion(OperationKind::CompoundAssignment, "in_conversion", &self.in_conversion)?;
        check_conversion(OperationKind::CompoundAssignment, "out_conversion", &self.out_conversion)
    }
}

/// `(a, b) = value`
#[derive(Debug, Shape)]
#[shape(kind = DeconstructionAssignment)]
pub struct DeconstructionAssignmentOperation {
    /// Tuple or declaration receiving the parts
    pub target: Child,
    /// Deconstructed value
    pub value: Child,
}

/// Event handler subscription or removal
#[derive(Debug, Shape)]
#[shape(kind = EventAssignment)]
pub struct EventAssignmentOperation {
    /// Event
    pub event_reference: Child,
    /// Handler
    pub handler_value: Child,
    /// Adds rather than removes the handler
    pub adds: bool,
}

/// Parenthesized expression kept for languages where parentheses matter
#[derive(Debug, Shape)]
#[shape(kind = Parenthesized)]
pub struct ParenthesizedOperation {
    /// Inner expression
    pub operand: Child,
}

/// `a?.b`
#[derive(Debug, Shape)]
#[shape(kind = ConditionalAccess)]
pub struct ConditionalAccessOperation {
    /// Tested receiver
    pub operation: Child,
    /// Access evaluated when the receiver is not null
    pub when_not_null: Child,
}

/// The receiver inside `when_not_null` of a conditional access
#[derive(Debug, Shape)]
#[shape(kind = ConditionalAccessInstance)]
pub struct ConditionalAccessInstanceOperation {}

/// `value is Type`
#[derive(Debug, Shape)]
#[shape(kind = IsType)]
pub struct IsTypeOperation {
    /// Tested value
    pub value_operand: Child,
    /// Tested type
    pub type_operand: TypeId,
    /// `is not` / `IsNot`
    pub is_negated: bool,
}

/// `value is pattern`
#[derive(Debug, Shape)]
#[shape(kind = IsPattern)]
pub struct IsPatternOperation {
    /// Tested value
    pub value: Child,
    /// Pattern
    pub pattern: Child,
}

/// `a..b`
#[derive(Debug, Shape)]
#[shape(kind = Range)]
pub struct RangeOperation {
    /// Start
    pub left_operand: OptionalChild,
    /// End
    pub right_operand: OptionalChild,
    /// Lifted over nullable operands
    pub is_lifted: bool,
    /// Factory method building the range
    pub method: Option<MethodId>,
}

/// Throw expression or statement
#[derive(Debug, Shape)]
#[shape(kind = Throw)]
pub struct ThrowOperation {
    /// Thrown value; absent for a rethrow
    pub exception: OptionalChild,
}

/// Await
#[derive(Debug, Shape)]
#[shape(kind = Await)]
pub struct AwaitOperation {
    /// Awaited value
    pub operation: Child,
}

/// `&x`
#[derive(Debug, Shape)]
#[shape(kind = AddressOf)]
pub struct AddressOfOperation {
    /// Referenced location
    pub reference: Child,
}

/// `sizeof(T)`
#[derive(Debug, Shape)]
#[shape(kind = SizeOf)]
pub struct SizeOfOperation {
    /// Measured type
    pub type_operand: TypeId,
}

/// `typeof(T)`
#[derive(Debug, Shape)]
#[shape(kind = TypeOf)]
pub struct TypeOfOperation {
    /// Reflected type
    pub type_operand: TypeId,
}

/// `nameof(x)`; the name itself is the header constant
#[derive(Debug, Shape)]
#[shape(kind = NameOf)]
pub struct NameOfOperation {
    /// Named expression
    pub argument: Child,
}

/// `default` / `default(T)`
#[derive(Debug, Shape)]
#[shape(kind = DefaultValue)]
pub struct DefaultValueOperation {}

/// `var x` or `var (a, b)` used as an expression
#[derive(Debug, Shape)]
#[shape(kind = DeclarationExpression)]
pub struct DeclarationExpressionOperation {
    /// Declared local or tuple of declarations
    pub expression: Child,
}

/// `_` used as an expression
#[derive(Debug, Shape)]
#[shape(kind = Discard)]
pub struct DiscardOperation {
    /// Discard symbol
    pub discard_symbol: SymbolId,
}

/// Tuple literal
#[derive(Debug, Shape)]
#[shape(kind = Tuple)]
pub struct TupleOperation {
    /// Elements
    pub elements: ChildList,
    /// Type the tuple has without target typing
    pub natural_type: Option<TypeId>,
}

/// `value with { ... }`
#[derive(Debug, Shape)]
#[shape(kind = With)]
pub struct WithOperation {
    /// Copied value
    pub operand: Child,
    /// Member initializers applied to the copy
    pub initializer: Child,
    /// Clone method producing the copy; absent for structs
    pub clone_method: Option<MethodId>,
}
