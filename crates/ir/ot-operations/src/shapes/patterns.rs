//! Patterns, switch expressions and case clauses
//!
//! Every pattern records the type it is matched against (`input_type`) and
//! the type the input is known to have once it matches (`narrowed_type`).

use crate::attributes::{BinaryOperatorKind, CaseKind};
use crate::slot::{Child, ChildList, OptionalChild};
use crate::{ConstructionError, OperationHeader, OperationKind};
use ot_derive::Shape;
use ot_symbols::{LabelId, LocalId, MethodId, SymbolId, TypeId};

fn check_relational(kind: OperationKind, operator: BinaryOperatorKind) -> Result<(), ConstructionError> {
    if operator.is_relational() {
        Ok(())
    } else {
        Err(ConstructionError::InconsistentAttribute {
            kind,
            attribute: "operator_kind",
            reason: "relational tests need an equality or ordering operator",
        })
    }
}

/// Pattern matching a constant
#[derive(Debug, Shape)]
#[shape(kind = ConstantPattern)]
pub struct ConstantPatternOperation {
    /// Constant value
    pub value: Child,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `T x`, `var x`
#[derive(Debug, Shape)]
#[shape(kind = DeclarationPattern)]
pub struct DeclarationPatternOperation {
    /// Tested type; absent for `var`
    pub matched_type: Option<TypeId>,
    /// Null also matches (`var`)
    pub matches_null: bool,
    /// Declared local; absent for a discard designation
    pub declared_symbol: Option<LocalId>,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// Bare type pattern
#[derive(Debug, Shape)]
#[shape(kind = TypePattern)]
pub struct TypePatternOperation {
    /// Tested type
    pub matched_type: TypeId,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `< 5`, `>= x`
#[derive(Debug, Shape)]
#[shape(kind = RelationalPattern, validate = check_operator)]
pub struct RelationalPatternOperation {
    /// Compared value
    pub value: Child,
    /// Comparison
    pub operator_kind: BinaryOperatorKind,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

impl RelationalPatternOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        check_relational(OperationKind::RelationalPattern, self.operator_kind)
    }
}

/// `not p`
#[derive(Debug, Shape)]
#[shape(kind = NegatedPattern)]
pub struct NegatedPatternOperation {
    /// Negated pattern
    pub pattern: Child,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `p and q`, `p or q`
#[derive(Debug, Shape)]
#[shape(kind = BinaryPattern, validate = check_operator)]
pub struct BinaryPatternOperation {
    /// Left pattern
    pub left_pattern: Child,
    /// Right pattern
    pub right_pattern: Child,
    /// `And` or `Or`
    pub operator_kind: BinaryOperatorKind,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

impl BinaryPatternOperation {
    fn check_operator(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if !matches!(self.operator_kind, BinaryOperatorKind::And | BinaryOperatorKind::Or) {
            return Err(ConstructionError::InconsistentAttribute {
                kind: OperationKind::BinaryPattern,
                attribute: "operator_kind",
                reason: "patterns combine with and/or only",
            });
        }
        Ok(())
    }
}

/// `_`
#[derive(Debug, Shape)]
#[shape(kind = DiscardPattern)]
pub struct DiscardPatternOperation {
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `T (a, b) { P: p } x`
#[derive(Debug, Shape)]
#[shape(kind = RecursivePattern)]
pub struct RecursivePatternOperation {
    /// Positional subpatterns
    pub deconstruction_subpatterns: ChildList,
    /// Property subpatterns
    pub property_subpatterns: ChildList,
    /// Tested type
    pub matched_type: TypeId,
    /// Deconstruct method used for positional subpatterns
    pub deconstruct_symbol: Option<MethodId>,
    /// Declared local
    pub declared_symbol: Option<LocalId>,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `Member: pattern` inside a property pattern
#[derive(Debug, Shape)]
#[shape(kind = PropertySubpattern)]
pub struct PropertySubpatternOperation {
    /// Member reference, possibly nested
    pub member: Child,
    /// Pattern applied to the member
    pub pattern: Child,
}

/// `[a, .., b]`
#[derive(Debug, Shape)]
#[shape(kind = ListPattern)]
pub struct ListPatternOperation {
    /// Element and slice patterns
    pub patterns: ChildList,
    /// Length or count member
    pub length_symbol: Option<SymbolId>,
    /// Indexer member
    pub indexer_symbol: Option<SymbolId>,
    /// Declared local
    pub declared_symbol: Option<LocalId>,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `..` or `.. p` inside a list pattern
#[derive(Debug, Shape)]
#[shape(kind = SlicePattern)]
pub struct SlicePatternOperation {
    /// Pattern applied to the slice
    pub pattern: OptionalChild,
    /// Slice method or range indexer
    pub slice_symbol: Option<SymbolId>,
    /// Type matched against
    pub input_type: TypeId,
    /// Type after a match
    pub narrowed_type: TypeId,
}

/// `value switch { ... }`
#[derive(Debug, Shape)]
#[shape(kind = SwitchExpression)]
pub struct SwitchExpressionOperation {
    /// Switched value
    pub value: Child,
    /// Arms in source order
    pub arms: ChildList,
    /// Arms cover every input
    pub is_exhaustive: bool,
}

/// `pattern when guard => value`
#[derive(Debug, Shape)]
#[shape(kind = SwitchExpressionArm)]
pub struct SwitchExpressionArmOperation {
    /// Pattern
    pub pattern: Child,
    /// Guard
    pub guard: OptionalChild,
    /// Arm value
    pub value: Child,
    /// Locals declared by the pattern
    pub locals: Vec<LocalId>,
}

/// `case value:`
#[derive(Debug, Shape)]
#[shape(kind = SingleValueCaseClause)]
pub struct SingleValueCaseClauseOperation {
    /// Matched value
    pub value: Child,
    /// Label the clause jumps to
    pub label: Option<LabelId>,
}

impl SingleValueCaseClauseOperation {
    /// Case discriminator
    #[must_use]
    pub const fn case_kind(&self) -> CaseKind {
        CaseKind::SingleValue
    }
}

/// `Case Is < value`
#[derive(Debug, Shape)]
#[shape(kind = RelationalCaseClause, validate = check_relation)]
pub struct RelationalCaseClauseOperation {
    /// Compared value
    pub value: Child,
    /// Comparison
    pub relation: BinaryOperatorKind,
    /// Label the clause jumps to
    pub label: Option<LabelId>,
}

impl RelationalCaseClauseOperation {
    /// Case discriminator
    #[must_use]
    pub const fn case_kind(&self) -> CaseKind {
        CaseKind::Relational
    }

    fn check_relation(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        check_relational(OperationKind::RelationalCaseClause, self.relation)
    }
}

/// `Case low To high`
#[derive(Debug, Shape)]
#[shape(kind = RangeCaseClause)]
pub struct RangeCaseClauseOperation {
    /// Lower bound
    pub minimum_value: Child,
    /// Upper bound
    pub maximum_value: Child,
    /// Label the clause jumps to
    pub label: Option<LabelId>,
}

impl RangeCaseClauseOperation {
    /// Case discriminator
    #[must_use]
    pub const fn case_kind(&self) -> CaseKind {
        CaseKind::Range
    }
}

/// `case pattern when guard:`
#[derive(Debug, Shape)]
#[shape(kind = PatternCaseClause)]
pub struct PatternCaseClauseOperation {
    /// Pattern
    pub pattern: Child,
    /// Guard
    pub guard: OptionalChild,
    /// Label the clause jumps to
    pub label: LabelId,
}

impl PatternCaseClauseOperation {
    /// Case discriminator
    #[must_use]
    pub const fn case_kind(&self) -> CaseKind {
        CaseKind::Pattern
    }
}

/// `default:` / `Case Else`
#[derive(Debug, Shape)]
#[shape(kind = DefaultCaseClause)]
pub struct DefaultCaseClauseOperation {
    /// Label the clause jumps to
    pub label: Option<LabelId>,
}

impl DefaultCaseClauseOperation {
    /// Case discriminator
    #[must_use]
    pub const fn case_kind(&self) -> CaseKind {
        CaseKind::Default
    }
}
