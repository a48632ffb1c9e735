//! Typed non-child attributes shared by several shapes

use crate::OperationKind;
use ot_symbols::{MethodId, PropertyId, TypeId};
use serde::{Deserialize, Serialize};

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperatorKind {
    /// Bitwise complement (~)
    BitwiseNegation,
    /// Logical not (!)
    Not,
    /// Unary plus (+)
    Plus,
    /// Negation (-)
    Minus,
    /// User-defined `true` operator
    True,
    /// User-defined `false` operator
    False,
    /// Index from end (^)
    Hat,
}

impl UnaryOperatorKind {
    /// Whether an overflow check can apply to this operator
    #[must_use]
    pub const fn can_be_checked(self) -> bool {
        matches!(self, Self::Minus)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperatorKind {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Integer division (\)
    IntegerDivide,
    /// Remainder (%)
    Remainder,
    /// Exponentiation (^)
    Power,
    /// Left shift (<<)
    LeftShift,
    /// Arithmetic right shift (>>)
    RightShift,
    /// Logical right shift (>>>)
    UnsignedRightShift,
    /// Bitwise or logical and (&)
    And,
    /// Bitwise or logical or (|)
    Or,
    /// Exclusive or (^)
    ExclusiveOr,
    /// Short-circuit and (&&)
    ConditionalAnd,
    /// Short-circuit or (||)
    ConditionalOr,
    /// String concatenation (&)
    Concatenate,
    /// Equality (==)
    Equals,
    /// Value equality on objects
    ObjectValueEquals,
    /// Inequality (!=)
    NotEquals,
    /// Value inequality on objects
    ObjectValueNotEquals,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Wildcard string match
    Like,
}

impl BinaryOperatorKind {
    /// Equality, inequality and ordering comparisons
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::ObjectValueEquals
                | Self::NotEquals
                | Self::ObjectValueNotEquals
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThanOrEqual
                | Self::GreaterThan
        )
    }

    /// Ordering comparisons usable in relational patterns and case clauses
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThanOrEqual
                | Self::GreaterThan
        )
    }

    /// Short-circuiting operators
    #[must_use]
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr)
    }

    /// Whether an overflow check can apply to this operator
    #[must_use]
    pub const fn can_be_checked(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::IntegerDivide | Self::Power
        )
    }

    /// Whether a text-mode string comparison can apply to this operator
    #[must_use]
    pub const fn can_compare_text(self) -> bool {
        self.is_comparison() || matches!(self, Self::Like)
    }
}

/// Kind of jump performed by a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchKind {
    /// Continue the enclosing loop
    Continue,
    /// Exit the enclosing loop or switch
    Break,
    /// Jump to a label
    GoTo,
}

/// Loop discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopKind {
    /// While, do-while and do-until loops
    While,
    /// Counted for loop
    For,
    /// Range for-to loop
    ForTo,
    /// Collection for-each loop
    ForEach,
}

impl LoopKind {
    /// Loop discriminator of `kind`, if it is a loop
    #[must_use]
    pub const fn of(kind: OperationKind) -> Option<Self> {
        match kind {
            OperationKind::WhileLoop => Some(Self::While),
            OperationKind::ForLoop => Some(Self::For),
            OperationKind::ForToLoop => Some(Self::ForTo),
            OperationKind::ForEachLoop => Some(Self::ForEach),
            _ => None,
        }
    }
}

/// Case clause discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseKind {
    /// Matches one value
    SingleValue,
    /// Compares with a relational operator
    Relational,
    /// Matches a value range
    Range,
    /// Matches a pattern
    Pattern,
    /// Matches anything not matched elsewhere
    Default,
}

impl CaseKind {
    /// Case discriminator of `kind`, if it is a case clause
    #[must_use]
    pub const fn of(kind: OperationKind) -> Option<Self> {
        match kind {
            OperationKind::SingleValueCaseClause => Some(Self::SingleValue),
            OperationKind::RelationalCaseClause => Some(Self::Relational),
            OperationKind::RangeCaseClause => Some(Self::Range),
            OperationKind::PatternCaseClause => Some(Self::Pattern),
            OperationKind::DefaultCaseClause => Some(Self::Default),
            _ => None,
        }
    }
}

/// How an argument was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// Written at the call site
    Explicit,
    /// Trailing arguments collected into a params array
    ParamArray,
    /// Default value of an omitted optional parameter
    DefaultValue,
    /// Trailing arguments collected into a params collection
    ParamCollection,
}

/// Reference passing mode of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    /// By value
    None,
    /// By reference
    Ref,
    /// Out parameter
    Out,
    /// Read-only reference
    In,
    /// Read-only reference parameter passed explicitly
    RefReadOnlyParameter,
}

/// What an instance reference refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceReferenceKind {
    /// The instance of the containing type
    ContainingTypeInstance,
    /// The object being initialized by an initializer
    ImplicitReceiver,
    /// The input of a pattern
    PatternInput,
    /// The handler of an interpolated string
    InterpolatedStringHandler,
}

/// Value a placeholder stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceholderKind {
    /// Not further classified
    Unspecified,
    /// Value of the switch in a relational case clause
    SwitchOperationCaseValue,
    /// Left operand of a user-defined for-to comparison
    ForToLoopBinaryOperatorLeftOperand,
    /// Right operand of a user-defined for-to comparison
    ForToLoopBinaryOperatorRightOperand,
    /// Group of an aggregate query
    AggregationGroup,
}

/// Value an interpolated string handler placeholder stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandlerPlaceholderKind {
    /// Argument of the call site at the given position
    CallsiteArgument(u32),
    /// Receiver of the call site
    CallsiteReceiver,
    /// Out flag reporting whether the handler is valid
    TrailingValidityArgument,
}

/// Classification of a conversion
///
/// The default value is an identity conversion that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionInfo {
    /// Whether the conversion exists at all
    pub exists: bool,
    /// Conversion to the same type
    pub is_identity: bool,
    /// Numeric conversion
    pub is_numeric: bool,
    /// Reference conversion
    pub is_reference: bool,
    /// Conversion involving nullable value types
    pub is_nullable: bool,
    /// Implicit rather than explicit
    pub is_implicit: bool,
    /// User-defined conversion operator, if any
    pub method: Option<MethodId>,
    /// Type a static abstract conversion is constrained to
    pub constrained_to_type: Option<TypeId>,
}

impl ConversionInfo {
    /// Identity conversion
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            exists: true,
            is_identity: true,
            is_numeric: false,
            is_reference: false,
            is_nullable: false,
            is_implicit: true,
            method: None,
            constrained_to_type: None,
        }
    }

    /// Implicit or explicit numeric conversion
    #[must_use]
    pub const fn numeric(is_implicit: bool) -> Self {
        Self {
            is_identity: false,
            is_numeric: true,
            is_implicit,
            ..Self::identity()
        }
    }

    /// Implicit or explicit reference conversion
    #[must_use]
    pub const fn reference(is_implicit: bool) -> Self {
        Self {
            is_identity: false,
            is_reference: true,
            is_implicit,
            ..Self::identity()
        }
    }

    /// Conversion through a user-defined operator
    #[must_use]
    pub const fn user_defined(method: MethodId, is_implicit: bool) -> Self {
        Self {
            is_identity: false,
            is_implicit,
            method: Some(method),
            ..Self::identity()
        }
    }

    /// Conversion that does not exist (erroneous code)
    #[must_use]
    pub const fn none() -> Self {
        Self {
            exists: false,
            is_identity: false,
            is_implicit: false,
            ..Self::identity()
        }
    }

    /// Whether a user-defined operator performs the conversion
    #[must_use]
    pub const fn is_user_defined(&self) -> bool {
        self.method.is_some()
    }

    /// Reason this classification is self-contradictory, if it is
    #[must_use]
    pub const fn inconsistency(&self) -> Option<&'static str> {
        if !self.exists && (self.is_identity || self.method.is_some()) {
            return Some("a conversion that does not exist cannot be an identity or user-defined");
        }
        if self.is_identity && (self.is_numeric || self.is_reference || self.method.is_some()) {
            return Some("an identity conversion cannot also be numeric, reference or user-defined");
        }
        if self.is_numeric && self.is_reference {
            return Some("a conversion cannot be both numeric and reference");
        }
        None
    }
}

impl Default for ConversionInfo {
    fn default() -> Self {
        Self::identity()
    }
}

/// Members a for-each loop binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForEachLoopInfo {
    /// Type of each element
    pub element_type: TypeId,
    /// Method producing the enumerator
    pub get_enumerator_method: MethodId,
    /// Method advancing the enumerator
    pub move_next_method: MethodId,
    /// Property reading the current element
    pub current_property: PropertyId,
    /// Dispose method, when the enumerator is disposable
    pub dispose_method: Option<MethodId>,
    /// Conversion applied to the current element
    pub current_conversion: ConversionInfo,
    /// Conversion from element to loop variable type
    pub element_conversion: ConversionInfo,
    /// Whether the enumerator is statically known to be disposable
    pub known_to_implement_disposable: bool,
}
