//! The closed operation kind taxonomy
//!
//! Every tag maps to exactly one shape in [`crate::shapes`]. A handful of
//! shapes serve several tags and carry the tag as a discriminator field; the
//! shape table ([`crate::OperationPayload::SHAPES`]) is the authority on which.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Structural family a kind belongs to
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum KindFamily {
    /// Constructs without a dedicated kind, and erroneous code
    Unrepresented,
    /// Statements, clauses and control flow
    Statement,
    /// Variable declarations and member initializers
    Declaration,
    /// Literals and references to locals, members and instances
    LiteralOrReference,
    /// Operators, assignments and other value-producing expressions
    Operator,
    /// Object, array, delegate and collection creation
    Creation,
    /// Invocations and their arguments
    Invocation,
    /// Patterns, switch expressions and case clauses
    Pattern,
    /// Interpolated string parts and handler lowering
    InterpolatedString,
    /// Query translation wrappers and member bodies
    QueryOrBody,
    /// Nodes produced only by the flow-graph builder
    Synthetic,
}

macro_rules! operation_kinds {
    ($($family:ident => [$($(#[doc = $doc:literal])* $kind:ident),* $(,)?]),* $(,)?) => {
        /// Tag identifying the concrete shape and meaning of an operation
        #[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        pub enum OperationKind {
            $($(
                $(#[doc = $doc])*
                $kind,
            )*)*
        }

        impl OperationKind {
            /// Every kind, grouped by family
            pub const ALL: &'static [Self] = &[$($(Self::$kind,)*)*];

            /// Structural family of this kind
            #[must_use]
            pub const fn family(self) -> KindFamily {
                match self {
                    $($(Self::$kind => KindFamily::$family,)*)*
                }
            }

            /// Name of the kind as written in the taxonomy
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $($(Self::$kind => stringify!($kind),)*)*
                }
            }
        }
    };
}

operation_kinds! {
    Unrepresented => [
        /// Construct the tree does not model with a dedicated kind
        None,
        /// Erroneous code
        Invalid,
    ],
    Statement => [
        /// Statement list with its own scope
        Block,
        /// One or more variable declarations in a single statement
        VariableDeclarationGroup,
        /// Switch statement
        Switch,
        /// Section of a switch statement: clauses and body
        SwitchCase,
        /// While, do-while and do-until loops
        WhileLoop,
        /// Counted loop with initializer, condition and increment
        ForLoop,
        /// Range loop from an initial value to a limit
        ForToLoop,
        /// Collection loop
        ForEachLoop,
        /// Labeled statement
        Labeled,
        /// Goto, break or continue
        Branch,
        /// Empty statement
        Empty,
        /// Return statement
        Return,
        /// Yield return statement
        YieldReturn,
        /// Yield break statement
        YieldBreak,
        /// Lock statement
        Lock,
        /// Try statement
        Try,
        /// Catch clause of a try statement
        CatchClause,
        /// Using statement with a body
        Using,
        /// Using declaration scoped to the enclosing block
        UsingDeclaration,
        /// Fixed statement pinning variables
        Fixed,
        /// With block evaluating a value once for member access
        WithStatement,
        /// Expression evaluated as a statement
        ExpressionStatement,
        /// Local function declaration
        LocalFunction,
        /// Stop statement breaking into the debugger
        Stop,
        /// End statement terminating the program
        End,
        /// Event raise statement
        RaiseEvent,
        /// Array redimension statement
        ReDim,
        /// One array of a redimension statement
        ReDimClause,
    ],
    Declaration => [
        /// Declarators sharing one type and optional initializer
        VariableDeclaration,
        /// One declared variable
        VariableDeclarator,
        /// Initializer of a variable
        VariableInitializer,
        /// Initializer of one or more fields
        FieldInitializer,
        /// Initializer of one or more properties
        PropertyInitializer,
        /// Default value of an optional parameter
        ParameterInitializer,
    ],
    LiteralOrReference => [
        /// Literal value
        Literal,
        /// UTF-8 encoded string literal
        Utf8String,
        /// Reference to a local
        LocalReference,
        /// Reference to a parameter
        ParameterReference,
        /// Reference to a field
        FieldReference,
        /// Reference to a method without invoking it
        MethodReference,
        /// Reference to a property or indexer
        PropertyReference,
        /// Reference to an event
        EventReference,
        /// Element access of an array
        ArrayElementReference,
        /// Implicit or explicit reference to an instance
        InstanceReference,
        /// Index or range access through length and indexer members
        ImplicitIndexerReference,
        /// Element access of an inline array
        InlineArrayAccess,
        /// Dereference of a pointer
        PointerIndirectionReference,
        /// Member access bound at run time
        DynamicMemberReference,
        /// Indexer access bound at run time
        DynamicIndexerAccess,
        /// Invocation bound at run time
        DynamicInvocation,
    ],
    Operator => [
        /// Unary operator
        Unary,
        /// Binary operator
        Binary,
        /// Element-wise tuple comparison
        TupleBinary,
        /// Increment operator
        Increment,
        /// Decrement operator
        Decrement,
        /// Conversion
        Conversion,
        /// Conditional expression or if statement
        Conditional,
        /// Null-coalescing expression
        Coalesce,
        /// Null-coalescing assignment
        CoalesceAssignment,
        /// Simple assignment
        SimpleAssignment,
        /// Compound assignment
        CompoundAssignment,
        /// Deconstructing assignment
        DeconstructionAssignment,
        /// Event handler addition or removal
        EventAssignment,
        /// Parenthesized expression
        Parenthesized,
        /// Null-conditional access
        ConditionalAccess,
        /// Receiver placeholder inside a null-conditional access
        ConditionalAccessInstance,
        /// Type test
        IsType,
        /// Pattern test
        IsPattern,
        /// Range expression
        Range,
        /// Throw expression or statement
        Throw,
        /// Await expression
        Await,
        /// Address-of expression
        AddressOf,
        /// Size-of expression
        SizeOf,
        /// Type-of expression
        TypeOf,
        /// Name-of expression
        NameOf,
        /// Default value expression
        DefaultValue,
        /// Declaration used as an expression
        DeclarationExpression,
        /// Discard designation
        Discard,
        /// Tuple literal
        Tuple,
        /// Non-destructive mutation expression
        With,
    ],
    Creation => [
        /// Object creation through a constructor
        ObjectCreation,
        /// Creation of a type parameter through its constraint
        TypeParameterObjectCreation,
        /// Creation of an embedded interop type
        NoPiaObjectCreation,
        /// Object creation bound at run time
        DynamicObjectCreation,
        /// Array creation
        ArrayCreation,
        /// Array initializer
        ArrayInitializer,
        /// Anonymous type creation
        AnonymousObjectCreation,
        /// Object or collection initializer
        ObjectOrCollectionInitializer,
        /// Nested member initializer
        MemberInitializer,
        /// Delegate creation
        DelegateCreation,
        /// Lambda or anonymous method
        AnonymousFunction,
        /// Collection expression
        CollectionExpression,
        /// Spread element of a collection expression
        Spread,
    ],
    Invocation => [
        /// Method invocation
        Invocation,
        /// Invocation through a function pointer
        FunctionPointerInvocation,
        /// Argument passed to a parameter
        Argument,
        /// Argument omitted at the call site
        OmittedArgument,
        /// Attribute application
        Attribute,
    ],
    Pattern => [
        /// Constant pattern
        ConstantPattern,
        /// Declaration pattern
        DeclarationPattern,
        /// Type pattern
        TypePattern,
        /// Relational pattern
        RelationalPattern,
        /// Negated pattern
        NegatedPattern,
        /// Conjunctive or disjunctive pattern
        BinaryPattern,
        /// Discard pattern
        DiscardPattern,
        /// Positional and property pattern
        RecursivePattern,
        /// Member pattern inside a property pattern
        PropertySubpattern,
        /// List pattern
        ListPattern,
        /// Slice pattern inside a list pattern
        SlicePattern,
        /// Switch expression
        SwitchExpression,
        /// Arm of a switch expression
        SwitchExpressionArm,
        /// Case clause matching one value
        SingleValueCaseClause,
        /// Case clause comparing with a relational operator
        RelationalCaseClause,
        /// Case clause matching a value range
        RangeCaseClause,
        /// Case clause matching a pattern
        PatternCaseClause,
        /// Default case clause
        DefaultCaseClause,
    ],
    InterpolatedString => [
        /// Interpolated string
        InterpolatedString,
        /// Literal text part
        InterpolatedStringText,
        /// Interpolation hole
        Interpolation,
        /// Handler-based lowering of an interpolated string
        InterpolatedStringHandlerCreation,
        /// Concatenation of interpolated strings for a handler
        InterpolatedStringAddition,
        /// Handler call appending literal text
        InterpolatedStringAppendLiteral,
        /// Handler call appending a formatted value
        InterpolatedStringAppendFormatted,
        /// Handler call that failed to bind
        InterpolatedStringAppendInvalid,
        /// Placeholder for a value passed to a handler constructor
        InterpolatedStringHandlerArgumentPlaceholder,
    ],
    QueryOrBody => [
        /// Query expression translated to method calls
        TranslatedQuery,
        /// Aggregate query clause
        AggregateQuery,
        /// Body of a method
        MethodBody,
        /// Body of a constructor
        ConstructorBody,
        /// Placeholder for a value supplied by the enclosing construct
        Placeholder,
    ],
    Synthetic => [
        /// Capture of a value into a flow temporary
        FlowCapture,
        /// Read of a flow temporary
        FlowCaptureReference,
        /// Null test introduced by flow lowering
        IsNull,
        /// Exception caught by a handler region
        CaughtException,
        /// Anonymous function bound to a flow-graph context
        FlowAnonymousFunction,
        /// Guard for one-time static local initialization
        StaticLocalInitializationSemaphore,
    ],
}

impl OperationKind {
    /// Whether nodes of this kind produce no value
    ///
    /// Statements carry neither a result type nor a constant value.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(self.family(), KindFamily::Statement)
            || matches!(self, Self::MethodBody | Self::ConstructorBody)
    }

    /// Whether only the flow-graph builder produces this kind
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self.family(), KindFamily::Synthetic)
    }

    /// Whether this kind is one of the loop statements
    #[must_use]
    pub const fn is_loop(self) -> bool {
        matches!(
            self,
            Self::WhileLoop | Self::ForLoop | Self::ForToLoop | Self::ForEachLoop
        )
    }

    /// Whether this kind is one of the switch case clauses
    #[must_use]
    pub const fn is_case_clause(self) -> bool {
        matches!(
            self,
            Self::SingleValueCaseClause
                | Self::RelationalCaseClause
                | Self::RangeCaseClause
                | Self::PatternCaseClause
                | Self::DefaultCaseClause
        )
    }

    /// Whether this kind is a pattern (not a clause or switch expression)
    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(
            self,
            Self::ConstantPattern
                | Self::DeclarationPattern
                | Self::TypePattern
                | Self::RelationalPattern
                | Self::NegatedPattern
                | Self::BinaryPattern
                | Self::DiscardPattern
                | Self::RecursivePattern
                | Self::ListPattern
                | Self::SlicePattern
        )
    }

    /// Kinds belonging to `family`, in taxonomy order
    pub fn in_family(family: KindFamily) -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(move |kind| kind.family() == family)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_all_lists_every_kind_once() {
        let unique: FxHashSet<_> = OperationKind::ALL.iter().copied().collect();
        assert_eq!(unique.len(), OperationKind::ALL.len());
        assert_eq!(OperationKind::ALL.len(), 138);
    }

    #[test]
    fn test_names_match_variants() {
        assert_eq!(OperationKind::ForEachLoop.name(), "ForEachLoop");
        assert_eq!(OperationKind::Binary.to_string(), "Binary");
        assert_eq!(OperationKind::IsNull.family(), KindFamily::Synthetic);
    }

    #[test]
    fn test_statement_kinds_include_bodies() {
        assert!(OperationKind::Block.is_statement());
        assert!(OperationKind::MethodBody.is_statement());
        assert!(!OperationKind::Binary.is_statement());
        assert!(!OperationKind::FlowCapture.is_statement());
    }

    #[test]
    fn test_loop_and_case_clause_groups() {
        let loops: Vec<_> = OperationKind::ALL.iter().filter(|k| k.is_loop()).collect();
        assert_eq!(loops.len(), 4);
        let clauses = OperationKind::in_family(KindFamily::Pattern)
            .filter(|kind| kind.is_case_clause())
            .count();
        assert_eq!(clauses, 5);
    }

    #[test]
    fn test_synthetic_family_is_closed() {
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
    }
}
