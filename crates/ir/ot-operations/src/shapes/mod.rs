//! Per-kind operation shapes
//!
//! A shape is the kind-specific part of an operation: its child slots in
//! evaluation order and its plain attributes. Most shapes serve exactly one
//! kind. `ReturnOperation`, `IncrementOrDecrementOperation` and
//! `InterpolatedStringAppendOperation` serve several kinds and carry the kind
//! as a field.
//!
//! [`OperationPayload`] is the closed sum of all shapes. Deriving `Visitor`
//! on it generates [`OperationVisitor`], [`OperationFolder`] and the
//! exhaustive dispatch `match` both traits are reached through.

mod creation;
mod declarations;
mod invocation;
mod operators;
mod patterns;
mod queries;
mod references;
mod statements;
mod strings;

pub use creation::*;
pub use declarations::*;
pub use invocation::*;
pub use operators::*;
pub use patterns::*;
pub use queries::*;
pub use references::*;
pub use statements::*;
pub use strings::*;

use crate::flow::{
    CaughtExceptionOperation, FlowAnonymousFunctionOperation, FlowCaptureOperation,
    FlowCaptureReferenceOperation, IsNullOperation, StaticLocalInitializationSemaphoreOperation,
};
use ot_derive::Visitor;

/// Kind-specific part of an operation
#[allow(missing_docs, reason = "each variant wraps the documented shape of the same name")]
#[derive(Debug, Visitor)]
#[visitor(node = crate::Operation, visitor = OperationVisitor, folder = OperationFolder)]
pub enum OperationPayload {
    // Unrepresented
    None(NoneOperation),
    Invalid(InvalidOperation),

    // Statements
    Block(BlockOperation),
    VariableDeclarationGroup(VariableDeclarationGroupOperation),
    Switch(SwitchOperation),
    SwitchCase(SwitchCaseOperation),
    WhileLoop(WhileLoopOperation),
    ForLoop(ForLoopOperation),
    ForToLoop(ForToLoopOperation),
    ForEachLoop(ForEachLoopOperation),
    Labeled(LabeledOperation),
    Branch(BranchOperation),
    Empty(EmptyOperation),
    Return(ReturnOperation),
    Lock(LockOperation),
    Try(TryOperation),
    CatchClause(CatchClauseOperation),
    Using(UsingOperation),
    UsingDeclaration(UsingDeclarationOperation),
    Fixed(FixedOperation),
    WithStatement(WithStatementOperation),
    ExpressionStatement(ExpressionStatementOperation),
    LocalFunction(LocalFunctionOperation),
    Stop(StopOperation),
    End(EndOperation),
    RaiseEvent(RaiseEventOperation),
    ReDim(ReDimOperation),
    ReDimClause(ReDimClauseOperation),

    // Declarations
    VariableDeclaration(VariableDeclarationOperation),
    VariableDeclarator(VariableDeclaratorOperation),
    VariableInitializer(VariableInitializerOperation),
    FieldInitializer(FieldInitializerOperation),
    PropertyInitializer(PropertyInitializerOperation),
    ParameterInitializer(ParameterInitializerOperation),

    // Literals and references
    Literal(LiteralOperation),
    Utf8String(Utf8StringOperation),
    LocalReference(LocalReferenceOperation),
    ParameterReference(ParameterReferenceOperation),
    FieldReference(FieldReferenceOperation),
    MethodReference(MethodReferenceOperation),
    PropertyReference(PropertyReferenceOperation),
    EventReference(EventReferenceOperation),
    ArrayElementReference(ArrayElementReferenceOperation),
    InstanceReference(InstanceReferenceOperation),
    ImplicitIndexerReference(ImplicitIndexerReferenceOperation),
    InlineArrayAccess(InlineArrayAccessOperation),
    PointerIndirectionReference(PointerIndirectionReferenceOperation),
    DynamicMemberReference(DynamicMemberReferenceOperation),
    DynamicIndexerAccess(DynamicIndexerAccessOperation),
    DynamicInvocation(DynamicInvocationOperation),

    // Operators
    Unary(UnaryOperation),
    Binary(BinaryOperation),
    TupleBinary(TupleBinaryOperation),
    IncrementOrDecrement(IncrementOrDecrementOperation),
    Conversion(ConversionOperation),
    Conditional(ConditionalOperation),
    Coalesce(CoalesceOperation),
    CoalesceAssignment(CoalesceAssignmentOperation),
    SimpleAssignment(SimpleAssignmentOperation),
    CompoundAssignment(CompoundAssignmentOperation),
    DeconstructionAssignment(DeconstructionAssignmentOperation),
    EventAssignment(EventAssignmentOperation),
    Parenthesized(ParenthesizedOperation),
    ConditionalAccess(ConditionalAccessOperation),
    ConditionalAccessInstance(ConditionalAccessInstanceOperation),
    IsType(IsTypeOperation),
    IsPattern(IsPatternOperation),
    Range(RangeOperation),
    Throw(ThrowOperation),
    Await(AwaitOperation),
    AddressOf(AddressOfOperation),
    SizeOf(SizeOfOperation),
    TypeOf(TypeOfOperation),
    NameOf(NameOfOperation),
    DefaultValue(DefaultValueOperation),
    DeclarationExpression(DeclarationExpressionOperation),
    Discard(DiscardOperation),
    Tuple(TupleOperation),
    With(WithOperation),

    // Creation
    ObjectCreation(ObjectCreationOperation),
    TypeParameterObjectCreation(TypeParameterObjectCreationOperation),
    NoPiaObjectCreation(NoPiaObjectCreationOperation),
    DynamicObjectCreation(DynamicObjectCreationOperation),
    ArrayCreation(ArrayCreationOperation),
    ArrayInitializer(ArrayInitializerOperation),
    AnonymousObjectCreation(AnonymousObjectCreationOperation),
    ObjectOrCollectionInitializer(ObjectOrCollectionInitializerOperation),
    MemberInitializer(MemberInitializerOperation),
    DelegateCreation(DelegateCreationOperation),
    AnonymousFunction(AnonymousFunctionOperation),
    CollectionExpression(CollectionExpressionOperation),
    Spread(SpreadOperation),

    // Invocation
    Invocation(InvocationOperation),
    FunctionPointerInvocation(FunctionPointerInvocationOperation),
    Argument(ArgumentOperation),
    OmittedArgument(OmittedArgumentOperation),
    Attribute(AttributeOperation),

    // Patterns and case clauses
    ConstantPattern(ConstantPatternOperation),
    DeclarationPattern(DeclarationPatternOperation),
    TypePattern(TypePatternOperation),
    RelationalPattern(RelationalPatternOperation),
    NegatedPattern(NegatedPatternOperation),
    BinaryPattern(BinaryPatternOperation),
    DiscardPattern(DiscardPatternOperation),
    RecursivePattern(RecursivePatternOperation),
    PropertySubpattern(PropertySubpatternOperation),
    ListPattern(ListPatternOperation),
    SlicePattern(SlicePatternOperation),
    SwitchExpression(SwitchExpressionOperation),
    SwitchExpressionArm(SwitchExpressionArmOperation),
    SingleValueCaseClause(SingleValueCaseClauseOperation),
    RelationalCaseClause(RelationalCaseClauseOperation),
    RangeCaseClause(RangeCaseClauseOperation),
    PatternCaseClause(PatternCaseClauseOperation),
    DefaultCaseClause(DefaultCaseClauseOperation),

    // Interpolated strings
    InterpolatedString(InterpolatedStringOperation),
    InterpolatedStringText(InterpolatedStringTextOperation),
    Interpolation(InterpolationOperation),
    InterpolatedStringHandlerCreation(InterpolatedStringHandlerCreationOperation),
    InterpolatedStringAddition(InterpolatedStringAdditionOperation),
    InterpolatedStringAppend(InterpolatedStringAppendOperation),
    InterpolatedStringHandlerArgumentPlaceholder(InterpolatedStringHandlerArgumentPlaceholderOperation),

    // Queries and bodies
    TranslatedQuery(TranslatedQueryOperation),
    AggregateQuery(AggregateQueryOperation),
    MethodBody(MethodBodyOperation),
    ConstructorBody(ConstructorBodyOperation),
    Placeholder(PlaceholderOperation),

    // Synthetic flow nodes
    FlowCapture(FlowCaptureOperation),
    FlowCaptureReference(FlowCaptureReferenceOperation),
    IsNull(IsNullOperation),
    CaughtException(CaughtExceptionOperation),
    FlowAnonymousFunction(FlowAnonymousFunctionOperation),
    StaticLocalInitializationSemaphore(StaticLocalInitializationSemaphoreOperation),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::descriptor_for;
    use crate::OperationKind;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_every_kind_has_exactly_one_shape() {
        let mut owners: FxHashMap<OperationKind, &str> = FxHashMap::default();
        for descriptor in OperationPayload::SHAPES {
            for kind in descriptor.kinds {
                let previous = owners.insert(*kind, descriptor.name);
                assert!(previous.is_none(), "{kind} served by {previous:?} and {}", descriptor.name);
            }
        }
        for kind in OperationKind::ALL {
            assert!(owners.contains_key(kind), "{kind} has no shape");
        }
        assert_eq!(owners.len(), OperationKind::ALL.len());
    }

    #[test]
    fn test_shared_shapes() {
        let shared: Vec<_> = OperationPayload::SHAPES
            .iter()
            .filter(|descriptor| descriptor.is_shared())
            .map(|descriptor| descriptor.name)
            .collect();
        assert_eq!(
            shared,
            [
                "ReturnOperation",
                "IncrementOrDecrementOperation",
                "InterpolatedStringAppendOperation"
            ]
        );
    }

    #[test]
    fn test_descriptor_lookup() {
        let descriptor = descriptor_for(OperationKind::YieldBreak).expect("return shape");
        assert_eq!(descriptor.name, "ReturnOperation");
        assert_eq!(descriptor.visit_method, "visit_return");
        assert_eq!(descriptor.slot_names, ["returned_value"]);

        let switch_case = descriptor_for(OperationKind::SwitchCase).expect("switch case shape");
        assert_eq!(switch_case.slot_names, ["clauses", "body"]);
    }
}
