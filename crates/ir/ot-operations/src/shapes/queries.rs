//! Query wrappers, member bodies, placeholders and unrepresented code

use crate::attributes::PlaceholderKind;
use crate::slot::{Child, ChildList, OptionalChild};
use ot_derive::Shape;
use ot_symbols::LocalId;

/// Construct without a dedicated kind
#[derive(Debug, Shape)]
#[shape(kind = None)]
pub struct NoneOperation {
    /// Operations found inside the construct
    pub children: ChildList,
}

/// Erroneous code
#[derive(Debug, Shape)]
#[shape(kind = Invalid)]
pub struct InvalidOperation {
    /// Operations that could still be bound
    pub children: ChildList,
}

/// Query expression translated to method calls
#[derive(Debug, Shape)]
#[shape(kind = TranslatedQuery)]
pub struct TranslatedQueryOperation {
    /// The translated calls
    pub operation: Child,
}

/// `Aggregate ... Into` clause
#[derive(Debug, Shape)]
#[shape(kind = AggregateQuery)]
pub struct AggregateQueryOperation {
    /// Grouped source
    pub group: Child,
    /// Aggregation over the group
    pub aggregation: Child,
}

/// Body of a method, accessor or operator
#[derive(Debug, Shape)]
#[shape(kind = MethodBody)]
pub struct MethodBodyOperation {
    /// Block body
    pub block_body: OptionalChild,
    /// Expression body
    pub expression_body: OptionalChild,
}

/// Body of a constructor
#[derive(Debug, Shape)]
#[shape(kind = ConstructorBody)]
pub struct ConstructorBodyOperation {
    /// `base(...)` or `this(...)` call
    pub initializer: OptionalChild,
    /// Block body
    pub block_body: OptionalChild,
    /// Expression body
    pub expression_body: OptionalChild,
    /// Locals declared by the initializer
    pub locals: Vec<LocalId>,
}

/// Value supplied by the enclosing construct
#[derive(Debug, Shape)]
#[shape(kind = Placeholder)]
pub struct PlaceholderOperation {
    /// What the placeholder stands for
    pub placeholder_kind: PlaceholderKind,
}
