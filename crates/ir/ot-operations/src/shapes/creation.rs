//! Object, array, delegate and collection creation

use crate::attributes::{ConversionInfo, RefKind};
use crate::slot::{Child, ChildList, OptionalChild};
use ot_derive::Shape;
use ot_intern::Symbol;
use ot_symbols::{MethodId, TypeId};

/// `new T(args) { ... }`
#[derive(Debug, Shape)]
#[shape(kind = ObjectCreation)]
pub struct ObjectCreationOperation {
    /// Constructor arguments
    pub arguments: ChildList,
    /// Object or collection initializer
    pub initializer: OptionalChild,
    /// Constructor; absent for erroneous code and default struct construction
    pub constructor: Option<MethodId>,
}

/// `new T()` where `T` is a type parameter
#[derive(Debug, Shape)]
#[shape(kind = TypeParameterObjectCreation)]
pub struct TypeParameterObjectCreationOperation {
    /// Object or collection initializer
    pub initializer: OptionalChild,
}

/// Creation of an embedded interop type
#[derive(Debug, Shape)]
#[shape(kind = NoPiaObjectCreation)]
pub struct NoPiaObjectCreationOperation {
    /// Object or collection initializer
    pub initializer: OptionalChild,
}

/// Late-bound object creation
#[derive(Debug, Shape)]
#[shape(kind = DynamicObjectCreation)]
pub struct DynamicObjectCreationOperation {
    /// Constructor arguments
    pub arguments: ChildList,
    /// Object or collection initializer
    pub initializer: OptionalChild,
    /// Per-argument names; empty when no argument is named
    pub argument_names: Vec<Option<Symbol>>,
    /// Per-argument passing modes; empty when all are by value
    pub argument_ref_kinds: Vec<RefKind>,
}

/// `new T[n] { ... }`
#[derive(Debug, Shape)]
#[shape(kind = ArrayCreation)]
pub struct ArrayCreationOperation {
    /// One size per dimension
    pub dimension_sizes: ChildList,
    /// Element initializer
    pub initializer: OptionalChild,
}

/// `{ a, b, c }` of an array creation; nested for jagged dimensions
#[derive(Debug, Shape)]
#[shape(kind = ArrayInitializer)]
pub struct ArrayInitializerOperation {
    /// Elements or nested initializers
    pub element_values: ChildList,
}

/// `new { A = a, B = b }`
#[derive(Debug, Shape)]
#[shape(kind = AnonymousObjectCreation)]
pub struct AnonymousObjectCreationOperation {
    /// One assignment per member
    pub initializers: ChildList,
}

/// `{ A = a }` or `{ a, b }` after a creation
#[derive(Debug, Shape)]
#[shape(kind = ObjectOrCollectionInitializer)]
pub struct ObjectOrCollectionInitializerOperation {
    /// Member assignments or add calls
    pub initializers: ChildList,
}

/// `A = { ... }` inside an object initializer
#[derive(Debug, Shape)]
#[shape(kind = MemberInitializer)]
pub struct MemberInitializerOperation {
    /// Initialized member
    pub initialized_member: Child,
    /// Nested initializer
    pub initializer: Child,
}

/// Delegate created from a method group or lambda
#[derive(Debug, Shape)]
#[shape(kind = DelegateCreation)]
pub struct DelegateCreationOperation {
    /// Method reference or anonymous function
    pub target: Child,
}

/// Lambda or anonymous method
#[derive(Debug, Shape)]
#[shape(kind = AnonymousFunction)]
pub struct AnonymousFunctionOperation {
    /// Function body as a block
    pub body: Child,
    /// The function
    pub symbol: MethodId,
}

/// `[a, b, ..c]`
#[derive(Debug, Shape)]
#[shape(kind = CollectionExpression)]
pub struct CollectionExpressionOperation {
    /// Elements and spreads
    pub elements: ChildList,
    /// Builder or constructor method, if one is used
    pub construct_method: Option<MethodId>,
}

/// `..values` inside a collection expression
#[derive(Debug, Shape)]
#[shape(kind = Spread)]
pub struct SpreadOperation {
    /// Spread collection
    pub operand: Child,
    /// Element type of the spread collection
    pub element_type: TypeId,
    /// Conversion from element type to the target element type
    pub element_conversion: ConversionInfo,
}
