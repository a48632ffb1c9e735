//! Literals and references to locals, members and instances

use crate::attributes::{InstanceReferenceKind, RefKind};
use crate::slot::{Child, ChildList, OptionalChild};
use crate::{ConstructionError, OperationHeader, OperationKind};
use ot_derive::Shape;
use ot_intern::Symbol;
use ot_symbols::{EventId, FieldId, LocalId, MethodId, ParameterId, PropertyId, SymbolId, TypeId};
use std::sync::Arc;

/// Literal; the value lives in the header's constant
#[derive(Debug, Shape)]
#[shape(kind = Literal, validate = check_constant)]
pub struct LiteralOperation {}

impl LiteralOperation {
    fn check_constant(&self, header: &OperationHeader) -> Result<(), ConstructionError> {
        if header.constant_value.is_none() {
            return Err(ConstructionError::MissingAttribute {
                kind: OperationKind::Literal,
                attribute: "constant value",
            });
        }
        Ok(())
    }
}

/// UTF-8 string literal
#[derive(Debug, Shape)]
#[shape(kind = Utf8String)]
pub struct Utf8StringOperation {
    /// Decoded text
    pub value: Arc<str>,
}

/// Reference to a local
#[derive(Debug, Shape)]
#[shape(kind = LocalReference)]
pub struct LocalReferenceOperation {
    /// The local
    pub local: LocalId,
    /// The reference also declares the local
    pub is_declaration: bool,
}

/// Reference to a parameter
#[derive(Debug, Shape)]
#[shape(kind = ParameterReference)]
pub struct ParameterReferenceOperation {
    /// The parameter
    pub parameter: ParameterId,
}

/// Reference to a field
#[derive(Debug, Shape)]
#[shape(kind = FieldReference)]
pub struct FieldReferenceOperation {
    /// Receiver; absent for static fields
    pub instance: OptionalChild,
    /// The field
    pub field: FieldId,
    /// The reference declares the field (tuple element names)
    pub is_declaration: bool,
}

/// Reference to a method group member
#[derive(Debug, Shape)]
#[shape(kind = MethodReference)]
pub struct MethodReferenceOperation {
    /// Receiver; absent for static methods
    pub instance: OptionalChild,
    /// The method
    pub method: MethodId,
    /// Reference goes through virtual dispatch
    pub is_virtual: bool,
}

/// Reference to a property or indexer
#[derive(Debug, Shape)]
#[shape(kind = PropertyReference)]
pub struct PropertyReferenceOperation {
    /// Receiver; absent for static properties
    pub instance: OptionalChild,
    /// Indexer arguments
    pub arguments: ChildList,
    /// The property
    pub property: PropertyId,
}

/// Reference to an event
#[derive(Debug, Shape)]
#[shape(kind = EventReference)]
pub struct EventReferenceOperation {
    /// Receiver; absent for static events
    pub instance: OptionalChild,
    /// The event
    pub event: EventId,
}

/// Array element access
#[derive(Debug, Shape)]
#[shape(kind = ArrayElementReference)]
pub struct ArrayElementReferenceOperation {
    /// The array
    pub array_reference: Child,
    /// One index per dimension
    pub indices: ChildList,
}

/// `this`, `base`, the implicit receiver of an initializer, and similar
#[derive(Debug, Shape)]
#[shape(kind = InstanceReference)]
pub struct InstanceReferenceOperation {
    /// What the reference stands for
    pub reference_kind: InstanceReferenceKind,
}

/// Index or range access lowered onto a length and an indexer
#[derive(Debug, Shape)]
#[shape(kind = ImplicitIndexerReference)]
pub struct ImplicitIndexerReferenceOperation {
    /// Receiver
    pub instance: Child,
    /// Index or range argument
    pub argument: Child,
    /// Length or count member
    pub length_symbol: SymbolId,
    /// Indexer or slice method
    pub indexer_symbol: SymbolId,
}

/// Element access on an inline array
#[derive(Debug, Shape)]
#[shape(kind = InlineArrayAccess)]
pub struct InlineArrayAccessOperation {
    /// The inline array
    pub instance: Child,
    /// Index or range argument
    pub argument: Child,
}

/// Pointer dereference
#[derive(Debug, Shape)]
#[shape(kind = PointerIndirectionReference)]
pub struct PointerIndirectionReferenceOperation {
    /// Dereferenced pointer
    pub pointer: Child,
}

/// Late-bound member access
#[derive(Debug, Shape)]
#[shape(kind = DynamicMemberReference)]
pub struct DynamicMemberReferenceOperation {
    /// Receiver; absent when only the containing type is known
    pub instance: OptionalChild,
    /// Member name
    pub member_name: Symbol,
    /// Explicit type arguments
    pub type_arguments: Vec<TypeId>,
    /// Type containing the member, for static access
    pub containing_type: Option<TypeId>,
}

/// Late-bound element access
#[derive(Debug, Shape)]
#[shape(kind = DynamicIndexerAccess)]
pub struct DynamicIndexerAccessOperation {
    /// Receiver
    pub operation: Child,
    /// Arguments
    pub arguments: ChildList,
    /// Per-argument names; empty when no argument is named
    pub argument_names: Vec<Option<Symbol>>,
    /// Per-argument passing modes; empty when all are by value
    pub argument_ref_kinds: Vec<RefKind>,
}

/// Late-bound invocation
#[derive(Debug, Shape)]
#[shape(kind = DynamicInvocation)]
pub struct DynamicInvocationOperation {
    /// Invoked expression
    pub operation: Child,
    /// Arguments
    pub arguments: ChildList,
    /// Per-argument names; empty when no argument is named
    pub argument_names: Vec<Option<Symbol>>,
    /// Per-argument passing modes; empty when all are by value
    pub argument_ref_kinds: Vec<RefKind>,
}
