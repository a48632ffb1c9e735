//! Variable declarations and member initializers

use crate::slot::{Child, ChildList, OptionalChild};
use crate::{ConstructionError, OperationHeader, OperationKind};
use ot_derive::Shape;
use ot_symbols::{FieldId, LocalId, ParameterId, PropertyId};

/// One declaration with its declarators
#[derive(Debug, Shape)]
#[shape(kind = VariableDeclaration)]
pub struct VariableDeclarationOperation {
    /// Array bounds written on the declaration itself (erroneous in most languages)
    pub ignored_dimensions: ChildList,
    /// Declarators
    pub declarators: ChildList,
    /// Initializer shared by all declarators
    pub initializer: OptionalChild,
}

/// One declared variable
#[derive(Debug, Shape)]
#[shape(kind = VariableDeclarator)]
pub struct VariableDeclaratorOperation {
    /// Array bounds written on the name
    pub ignored_arguments: ChildList,
    /// Initializer
    pub initializer: OptionalChild,
    /// The declared local
    pub symbol: LocalId,
}

/// `= value` of a declarator
#[derive(Debug, Shape)]
#[shape(kind = VariableInitializer)]
pub struct VariableInitializerOperation {
    /// Initial value
    pub value: Child,
    /// Locals declared inside the value
    pub locals: Vec<LocalId>,
}

/// Initializer of one or more fields
#[derive(Debug, Shape)]
#[shape(kind = FieldInitializer, validate = check_fields)]
pub struct FieldInitializerOperation {
    /// Initial value
    pub value: Child,
    /// Fields receiving the value
    pub initialized_fields: Vec<FieldId>,
    /// Locals declared inside the value
    pub locals: Vec<LocalId>,
}

impl FieldInitializerOperation {
    fn check_fields(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.initialized_fields.is_empty() {
            return Err(ConstructionError::MissingAttribute {
                kind: OperationKind::FieldInitializer,
                attribute: "initialized fields",
            });
        }
        Ok(())
    }
}

/// Initializer of one or more properties
#[derive(Debug, Shape)]
#[shape(kind = PropertyInitializer, validate = check_properties)]
pub struct PropertyInitializerOperation {
    /// Initial value
    pub value: Child,
    /// Properties receiving the value
    pub initialized_properties: Vec<PropertyId>,
    /// Locals declared inside the value
    pub locals: Vec<LocalId>,
}

impl PropertyInitializerOperation {
    fn check_properties(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        if self.initialized_properties.is_empty() {
            return Err(ConstructionError::MissingAttribute {
                kind: OperationKind::PropertyInitializer,
                attribute: "initialized properties",
            });
        }
        Ok(())
    }
}

/// Default value of an optional parameter
#[derive(Debug, Shape)]
#[shape(kind = ParameterInitializer)]
pub struct ParameterInitializerOperation {
    /// Default value
    pub value: Child,
    /// Parameter receiving the value
    pub parameter: ParameterId,
    /// Locals declared inside the value
    pub locals: Vec<LocalId>,
}
