//! Invocations and their arguments

use crate::attributes::{ArgumentKind, ConversionInfo};
use crate::slot::{Child, ChildList, OptionalChild};
use crate::{ConstructionError, OperationHeader, OperationKind};
use ot_derive::Shape;
use ot_symbols::{MethodId, ParameterId, TypeId};

/// Method call
#[derive(Debug, Shape)]
#[shape(kind = Invocation)]
pub struct InvocationOperation {
    /// Receiver; absent for static calls
    pub instance: OptionalChild,
    /// Arguments in evaluation order
    pub arguments: ChildList,
    /// Called method
    pub target_method: MethodId,
    /// Call goes through virtual dispatch
    pub is_virtual: bool,
    /// Type a static abstract call is constrained to
    pub constrained_to_type: Option<TypeId>,
}

/// Call through a function pointer
#[derive(Debug, Shape)]
#[shape(kind = FunctionPointerInvocation)]
pub struct FunctionPointerInvocationOperation {
    /// Function pointer
    pub target: Child,
    /// Arguments in evaluation order
    pub arguments: ChildList,
}

/// Argument matched to a parameter
#[derive(Debug, Shape)]
#[shape(kind = Argument, validate = check_conversions)]
pub struct ArgumentOperation {
    /// Passed value
    pub value: Child,
    /// How the argument was supplied
    pub argument_kind: ArgumentKind,
    /// Matched parameter; absent in erroneous code
    pub parameter: Option<ParameterId>,
    /// Conversion from the value to the parameter type
    pub in_conversion: ConversionInfo,
    /// Conversion back to the value for by-reference parameters
    pub out_conversion: ConversionInfo,
}

impl ArgumentOperation {
    fn check_conversions(&self, _header: &OperationHeader) -> Result<(), ConstructionError> {
        for (attribute, conversion) in [("in_conversion", &self.in_conversion), ("out_conversion", &self.out_conversion)] {
            if let Some(reason) = conversion.inconsistency() {
                return Err(ConstructionError::InconsistentAttribute {
                    kind: OperationKind::Argument,
                    attribute,
                    reason,
                });
            }
        }
        Ok(())
    }
}

/// Argument left out of a call where the language allows it
#[derive(Debug, Shape)]
#[shape(kind = OmittedArgument)]
pub struct OmittedArgumentOperation {}

/// Attribute application
#[derive(Debug, Shape)]
#[shape(kind = Attribute)]
pub struct AttributeOperation {
    /// Constructor call of the attribute
    pub operation: Child,
}
