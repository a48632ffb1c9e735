//! Per-node facts shared by every kind

use crate::constant::ConstantValue;
use crate::error::ConstructionError;
use crate::kind::OperationKind;
use ot_span::SourceLocus;
use ot_symbols::{SemanticModelId, TypeId};

/// Already-resolved inputs every operation carries besides its shape
///
/// The binder (or the flow-graph builder for synthetic nodes) fills this in;
/// the tree never recomputes any of it.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationHeader {
    /// Source range the operation was bound from
    pub locus: SourceLocus,
    /// Type of the produced value; absent for statements
    pub result_type: Option<TypeId>,
    /// Compile-time constant, if known
    pub constant_value: Option<ConstantValue>,
    /// Synthesized by the compiler rather than written by the user
    pub is_implicit: bool,
    /// Semantic model that bound the operation; absent for synthetic nodes
    pub semantic_model: Option<SemanticModelId>,
}

impl OperationHeader {
    /// Header with only a locus
    #[must_use]
    pub const fn new(locus: SourceLocus) -> Self {
        Self {
            locus,
            result_type: None,
            constant_value: None,
            is_implicit: false,
            semantic_model: None,
        }
    }

    /// Sets the result type
    #[must_use]
    pub const fn with_type(mut self, result_type: TypeId) -> Self {
        self.result_type = Some(result_type);
        self
    }

    /// Sets the constant value
    #[must_use]
    pub fn with_constant(mut self, value: impl Into<ConstantValue>) -> Self {
        self.constant_value = Some(value.into());
        self
    }

    /// Marks the operation as compiler-synthesized
    #[must_use]
    pub const fn implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }

    /// Records the semantic model that bound the operation
    #[must_use]
    pub const fn in_model(mut self, model: SemanticModelId) -> Self {
        self.semantic_model = Some(model);
        self
    }

    /// Checks the header against the kind it is attached to
    ///
    /// # Errors
    ///
    /// Statements must not carry a type or constant, and synthetic flow nodes
    /// must not reference a semantic model.
    pub fn validate_for(&self, kind: OperationKind) -> Result<(), ConstructionError> {
        if kind.is_statement() && (self.result_type.is_some() || self.constant_value.is_some()) {
            return Err(ConstructionError::StatementWithValue { kind });
        }
        if kind.is_synthetic() && self.semantic_model.is_some() {
            return Err(ConstructionError::SyntheticWithSemanticModel { kind });
        }
        Ok(())
    }
}
