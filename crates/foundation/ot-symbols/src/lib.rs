//! Opaque handles for already-resolved semantic entities
//!
//! The operation tree never inspects symbols or types. The binder resolves
//! them, hands over an id, and consumers look the id up in whatever table the
//! binder owns. Keeping the handles in their own crate lets analyzers depend
//! on them without pulling in the whole tree.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Type descriptor of a value produced by an operation
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("type#{_0}")]
pub struct TypeId(pub u32);

/// Method, constructor, operator method or local function
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("method#{_0}")]
pub struct MethodId(pub u32);

/// Field of a type
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("field#{_0}")]
pub struct FieldId(pub u32);

/// Property or indexer
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("property#{_0}")]
pub struct PropertyId(pub u32);

/// Event
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("event#{_0}")]
pub struct EventId(pub u32);

/// Local variable, including compiler-generated locals
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("local#{_0}")]
pub struct LocalId(pub u32);

/// Parameter of a method, lambda or indexer
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("parameter#{_0}")]
pub struct ParameterId(pub u32);

/// Jump target: user labels and the implicit continue/exit labels of loops
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("label#{_0}")]
pub struct LabelId(pub u32);

/// Any other symbol (discards, pattern designations, deconstruct methods)
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("symbol#{_0}")]
pub struct SymbolId(pub u32);

/// Semantic model that owns an operation tree
///
/// Nodes built from syntax record the model that bound them; synthetic flow
/// nodes have none.
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("model#{_0}")]
pub struct SemanticModelId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_render_with_their_category() {
        assert_eq!(TypeId(4).to_string(), "type#4");
        assert_eq!(LocalId(0).to_string(), "local#0");
        assert_eq!(SemanticModelId(2).to_string(), "model#2");
    }

    #[test]
    fn test_handles_of_different_categories_do_not_mix() {
        // Same raw index, different entity: only comparable within a category.
        let method = MethodId(1);
        let field = FieldId(1);
        assert_eq!(method.0, field.0);
        assert_ne!(method.to_string(), field.to_string());
    }
}
