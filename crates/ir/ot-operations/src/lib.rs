//! Operation tree
//!
//! A language-neutral, immutable tree describing the semantics of bound
//! code: each node is an [`Operation`] with a kind from a closed taxonomy, a
//! header of resolved facts and a kind-specific shape holding its children.
//!
//! Children are held in slots that are either filled when the node is built
//! or produced on first read. Lazy slots publish at most one value, safely
//! under concurrent readers, and every installed child gets a back-link to
//! its parent. Consumers traverse through [`OperationVisitor`] and
//! [`OperationFolder`], or by walking [`Operation::children`].

pub mod attributes;
pub mod constant;
pub mod dump;
mod error;
pub mod flow;
mod header;
pub mod kind;
mod navigation;
mod node;
pub mod shape;
pub mod shapes;
pub mod slot;
mod verify;
pub mod visitor;

pub use constant::ConstantValue;
pub use dump::dump;
pub use error::{ConstructionError, ParentLinkViolation};
pub use header::OperationHeader;
pub use kind::{KindFamily, OperationKind};
pub use navigation::{Ancestors, Descendants, OperationTreeExt};
pub use node::{Children, Operation, OperationRef, Slots};
pub use shapes::OperationPayload;
pub use slot::{Child, ChildList, OptionalChild, Slot};
pub use visitor::{OperationFolder, OperationVisitor};
