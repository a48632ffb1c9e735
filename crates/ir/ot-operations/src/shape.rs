//! The per-shape contract implemented by `#[derive(Shape)]`

use crate::slot::{InstallSlot, Linkage, SlotView};
use crate::{ConstructionError, OperationHeader, OperationKind, OperationPayload};
use std::fmt;

/// Slot table and checks of one operation shape
///
/// Implemented by `#[derive(Shape)]`; slot indices follow evaluation order.
pub trait Shape {
    /// Name of the shape type
    const NAME: &'static str;
    /// Kinds this shape may report
    const KINDS: &'static [OperationKind];
    /// Names of the attached slots, in declaration order
    const SLOT_NAMES: &'static [&'static str];

    /// Kind this instance reports
    fn kind(&self) -> OperationKind;

    /// Attached slot at `index` in evaluation order, materializing it if lazy
    fn slot(&self, index: usize) -> Option<SlotView<'_>>;

    /// Every slot field together with its linkage
    fn for_each_slot(&self, visit: &mut dyn FnMut(&dyn InstallSlot, Linkage));

    /// Construction checks beyond what the field types enforce
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    fn validate(&self, header: &OperationHeader) -> Result<(), ConstructionError>;

    /// Plain attributes, by field name
    fn describe(&self, visit: &mut dyn FnMut(&'static str, &dyn fmt::Debug));
}

/// Typed access to a shape stored in an [`OperationPayload`]
pub trait ShapeCast: Shape + Sized {
    /// The shape, if `payload` wraps one of this type
    fn cast(payload: &OperationPayload) -> Option<&Self>;
}

/// Static description of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDescriptor {
    /// Name of the shape type
    pub name: &'static str,
    /// Kinds the shape serves
    pub kinds: &'static [OperationKind],
    /// Names of the attached slots
    pub slot_names: &'static [&'static str],
    /// Visitor method handling the shape
    pub visit_method: &'static str,
}

impl ShapeDescriptor {
    /// Whether the shape serves more than one kind
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.kinds.len() > 1
    }
}

/// Descriptor of the shape serving `kind`
#[must_use]
pub fn descriptor_for(kind: OperationKind) -> Option<&'static ShapeDescriptor> {
    OperationPayload::SHAPES
        .iter()
        .find(|descriptor| descriptor.kinds.contains(&kind))
}
