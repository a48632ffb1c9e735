//! Child slots
//!
//! A slot holds the operations a node exposes at one position of its
//! evaluation order. The value is either supplied when the node is built
//! (eager) or computed on first read from a producer (lazy). Both forms share
//! the same cell and the same parent stamping, so a shape never needs two
//! variants.
//!
//! Lazy publication never blocks a reader behind a producer: every caller
//! that finds the cell empty runs the producer itself, stamps the candidate
//! with the slot's owner and tries to publish it. The first publish wins and
//! later candidates are dropped. Lists are published as one value, never
//! element by element.

use crate::node::{Operation, OperationRef};
use crate::verify;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use tracing::trace;

/// How the values of a slot relate to the node holding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Linkage {
    /// Values are children: stamped with the holder as parent and visible
    /// through `children()`
    Attached,
    /// Values alias nodes owned elsewhere: never stamped and never exposed as
    /// children
    Detached,
}

/// Value a slot can hold
pub trait SlotValue: Send + Sync + 'static {
    /// The held operations in evaluation order
    fn operations(&self) -> &[OperationRef];
}

impl SlotValue for OperationRef {
    fn operations(&self) -> &[OperationRef] {
        std::slice::from_ref(self)
    }
}

impl SlotValue for Option<OperationRef> {
    fn operations(&self) -> &[OperationRef] {
        self.as_slice()
    }
}

impl SlotValue for Vec<OperationRef> {
    fn operations(&self) -> &[OperationRef] {
        self.as_slice()
    }
}

type Producer<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Node a slot was installed into
struct Owner {
    node: Weak<Operation>,
    linkage: Linkage,
}

impl Owner {
    fn stamp(&self, operations: &[OperationRef]) {
        if self.linkage == Linkage::Attached {
            for operation in operations {
                operation.stamp_parent(&self.node);
            }
        }
    }
}

/// Publish-once cell holding the operations of one slot
pub struct Slot<T: SlotValue> {
    value: OnceLock<T>,
    producer: Option<Producer<T>>,
    owner: OnceLock<Owner>,
}

/// Slot holding exactly one operation
pub type Child = Slot<OperationRef>;

/// Slot holding zero or one operation
pub type OptionalChild = Slot<Option<OperationRef>>;

/// Slot holding an ordered list of operations
pub type ChildList = Slot<Vec<OperationRef>>;

impl<T: SlotValue> Slot<T> {
    /// Slot whose value is known when the node is built
    #[must_use]
    pub fn eager(value: T) -> Self {
        Self {
            value: OnceLock::from(value),
            producer: None,
            owner: OnceLock::new(),
        }
    }

    /// Slot whose value is produced on first read
    ///
    /// The producer must be pure: racing readers may each run it once, and
    /// only one result is kept.
    #[must_use]
    pub fn lazy(producer: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            value: OnceLock::new(),
            producer: Some(Arc::new(producer)),
            owner: OnceLock::new(),
        }
    }

    /// Whether the value comes from a producer
    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        self.producer.is_some()
    }

    /// Whether a value has been published
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// The slot value, producing and publishing it on first read
    pub fn get(&self) -> &T {
        match self.value.get() {
            Some(value) => value,
            None => self.materialize(),
        }
    }

    /// The held operations, producing them on first read
    pub fn as_slice(&self) -> &[OperationRef] {
        self.get().operations()
    }

    fn materialize(&self) -> &T {
        let Some(producer) = &self.producer else {
            unreachable!("eager slots are populated when they are created");
        };

        let candidate = producer();
        if let Some(owner) = self.owner.get() {
            owner.stamp(candidate.operations());
        }
        let won = self.value.set(candidate).is_ok();
        let Some(published) = self.value.get() else {
            unreachable!("a publish attempt always leaves the cell populated");
        };

        let owner = self.owner.get().and_then(|owner| owner.node.upgrade());
        if won {
            trace!(
                owner = ?owner.as_ref().map(|node| node.kind()),
                children = published.operations().len(),
                "published lazy slot"
            );
            if verify::ENABLED {
                if let (Some(node), Some(installed)) = (&owner, self.owner.get()) {
                    verify::assert_links(node, installed.linkage, published.operations());
                }
            }
        } else {
            trace!(
                owner = ?owner.as_ref().map(|node| node.kind()),
                "discarded lazy slot result that lost the publish race"
            );
        }
        published
    }
}

impl<T: SlotValue> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Self::eager(value)
    }
}

impl<T: SlotValue + Default> Default for Slot<T> {
    fn default() -> Self {
        Self::eager(T::default())
    }
}

impl<T: SlotValue> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f
                .debug_list()
                .entries(value.operations().iter().map(|operation| operation.kind()))
                .finish(),
            None => f.write_str("<unmaterialized>"),
        }
    }
}

/// Type-erased slot access used by node construction and verification
pub trait InstallSlot {
    /// Records the node holding this slot and stamps any value already present
    fn install(&self, holder: &Weak<Operation>, linkage: Linkage);

    /// Operations published so far, without running a producer
    fn published(&self) -> Option<&[OperationRef]>;

    /// Operations of the slot, producing them if needed
    fn materialize(&self) -> &[OperationRef];
}

impl<T: SlotValue> InstallSlot for Slot<T> {
    fn install(&self, holder: &Weak<Operation>, linkage: Linkage) {
        let owner = Owner {
            node: holder.clone(),
            linkage,
        };
        if let Some(value) = self.value.get() {
            owner.stamp(value.operations());
        }
        // A shape is moved into exactly one node, so the slot is installed once.
        let _ = self.owner.set(owner);
    }

    fn published(&self) -> Option<&[OperationRef]> {
        self.value.get().map(SlotValue::operations)
    }

    fn materialize(&self) -> &[OperationRef] {
        self.as_slice()
    }
}

/// Named view of one slot's operations
#[derive(Debug, Clone, Copy)]
pub struct SlotView<'a> {
    name: &'static str,
    operations: &'a [OperationRef],
}

impl<'a> SlotView<'a> {
    /// View over `operations` labelled `name`
    #[must_use]
    pub const fn new(name: &'static str, operations: &'a [OperationRef]) -> Self {
        Self { name, operations }
    }

    /// Field name of the slot
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Operations in evaluation order
    #[must_use]
    pub const fn operations(&self) -> &'a [OperationRef] {
        self.operations
    }

    /// Number of operations in the slot
    #[must_use]
    pub const fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the slot holds nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterator over the operations
    pub fn iter(&self) -> std::slice::Iter<'a, OperationRef> {
        self.operations.iter()
    }
}
