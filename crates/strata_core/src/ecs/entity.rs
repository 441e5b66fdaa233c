//! # Entity Handles
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the registry's slot table
//! - A generation counter for detecting stale handles
//!
//! The per-type bookkeeping for a live entity lives in an [`EntityRecord`]
//! owned by the registry, never in the handle itself.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

/// Handle to an entity owned by a [`Registry`](super::Registry).
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into the registry's slot table
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// Handles are `Copy` and may be stored anywhere, including inside other
/// components. Once the entity is destroyed its slot generation moves on and
/// every copy of the handle is rejected by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity ID from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the packed 64-bit representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

/// Sparse slot table entry, indexed by [`EntityId::index`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct EntitySlot {
    /// Generation of the entity currently (or last) occupying this slot.
    pub(crate) generation: u32,
    /// Position of the entity's record in the dense entity collection.
    /// `None` while the slot sits on the free list.
    pub(crate) dense: Option<usize>,
}

impl EntitySlot {
    /// A slot occupied by a freshly created entity at `dense`.
    #[inline]
    pub(crate) const fn occupied(generation: u32, dense: usize) -> Self {
        Self {
            generation,
            dense: Some(dense),
        }
    }

    /// Returns the dense position if `id` is the live occupant of this slot.
    #[inline]
    pub(crate) fn resolve(&self, id: EntityId) -> Option<usize> {
        if self.generation == id.generation() {
            self.dense
        } else {
            None
        }
    }

    /// Frees the slot and advances its generation so old handles go stale.
    #[inline]
    pub(crate) fn release(&mut self) {
        self.dense = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Dense entity record: the handle plus, per attached component type, the
/// record's position inside that type's storage.
#[derive(Debug)]
pub(crate) struct EntityRecord {
    pub(crate) id: EntityId,
    pub(crate) components: HashMap<TypeId, usize>,
}

impl EntityRecord {
    /// A record with no components attached.
    #[inline]
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            components: HashMap::new(),
        }
    }
}
