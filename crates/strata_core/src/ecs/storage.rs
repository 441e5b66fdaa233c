//! # Component Storage
//!
//! Dense, order-unstable storage for a single component type.
//!
//! The storage keeps two parallel arrays:
//! - `owners[i]` is the entity that owns the record at position `i`
//! - `data[i]` is that entity's payload
//!
//! Removal is swap-with-last-and-pop, so both insertion and removal are
//! O(1) and iteration always walks contiguous memory. The caller (the
//! registry) is told which owner moved so it can fix that owner's slot.

use std::any::Any;

use super::component::{Component, ComponentKey};
use super::entity::EntityId;

/// Storage for a single component type.
///
/// # Type Parameters
///
/// * `C` - The component type to store
pub struct ComponentStorage<C: Component> {
    /// Owner of each record, parallel to `data`.
    owners: Vec<EntityId>,
    /// The dense array of components.
    data: Vec<C>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates empty storage with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            owners: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the storage holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends a record and returns its position.
    #[inline]
    pub fn push(&mut self, owner: EntityId, component: C) -> usize {
        let slot = self.data.len();
        self.owners.push(owner);
        self.data.push(component);
        slot
    }

    /// Gets the component at `slot`.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&C> {
        self.data.get(slot)
    }

    /// Gets the component at `slot` mutably.
    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut C> {
        self.data.get_mut(slot)
    }

    /// Removes the record at `slot` by moving the last record into it.
    ///
    /// Returns the removed payload and, if a record was relocated, the
    /// owner of that record. Its slot for this type is now `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    pub fn swap_remove(&mut self, slot: usize) -> (C, Option<EntityId>) {
        let removed = self.data.swap_remove(slot);
        self.owners.swap_remove(slot);
        (removed, self.owners.get(slot).copied())
    }

    /// Owners in storage order.
    #[inline]
    #[must_use]
    pub fn owners(&self) -> &[EntityId] {
        &self.owners
    }

    /// Returns a slice of all components, in storage order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns a mutable slice of all components, in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }

    /// Iterates over `(owner, component)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.owners.iter().copied().zip(self.data.iter())
    }

    /// Iterates mutably over `(owner, component)` pairs.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut C)> {
        self.owners.iter().copied().zip(self.data.iter_mut())
    }
}

/// Type-erased view of a [`ComponentStorage`], used where the registry only
/// knows a component's `TypeId` (entity destruction, removal by type id).
pub(crate) trait ErasedStorage: Any + Send + Sync {
    /// Key of the stored component type.
    fn key(&self) -> ComponentKey;

    /// Number of records.
    fn len(&self) -> usize;

    /// Owners in storage order.
    fn owners(&self) -> &[EntityId];

    /// Swap-removes the record at `slot`, dropping its payload.
    fn swap_remove_erased(&mut self, slot: usize) -> Option<EntityId>;

    /// The payload at `slot`, type-erased.
    fn get_erased(&self, slot: usize) -> Option<&dyn Any>;

    /// The payload at `slot`, type-erased and mutable.
    fn get_erased_mut(&mut self, slot: usize) -> Option<&mut dyn Any>;

    /// Drops every record, keeping the allocation.
    fn clear(&mut self);

    /// Upcast for downcasting to the concrete storage.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete storage.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ErasedStorage for ComponentStorage<C> {
    fn key(&self) -> ComponentKey {
        ComponentKey::of::<C>()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn owners(&self) -> &[EntityId] {
        &self.owners
    }

    fn swap_remove_erased(&mut self, slot: usize) -> Option<EntityId> {
        self.swap_remove(slot).1
    }

    fn get_erased(&self, slot: usize) -> Option<&dyn Any> {
        self.data.get(slot).map(|component| component as &dyn Any)
    }

    fn get_erased_mut(&mut self, slot: usize) -> Option<&mut dyn Any> {
        self.data
            .get_mut(slot)
            .map(|component| component as &mut dyn Any)
    }

    fn clear(&mut self) {
        self.owners.clear();
        self.data.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
