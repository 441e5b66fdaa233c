//! # Entity / Component Registry
//!
//! The central container for all entities and components.
//!
//! ## Layout
//!
//! ```text
//! slots:     [ (gen, dense) | (gen, free) | (gen, dense) ... ]   indexed by EntityId::index
//! entities:  [ EntityRecord { id, TypeId -> slot } ... ]          dense, swap-removed
//! storages:  TypeId -> ComponentStorage<C> { owners[], data[] }   dense, swap-removed
//! ```
//!
//! For every component type `C` and live entity `e`: `e` holds `C` iff
//! `C`'s storage has exactly one record owned by `e`, at the position stored
//! under `TypeId::of::<C>()` in `e`'s record. Every mutation below restores
//! this before returning.
//!
//! ## Contract
//!
//! Precondition violations (stale handle, missing component, duplicate
//! component) are programming errors and panic with the matching
//! [`RegistryError`] message. Each panicking operation has a `checked_*`
//! twin returning [`RegistryResult`].

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use super::component::Component;
use super::entity::{EntityId, EntityRecord, EntitySlot};
use super::storage::{ComponentStorage, ErasedStorage};
use super::view::{EntityMut, EntityRef};
use crate::config::{RegistryConfig, MAX_INITIAL_CAPACITY};
use crate::error::{ConfigError, RegistryError, RegistryResult};

/// Owner of all entities and component storage.
///
/// # Example
///
/// ```rust
/// use strata_core::{Component, Registry};
///
/// #[derive(Debug, PartialEq)]
/// struct Position(i32, i32);
/// impl Component for Position {}
///
/// let mut registry = Registry::new();
/// let ship = registry.create();
/// registry.add(ship, Position(0, 0));
///
/// assert!(registry.has::<Position>(ship));
/// assert_eq!(registry.filter::<Position>(), vec![ship]);
///
/// registry.destroy(ship);
/// assert!(registry.filter::<Position>().is_empty());
/// ```
pub struct Registry {
    /// Live entity records, order unstable.
    entities: Vec<EntityRecord>,
    /// Sparse slot table, indexed by `EntityId::index`.
    slots: Vec<EntitySlot>,
    /// Free list of slot indices for reuse.
    free_indices: Vec<u32>,
    /// One storage per component type ever attached.
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
    config: RegistryConfig,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry with default capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry sized by `config`.
    ///
    /// Capacities above [`MAX_INITIAL_CAPACITY`] are capped before anything
    /// is reserved; use [`try_with_config`](Self::try_with_config) to reject
    /// them instead.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let clamped = config.clamped();
        if clamped != config {
            tracing::warn!(
                requested_entities = config.initial_entity_capacity,
                requested_components = config.initial_component_capacity,
                cap = MAX_INITIAL_CAPACITY,
                "capacity hints capped"
            );
        }
        let config = clamped;
        tracing::debug!(
            entity_capacity = config.initial_entity_capacity,
            component_capacity = config.initial_component_capacity,
            "created registry"
        );
        Self {
            entities: Vec::with_capacity(config.initial_entity_capacity),
            slots: Vec::with_capacity(config.initial_entity_capacity),
            free_indices: Vec::new(),
            storages: HashMap::new(),
            config,
        }
    }

    /// Creates an empty registry sized by `config`, after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`RegistryConfig::validate`].
    pub fn try_with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// The configuration this registry was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether there are no live entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks if `id` refers to a live entity of this registry.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.resolve(id).is_some()
    }

    /// Snapshot of every live entity, in entity-collection order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.entities.iter().map(|record| record.id).collect()
    }

    // =========================================================================
    // Entity lifetime
    // =========================================================================

    /// Creates an entity with no components.
    ///
    /// Freed slot indices are reused with a new generation, so handles to
    /// previously destroyed entities never alias the new one.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` entity slots would be needed.
    pub fn create(&mut self) -> EntityId {
        let dense = self.entities.len();
        let id = if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            *slot = EntitySlot::occupied(slot.generation, dense);
            EntityId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len())
                .unwrap_or_else(|_| panic!("entity index space exhausted"));
            self.slots.push(EntitySlot::occupied(0, dense));
            EntityId::new(index, 0)
        };

        self.entities.push(EntityRecord::new(id));
        tracing::trace!(entity = %id, "created entity");
        id
    }

    /// Destroys an entity and every component attached to it.
    ///
    /// All copies of `id` become stale.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn destroy(&mut self, id: EntityId) {
        raise(self.checked_destroy(id));
    }

    /// Destroys an entity, reporting a stale handle instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleEntity`] if `id` is not live.
    pub fn checked_destroy(&mut self, id: EntityId) -> RegistryResult<()> {
        let dense = self.live(id)?;

        // Detach first so every storage stays dense.
        let components = std::mem::take(&mut self.entities[dense].components);
        for (type_id, slot) in components {
            self.detach_slot(type_id, slot)?;
        }

        self.entities.swap_remove(dense);
        if let Some(moved) = self.entities.get(dense) {
            self.slots[moved.id.index() as usize].dense = Some(dense);
        }

        self.slots[id.index() as usize].release();
        self.free_indices.push(id.index());
        tracing::trace!(entity = %id, "destroyed entity");
        Ok(())
    }

    /// Destroys every entity. Storage allocations are kept for reuse.
    pub fn clear(&mut self) {
        let destroyed = self.entities.len();
        for record in self.entities.drain(..) {
            self.slots[record.id.index() as usize].release();
            self.free_indices.push(record.id.index());
        }

        let records: usize = self.storages.values().map(|storage| storage.len()).sum();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
        tracing::debug!(destroyed, records, "cleared registry");
    }

    // =========================================================================
    // Entity-scoped views
    // =========================================================================

    /// Read-only view of a single entity.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn entity(&self, id: EntityId) -> EntityRef<'_> {
        raise(self.live(id));
        EntityRef::new(self, id)
    }

    /// Mutable view of a single entity.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn entity_mut(&mut self, id: EntityId) -> EntityMut<'_> {
        raise(self.live(id));
        EntityMut::new(self, id)
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Whether the entity currently holds a `C`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.has_dynamic(id, TypeId::of::<C>())
    }

    /// Whether the entity currently holds the component identified by `type_id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn has_dynamic(&self, id: EntityId, type_id: TypeId) -> bool {
        let dense = raise(self.live(id));
        self.entities[dense].components.contains_key(&type_id)
    }

    /// Number of components attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn component_count(&self, id: EntityId) -> usize {
        let dense = raise(self.live(id));
        self.entities[dense].components.len()
    }

    /// The entity's `C`.
    ///
    /// The reference is valid until the next mutation of the registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no `C`.
    #[track_caller]
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> &C {
        raise(self.checked_get(id))
    }

    /// The entity's `C`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no `C`.
    #[track_caller]
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> &mut C {
        raise(self.checked_get_mut(id))
    }

    /// The entity's `C`, or an error naming the violated precondition.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_get<C: Component>(&self, id: EntityId) -> RegistryResult<&C> {
        let slot = self.slot_of::<C>(id)?.ok_or_else(|| missing::<C>(id))?;
        self.component_at(slot)
    }

    /// Mutable twin of [`checked_get`](Self::checked_get).
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_get_mut<C: Component>(&mut self, id: EntityId) -> RegistryResult<&mut C> {
        let slot = self.slot_of::<C>(id)?.ok_or_else(|| missing::<C>(id))?;
        self.component_at_mut(slot)
    }

    /// The entity's `C`, or `None` if it holds none.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn try_get<C: Component>(&self, id: EntityId) -> Option<&C> {
        let slot = raise(self.slot_of::<C>(id))?;
        Some(raise(self.component_at(slot)))
    }

    /// The entity's `C` mutably, or `None` if it holds none.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn try_get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        let slot = raise(self.slot_of::<C>(id))?;
        Some(raise(self.component_at_mut(slot)))
    }

    // =========================================================================
    // Attach / detach
    // =========================================================================

    /// Attaches `component` to the entity and returns the stored value.
    ///
    /// The first `C` ever attached creates `C`'s storage.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity already holds a `C`.
    #[track_caller]
    pub fn add<C: Component>(&mut self, id: EntityId, component: C) -> &mut C {
        raise(self.checked_add(id, component))
    }

    /// Attaches `component`, reporting violated preconditions as errors.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::DuplicateComponent`].
    pub fn checked_add<C: Component>(
        &mut self,
        id: EntityId,
        component: C,
    ) -> RegistryResult<&mut C> {
        let dense = self.live(id)?;
        let type_id = TypeId::of::<C>();
        let record = &mut self.entities[dense];
        if record.components.contains_key(&type_id) {
            return Err(RegistryError::DuplicateComponent {
                entity: id,
                component: type_name::<C>(),
            });
        }

        let capacity = self.config.initial_component_capacity;
        let storage = self.storages.entry(type_id).or_insert_with(|| {
            tracing::debug!(component = type_name::<C>(), capacity, "created component storage");
            let storage: Box<dyn ErasedStorage> =
                Box::new(ComponentStorage::<C>::with_capacity(capacity));
            storage
        });
        let storage = downcast_mut::<C>(storage.as_mut());

        let slot = storage.push(id, component);
        record.components.insert(type_id, slot);
        tracing::trace!(entity = %id, component = type_name::<C>(), slot, "added component");

        storage
            .get_mut(slot)
            .ok_or_else(|| violation(format!("{} slot {slot} vanished after push", type_name::<C>())))
    }

    /// Detaches the entity's `C` and returns it.
    ///
    /// The last record of `C`'s storage moves into the freed slot and its
    /// owner's slot index is updated.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no `C`.
    #[track_caller]
    pub fn remove<C: Component>(&mut self, id: EntityId) -> C {
        raise(self.checked_remove(id))
    }

    /// Detaches the entity's `C`, reporting violated preconditions as errors.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_remove<C: Component>(&mut self, id: EntityId) -> RegistryResult<C> {
        let dense = self.live(id)?;
        let type_id = TypeId::of::<C>();
        let slot = self.entities[dense]
            .components
            .remove(&type_id)
            .ok_or_else(|| missing::<C>(id))?;

        let storage = self
            .storages
            .get_mut(&type_id)
            .ok_or_else(|| violation(format!("no storage for attached {}", type_name::<C>())))?;
        let (component, moved) = downcast_mut::<C>(storage.as_mut()).swap_remove(slot);
        if let Some(moved) = moved {
            self.repoint(moved, type_id, slot)?;
        }

        tracing::trace!(entity = %id, component = type_name::<C>(), slot, "removed component");
        Ok(component)
    }

    /// Detaches and drops the component identified by `type_id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no such component.
    #[track_caller]
    pub fn remove_dynamic(&mut self, id: EntityId, type_id: TypeId) {
        raise(self.checked_remove_dynamic(id, type_id));
    }

    /// Detaches and drops the component identified by `type_id`, reporting
    /// violated preconditions as errors.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_remove_dynamic(&mut self, id: EntityId, type_id: TypeId) -> RegistryResult<()> {
        let dense = self.live(id)?;
        let Some(slot) = self.entities[dense].components.remove(&type_id) else {
            return Err(self.missing_dynamic(id, type_id));
        };
        self.detach_slot(type_id, slot)?;
        tracing::trace!(entity = %id, component = self.name_of(type_id), slot, "removed component");
        Ok(())
    }

    /// The component identified by `type_id`, type-erased. Downcast with
    /// [`Any::downcast_ref`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no such component.
    #[track_caller]
    #[must_use]
    pub fn get_dynamic(&self, id: EntityId, type_id: TypeId) -> &dyn Any {
        raise(self.checked_get_dynamic(id, type_id))
    }

    /// Mutable twin of [`get_dynamic`](Self::get_dynamic).
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or the entity holds no such component.
    #[track_caller]
    pub fn get_dynamic_mut(&mut self, id: EntityId, type_id: TypeId) -> &mut dyn Any {
        raise(self.checked_get_dynamic_mut(id, type_id))
    }

    /// The component identified by `type_id`, or an error naming the
    /// violated precondition.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_get_dynamic(&self, id: EntityId, type_id: TypeId) -> RegistryResult<&dyn Any> {
        let slot = self
            .dynamic_slot(id, type_id)?
            .ok_or_else(|| self.missing_dynamic(id, type_id))?;
        self.erased_at(type_id, slot)
    }

    /// Mutable twin of [`checked_get_dynamic`](Self::checked_get_dynamic).
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] or [`RegistryError::MissingComponent`].
    pub fn checked_get_dynamic_mut(
        &mut self,
        id: EntityId,
        type_id: TypeId,
    ) -> RegistryResult<&mut dyn Any> {
        let slot = self
            .dynamic_slot(id, type_id)?
            .ok_or_else(|| self.missing_dynamic(id, type_id))?;
        self.erased_at_mut(type_id, slot)
    }

    /// The component identified by `type_id`, or `None` if the entity holds
    /// no such component.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    #[must_use]
    pub fn try_get_dynamic(&self, id: EntityId, type_id: TypeId) -> Option<&dyn Any> {
        let slot = raise(self.dynamic_slot(id, type_id))?;
        Some(raise(self.erased_at(type_id, slot)))
    }

    /// Mutable twin of [`try_get_dynamic`](Self::try_get_dynamic).
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn try_get_dynamic_mut(&mut self, id: EntityId, type_id: TypeId) -> Option<&mut dyn Any> {
        let slot = raise(self.dynamic_slot(id, type_id))?;
        Some(raise(self.erased_at_mut(type_id, slot)))
    }

    // =========================================================================
    // Type-based enumeration
    // =========================================================================

    /// Every entity holding a `C`, in `C`'s storage order.
    ///
    /// The returned vector is a snapshot and does not follow later mutation.
    #[must_use]
    pub fn filter<C: Component>(&self) -> Vec<EntityId> {
        self.storage::<C>()
            .map(|storage| storage.owners().to_vec())
            .unwrap_or_default()
    }

    /// Number of entities holding a `C`.
    #[must_use]
    pub fn count<C: Component>(&self) -> usize {
        self.storage::<C>().map_or(0, ComponentStorage::len)
    }

    /// All `C` payloads as one contiguous slice, in storage order.
    #[must_use]
    pub fn components<C: Component>(&self) -> &[C] {
        match self.storage::<C>() {
            Some(storage) => storage.as_slice(),
            None => &[],
        }
    }

    /// All `C` payloads as one contiguous mutable slice, in storage order.
    pub fn components_mut<C: Component>(&mut self) -> &mut [C] {
        match self.storage_mut::<C>() {
            Some(storage) => storage.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Iterates over `(owner, &C)` in storage order.
    pub fn iter<C: Component>(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.storage::<C>()
            .into_iter()
            .flat_map(|storage| storage.iter())
    }

    /// Iterates over `(owner, &mut C)` in storage order.
    pub fn iter_mut<C: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut C)> {
        self.storage_mut::<C>()
            .into_iter()
            .flat_map(|storage| storage.iter_mut())
    }

    /// Read-only access to `C`'s storage, if any `C` was ever attached.
    #[must_use]
    pub fn storage<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        self.storages
            .get(&TypeId::of::<C>())
            .map(|storage| downcast_ref::<C>(storage.as_ref()))
    }

    // =========================================================================
    // Consistency
    // =========================================================================

    /// Checks every cross-reference between slots, entity records and
    /// component storage.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvariantViolation`] describing the first
    /// inconsistency found.
    pub fn validate(&self) -> RegistryResult<()> {
        let occupied = self.slots.iter().filter(|slot| slot.dense.is_some()).count();
        if occupied != self.entities.len() {
            return Err(violation(format!(
                "{occupied} occupied slots for {} entities",
                self.entities.len()
            )));
        }

        for (dense, record) in self.entities.iter().enumerate() {
            let recorded = self.resolve(record.id);
            if recorded != Some(dense) {
                return Err(violation(format!(
                    "entity {} stored at {dense} but recorded at {recorded:?}",
                    record.id
                )));
            }
            for (type_id, &slot) in &record.components {
                let storage = self.storages.get(type_id).ok_or_else(|| {
                    violation(format!("entity {} references a missing storage", record.id))
                })?;
                if storage.owners().get(slot) != Some(&record.id) {
                    return Err(violation(format!(
                        "entity {} expects its {} at slot {slot}",
                        record.id,
                        storage.key().name()
                    )));
                }
            }
        }

        for storage in self.storages.values() {
            let key = storage.key();
            for (slot, &owner) in storage.owners().iter().enumerate() {
                let dense = self.resolve(owner).ok_or_else(|| {
                    violation(format!("{} slot {slot} owned by dead entity {owner}", key.name()))
                })?;
                if self.entities[dense].components.get(&key.id()) != Some(&slot) {
                    return Err(violation(format!(
                        "{} slot {slot} is not referenced by its owner {owner}",
                        key.name()
                    )));
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn resolve(&self, id: EntityId) -> Option<usize> {
        self.slots
            .get(id.index() as usize)
            .and_then(|slot| slot.resolve(id))
    }

    fn live(&self, id: EntityId) -> RegistryResult<usize> {
        self.resolve(id).ok_or(RegistryError::StaleEntity(id))
    }

    /// The entity's slot in `C`'s storage; `Ok(None)` if it holds no `C`.
    fn slot_of<C: Component>(&self, id: EntityId) -> RegistryResult<Option<usize>> {
        self.dynamic_slot(id, TypeId::of::<C>())
    }

    fn dynamic_slot(&self, id: EntityId, type_id: TypeId) -> RegistryResult<Option<usize>> {
        let dense = self.live(id)?;
        Ok(self.entities[dense].components.get(&type_id).copied())
    }

    fn erased_at(&self, type_id: TypeId, slot: usize) -> RegistryResult<&dyn Any> {
        self.storages
            .get(&type_id)
            .and_then(|storage| storage.get_erased(slot))
            .ok_or_else(|| violation(format!("{} slot {slot} out of range", self.name_of(type_id))))
    }

    fn erased_at_mut(&mut self, type_id: TypeId, slot: usize) -> RegistryResult<&mut dyn Any> {
        let name = self.name_of(type_id);
        self.storages
            .get_mut(&type_id)
            .and_then(|storage| storage.get_erased_mut(slot))
            .ok_or_else(|| violation(format!("{name} slot {slot} out of range")))
    }

    fn missing_dynamic(&self, entity: EntityId, type_id: TypeId) -> RegistryError {
        RegistryError::MissingComponent {
            entity,
            component: self.name_of(type_id),
        }
    }

    fn component_at<C: Component>(&self, slot: usize) -> RegistryResult<&C> {
        self.storage::<C>()
            .and_then(|storage| storage.get(slot))
            .ok_or_else(|| violation(format!("{} slot {slot} out of range", type_name::<C>())))
    }

    fn component_at_mut<C: Component>(&mut self, slot: usize) -> RegistryResult<&mut C> {
        self.storage_mut::<C>()
            .and_then(|storage| storage.get_mut(slot))
            .ok_or_else(|| violation(format!("{} slot {slot} out of range", type_name::<C>())))
    }

    fn storage_mut<C: Component>(&mut self) -> Option<&mut ComponentStorage<C>> {
        self.storages
            .get_mut(&TypeId::of::<C>())
            .map(|storage| downcast_mut::<C>(storage.as_mut()))
    }

    /// Swap-removes record `slot` from `type_id`'s storage and repoints the
    /// owner of the record that moved into it.
    fn detach_slot(&mut self, type_id: TypeId, slot: usize) -> RegistryResult<()> {
        let storage = self
            .storages
            .get_mut(&type_id)
            .ok_or_else(|| violation(format!("no storage for attached {type_id:?}")))?;
        if let Some(moved) = storage.swap_remove_erased(slot) {
            self.repoint(moved, type_id, slot)?;
        }
        Ok(())
    }

    fn repoint(&mut self, owner: EntityId, type_id: TypeId, slot: usize) -> RegistryResult<()> {
        let dense = self
            .resolve(owner)
            .ok_or_else(|| violation(format!("moved record owned by dead entity {owner}")))?;
        self.entities[dense].components.insert(type_id, slot);
        Ok(())
    }

    fn name_of(&self, type_id: TypeId) -> &'static str {
        self.storages
            .get(&type_id)
            .map_or("<unregistered>", |storage| storage.key().name())
    }
}

/// Unwraps a registry result, turning a violated precondition into a panic
/// at the caller's location.
#[track_caller]
fn raise<T>(result: RegistryResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

fn missing<C: Component>(entity: EntityId) -> RegistryError {
    RegistryError::MissingComponent {
        entity,
        component: type_name::<C>(),
    }
}

fn violation(detail: String) -> RegistryError {
    RegistryError::InvariantViolation(detail)
}

fn downcast_ref<C: Component>(storage: &dyn ErasedStorage) -> &ComponentStorage<C> {
    match storage.as_any().downcast_ref::<ComponentStorage<C>>() {
        Some(typed) => typed,
        None => unreachable!("storage keyed by {} holds another type", type_name::<C>()),
    }
}

fn downcast_mut<C: Component>(storage: &mut dyn ErasedStorage) -> &mut ComponentStorage<C> {
    match storage.as_any_mut().downcast_mut::<ComponentStorage<C>>() {
        Some(typed) => typed,
        None => unreachable!("storage keyed by {} holds another type", type_name::<C>()),
    }
}
