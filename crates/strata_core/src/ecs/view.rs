//! # Entity Views
//!
//! Borrowed, entity-scoped access to a [`Registry`]. A view pairs a handle
//! with the registry it belongs to, so component operations read as
//! `ship.add(Position { .. })` instead of `registry.add(ship, ..)`.
//!
//! Views borrow the registry, which makes it impossible to hold a component
//! reference across a structural mutation.

use super::component::Component;
use super::entity::EntityId;
use super::registry::Registry;

/// Read-only view of one live entity.
#[derive(Clone, Copy)]
pub struct EntityRef<'r> {
    registry: &'r Registry,
    id: EntityId,
}

impl<'r> EntityRef<'r> {
    pub(crate) fn new(registry: &'r Registry, id: EntityId) -> Self {
        Self { registry, id }
    }

    /// The entity's handle.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// See [`Registry::has`].
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        self.registry.has::<C>(self.id)
    }

    /// See [`Registry::get`].
    #[track_caller]
    #[must_use]
    pub fn get<C: Component>(&self) -> &'r C {
        self.registry.get::<C>(self.id)
    }

    /// See [`Registry::try_get`].
    #[must_use]
    pub fn try_get<C: Component>(&self) -> Option<&'r C> {
        self.registry.try_get::<C>(self.id)
    }

    /// See [`Registry::component_count`].
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.registry.component_count(self.id)
    }
}

/// Mutable view of one live entity.
pub struct EntityMut<'r> {
    registry: &'r mut Registry,
    id: EntityId,
}

impl<'r> EntityMut<'r> {
    pub(crate) fn new(registry: &'r mut Registry, id: EntityId) -> Self {
        Self { registry, id }
    }

    /// The entity's handle.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// See [`Registry::has`].
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        self.registry.has::<C>(self.id)
    }

    /// See [`Registry::get`].
    #[track_caller]
    #[must_use]
    pub fn get<C: Component>(&self) -> &C {
        self.registry.get::<C>(self.id)
    }

    /// See [`Registry::get_mut`].
    #[track_caller]
    pub fn get_mut<C: Component>(&mut self) -> &mut C {
        self.registry.get_mut::<C>(self.id)
    }

    /// See [`Registry::try_get`].
    #[must_use]
    pub fn try_get<C: Component>(&self) -> Option<&C> {
        self.registry.try_get::<C>(self.id)
    }

    /// See [`Registry::try_get_mut`].
    pub fn try_get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.registry.try_get_mut::<C>(self.id)
    }

    /// See [`Registry::add`].
    #[track_caller]
    pub fn add<C: Component>(&mut self, component: C) -> &mut C {
        self.registry.add(self.id, component)
    }

    /// Attaches `component` and returns the view, for chaining.
    #[track_caller]
    #[must_use]
    pub fn with<C: Component>(mut self, component: C) -> Self {
        self.add(component);
        self
    }

    /// See [`Registry::remove`].
    #[track_caller]
    pub fn remove<C: Component>(&mut self) -> C {
        self.registry.remove::<C>(self.id)
    }

    /// See [`Registry::component_count`].
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.registry.component_count(self.id)
    }

    /// Destroys the entity, consuming the view.
    #[track_caller]
    pub fn destroy(self) {
        self.registry.destroy(self.id);
    }
}
