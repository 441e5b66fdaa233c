//! # Component System
//!
//! Components are pure data containers with no behavior. Any `'static`
//! type that is `Send + Sync` can opt in; the registry keys storage by the
//! component's [`TypeId`](std::any::TypeId), so no numeric ID has to be
//! assigned by hand.

use std::any::{type_name, TypeId};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `'static`: storage is keyed by `TypeId`
/// - `Send + Sync`: the registry can be moved across threads as a whole
///
/// # Example
///
/// ```rust
/// use strata_core::Component;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Send + Sync + 'static {}

/// Runtime description of a component type: its `TypeId` and a readable
/// name for logs and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    id: TypeId,
    name: &'static str,
}

impl ComponentKey {
    /// Returns the key for component type `C`.
    #[inline]
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// The component's `TypeId`.
    #[inline]
    #[must_use]
    pub const fn id(self) -> TypeId {
        self.id
    }

    /// The component's type name, as reported by [`std::any::type_name`].
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health;
    impl Component for Health {}

    struct Armor;
    impl Component for Armor {}

    #[test]
    fn test_component_keys_are_distinct() {
        let health = ComponentKey::of::<Health>();
        let armor = ComponentKey::of::<Armor>();
        assert_ne!(health, armor);
        assert_eq!(health, ComponentKey::of::<Health>());
        assert_eq!(health.id(), TypeId::of::<Health>());
        assert!(health.name().ends_with("Health"));
    }
}
