//! # Entity Component Store
//!
//! Dense, swap-removed storage for entities and their components.
//!
//! ## Design Philosophy
//!
//! - One contiguous storage per component type, created on first use
//! - Attach and detach are O(1); removal moves the last record into the hole
//! - Entity handles are indices with generation counters, so stale handles
//!   are detected instead of silently aliasing a newer entity

mod component;
mod entity;
mod registry;
mod storage;
mod view;

pub use component::{Component, ComponentKey};
pub use entity::EntityId;
pub use registry::Registry;
pub use storage::ComponentStorage;
pub use view::{EntityMut, EntityRef};
