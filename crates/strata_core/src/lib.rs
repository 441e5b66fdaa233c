//! # STRATA Core
//!
//! In-memory entity/component store:
//! - O(1) entity creation and destruction
//! - O(1) component attach and detach
//! - Contiguous per-type storage for fast homogeneous iteration
//!
//! ## Architecture Rules
//!
//! 1. **The registry owns everything** - handles are plain `Copy` IDs
//! 2. **Dense storage** - every component type lives in one packed array
//! 3. **Fail fast** - using a stale handle or a missing component panics;
//!    `checked_*` operations report the same conditions as errors
//!
//! ## Example
//!
//! ```rust
//! use strata_core::{Component, Registry};
//!
//! #[derive(Debug, PartialEq)]
//! struct Position { x: i32, y: i32 }
//! impl Component for Position {}
//!
//! let mut registry = Registry::new();
//! let a = registry.create();
//! let b = registry.create();
//! registry.add(a, Position { x: 0, y: 0 });
//! registry.add(b, Position { x: 1, y: 1 });
//!
//! registry.remove::<Position>(a);
//! assert_eq!(registry.filter::<Position>(), vec![b]);
//! assert_eq!(registry.get::<Position>(b), &Position { x: 1, y: 1 });
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::RegistryConfig;
pub use ecs::{
    Component, ComponentKey, ComponentStorage, EntityId, EntityMut, EntityRef, Registry,
};
pub use error::{ConfigError, RegistryError, RegistryResult};
