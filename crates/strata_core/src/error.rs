//! # Registry Error Types
//!
//! Every precondition the registry enforces has a variant here. The
//! panicking registry operations format one of these as their panic
//! message; the `checked_*` operations return it.

use std::path::PathBuf;

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors reported by [`Registry`](crate::Registry) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The handle does not refer to a live entity: it was destroyed, or it
    /// came from another registry.
    #[error("stale entity handle {0}: the entity was destroyed or never existed")]
    StaleEntity(EntityId),

    /// The entity does not hold the requested component.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// The entity that was queried.
        entity: EntityId,
        /// Type name of the missing component.
        component: &'static str,
    },

    /// The entity already holds a component of this type.
    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        /// The entity that was modified.
        entity: EntityId,
        /// Type name of the duplicated component.
        component: &'static str,
    },

    /// An internal index disagrees with the storage it describes.
    #[error("registry invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
