//! # Registry Configuration
//!
//! Capacity hints for a [`Registry`](crate::Registry), loaded once at
//! startup from a TOML file:
//!
//! ```toml
//! initial_entity_capacity = 4096
//! initial_component_capacity = 256
//! ```
//!
//! Missing keys fall back to their defaults; unknown keys are rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of entity slots reserved up front.
pub const DEFAULT_ENTITY_CAPACITY: usize = 1024;

/// Default number of records reserved when a component storage is created.
pub const DEFAULT_COMPONENT_CAPACITY: usize = 64;

/// Largest capacity hint accepted for either field. Storage still grows past
/// it on demand; this only bounds what is reserved before the first insert.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Capacity hints for a registry.
///
/// These only size the initial allocations. Storage still grows past them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Entity slots reserved when the registry is constructed.
    pub initial_entity_capacity: usize,
    /// Records reserved in each component storage when it is first created.
    pub initial_component_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_entity_capacity: DEFAULT_ENTITY_CAPACITY,
            initial_component_capacity: DEFAULT_COMPONENT_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] if a value fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that neither capacity exceeds [`MAX_INITIAL_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first oversized field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limit = MAX_INITIAL_CAPACITY;
        if self.initial_entity_capacity > limit {
            return Err(ConfigError::Invalid(format!(
                "initial_entity_capacity {} exceeds {limit}",
                self.initial_entity_capacity
            )));
        }
        if self.initial_component_capacity > limit {
            return Err(ConfigError::Invalid(format!(
                "initial_component_capacity {} exceeds {limit}",
                self.initial_component_capacity
            )));
        }
        Ok(())
    }

    /// A copy with both capacities capped at [`MAX_INITIAL_CAPACITY`].
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            initial_entity_capacity: self.initial_entity_capacity.min(MAX_INITIAL_CAPACITY),
            initial_component_capacity: self.initial_component_capacity.min(MAX_INITIAL_CAPACITY),
        }
    }
}
