//! Error types for naming and constant-table operations.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ConstpathError (top-level wrapper)
//! ├── NamingError   - temporary-name assignment failures
//! └── ConstantError - constant binding and lookup failures
//! ```
//!
//! Name resolution itself never fails: an entity without a name resolves to
//! `None`. Every error here is raised before any state is touched.

use thiserror::Error;

use crate::EntityId;

// ============================================================================
// Naming Errors
// ============================================================================

/// Errors raised by `set_temporary_name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The requested temporary name was the empty string.
    #[error("empty class/module name")]
    EmptyName,

    /// The requested temporary name is a valid constant path, which would make
    /// it indistinguishable from a resolved name.
    #[error("name must not be valid constant name")]
    ConstantShapedName {
        /// The rejected name.
        name: String,
    },

    /// The entity already has a permanent name.
    #[error("can't change permanent name")]
    PermanentName,

    /// The entity does not belong to this registry.
    #[error("unknown namespace: {0}")]
    UnknownNamespace(EntityId),
}

// ============================================================================
// Constant Errors
// ============================================================================

/// Errors raised by constant-table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstantError {
    /// The short name is not a valid constant identifier.
    #[error("wrong constant name {0}")]
    InvalidName(String),

    /// The owning entity does not belong to this registry.
    #[error("unknown namespace: {0}")]
    UnknownNamespace(EntityId),

    /// A constant that was reopened as a namespace holds something else.
    #[error("{name} is not a {expected}")]
    NotANamespace {
        /// The constant's short name.
        name: String,
        /// What the caller asked for ("module" or "class").
        expected: &'static str,
    },
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error wrapping every error kind in this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstpathError {
    /// A naming error.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A constant-table error.
    #[error(transparent)]
    Constant(#[from] ConstantError),
}

impl ConstpathError {
    /// Check if this is a naming error.
    pub fn is_naming(&self) -> bool {
        matches!(self, ConstpathError::Naming(_))
    }

    /// Check if this is a constant-table error.
    pub fn is_constant(&self) -> bool {
        matches!(self, ConstpathError::Constant(_))
    }
}
