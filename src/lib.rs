//! Constant-path naming for namespace entities of a dynamic object runtime.
//!
//! A namespace entity (module or class) starts out anonymous. Binding it into
//! a constant table gives it a path; the first time its name is read while
//! that path reaches the global root, the name is frozen for good.
//!
//! # Quick start
//!
//! ```
//! use constpath::prelude::*;
//!
//! let mut registry = NamespaceRegistry::new();
//! let root = registry.root();
//!
//! let anon = registry.new_module();
//! let child = registry.define_class(anon, "Child").unwrap();
//! assert!(registry.resolve_name(child).unwrap().ends_with(">::Child"));
//!
//! registry.const_set(root, "Outer", anon.into()).unwrap();
//! assert_eq!(registry.resolve_name(child).unwrap(), "Outer::Child");
//! ```

pub use constpath_core as core;
pub use constpath_registry as registry;

pub use constpath_core::{
    ConstantError, ConstpathError, Encoding, EntityId, ModuleName, NamingError, ObjectId, Value,
};
pub use constpath_registry::{
    EntityFlags, NameResolver, NamespaceRegistry, NamingEvents, NamingState, RegistryConfig,
};

/// Convenience re-exports.
pub mod prelude {
    pub use constpath_core::{
        ConstantError, ConstpathError, Encoding, EntityId, ModuleName, NamingError, ObjectId,
        Value, is_constant_name, is_constant_path,
    };
    pub use constpath_registry::{
        ConstantTable, EntityFlags, IgnoreEvents, NameResolver, NamespaceRegistry, NamingEvents,
        NamingState, RegistryConfig,
    };
}
