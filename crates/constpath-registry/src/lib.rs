//! Constant tables and lazy constant-path naming.
//!
//! [`NamespaceRegistry`] is the entry point. It owns a [`ConstantTable`] per
//! namespace entity and a [`NameResolver`] that listens to every table
//! mutation through [`NamingEvents`].

mod binding_graph;
mod config;
mod constant_table;
mod entity;
mod events;
mod registry;
mod resolver;

pub use binding_graph::{BindingGraph, ConstBinding};
pub use config::RegistryConfig;
pub use constant_table::{ConstEntry, ConstantTable};
pub use entity::{EntityFlags, NamespaceEntity, NamingState, ProvisionalBinding};
pub use events::{IgnoreEvents, NamingEvents};
pub use registry::NamespaceRegistry;
pub use resolver::NameResolver;
