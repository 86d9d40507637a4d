//! NamespaceRegistry - constant tables wired to the name resolver.
//!
//! This module provides [`NamespaceRegistry`], the surface the surrounding
//! runtime talks to. It owns one [`ConstantTable`] per entity and the
//! [`NameResolver`], and routes every table mutation through the resolver's
//! [`NamingEvents`](crate::NamingEvents) hooks.
//!
//! # Thread Safety
//!
//! `NamespaceRegistry` is **not thread-safe**. Name reads may write
//! (lazy permanent naming), so every operation that can resolve a name takes
//! `&mut self`. A multi-threaded runtime must wrap the registry in a lock
//! (e.g. `Arc<Mutex<_>>`), which serializes naming transitions and gives the
//! rooted-path walk a consistent view of the constant graph.
//!
//! # Example
//!
//! ```
//! use constpath_registry::NamespaceRegistry;
//!
//! let mut registry = NamespaceRegistry::new();
//! let root = registry.root();
//!
//! let outer = registry.define_module(root, "Outer").unwrap();
//! let inner = registry.new_module();
//! registry.const_set(outer, "Inner", inner.into()).unwrap();
//!
//! assert_eq!(registry.resolve_name(inner).unwrap(), "Outer::Inner");
//! ```

use constpath_core::{
    ConstantError, EntityId, Encoding, ModuleName, NamingError, ObjectId, Value,
    is_constant_name, split_constant_path,
};
use rustc_hash::FxHashMap;

use crate::config::RegistryConfig;
use crate::constant_table::ConstantTable;
use crate::entity::{EntityFlags, NamespaceEntity, NamingState};
use crate::resolver::NameResolver;

/// Constant tables, naming state, and singleton classes of one runtime.
pub struct NamespaceRegistry {
    config: RegistryConfig,
    /// One table per entity, indexed by `EntityId`.
    tables: Vec<ConstantTable>,
    resolver: NameResolver,
    /// Attached value -> its singleton class.
    singletons: FxHashMap<Value, EntityId>,
    next_object: u64,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceRegistry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry. The root is created first and permanently named.
    pub fn with_config(config: RegistryConfig) -> Self {
        let root_name = ModuleName::new(config.root_name.as_str(), config.default_encoding);
        let resolver = NameResolver::new(root_name);
        let tables = vec![ConstantTable::new(resolver.root())];
        Self {
            config,
            tables,
            resolver,
            singletons: FxHashMap::default(),
            next_object: 1,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The global root namespace.
    #[inline]
    pub fn root(&self) -> EntityId {
        self.resolver.root()
    }

    /// The name resolver, for read-only inspection.
    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    // ==========================================================================
    // Entity creation
    // ==========================================================================

    /// Create an anonymous entity with explicit flags and encoding.
    ///
    /// `ROOT` and `SINGLETON` are ignored; use [`Self::singleton_of`] for
    /// singleton classes.
    pub fn create_entity(&mut self, flags: EntityFlags, encoding: Encoding) -> EntityId {
        let id = self.resolver.create_entity(flags, encoding);
        self.tables.push(ConstantTable::new(id));
        id
    }

    /// Create an anonymous module in the default encoding.
    pub fn new_module(&mut self) -> EntityId {
        self.create_entity(EntityFlags::empty(), self.config.default_encoding)
    }

    /// Create an anonymous class in the default encoding.
    pub fn new_class(&mut self) -> EntityId {
        self.create_entity(EntityFlags::CLASS, self.config.default_encoding)
    }

    /// Allocate a plain object id.
    pub fn new_object(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object);
        self.next_object += 1;
        id
    }

    /// The singleton class of `value`, created on first request.
    pub fn singleton_of(&mut self, value: Value) -> EntityId {
        if let Some(&existing) = self.singletons.get(&value) {
            return existing;
        }
        let encoding = value
            .as_namespace()
            .and_then(|id| self.resolver.entity(id))
            .map_or(self.config.default_encoding, NamespaceEntity::encoding);
        let id = self.resolver.create_singleton(value, encoding);
        self.tables.push(ConstantTable::new(id));
        self.singletons.insert(value, id);
        id
    }

    // ==========================================================================
    // Constants
    // ==========================================================================

    /// Bind `owner::name = value`. Returns the value it replaced.
    pub fn const_set(
        &mut self,
        owner: EntityId,
        name: &str,
        value: Value,
    ) -> Result<Option<Value>, ConstantError> {
        self.check_binding(owner, name)?;
        let table = &mut self.tables[owner.index() as usize];
        Ok(table.bind(name, value, &mut self.resolver))
    }

    /// Bind `owner::name ||= value`.
    ///
    /// Returns the value now held by the constant: the existing one if it was
    /// already bound, `value` otherwise.
    pub fn const_set_if_absent(
        &mut self,
        owner: EntityId,
        name: &str,
        value: Value,
    ) -> Result<Value, ConstantError> {
        self.check_binding(owner, name)?;
        let table = &mut self.tables[owner.index() as usize];
        Ok(table
            .bind_if_absent(name, value, &mut self.resolver)
            .unwrap_or(value))
    }

    /// Remove `owner::name`. Returns the removed value, if it was bound.
    pub fn remove_const(
        &mut self,
        owner: EntityId,
        name: &str,
    ) -> Result<Option<Value>, ConstantError> {
        self.check_binding(owner, name)?;
        let table = &mut self.tables[owner.index() as usize];
        Ok(table.unbind(name, &mut self.resolver))
    }

    /// Look up `owner::name`.
    pub fn const_get(&self, owner: EntityId, name: &str) -> Option<Value> {
        self.table(owner)?.get(name)
    }

    /// Look up a constant path from the root, e.g. `"Outer::Inner"`.
    ///
    /// A leading `::` is accepted. Every segment but the last must be a
    /// namespace.
    pub fn const_get_path(&self, path: &str) -> Option<Value> {
        let segments = split_constant_path(path)?;
        let (last, outer) = segments.split_last()?;
        let mut current = self.root();
        for segment in outer {
            current = self.const_get(current, segment)?.as_namespace()?;
        }
        self.const_get(current, last)
    }

    /// The constant table of `owner`.
    pub fn table(&self, owner: EntityId) -> Option<&ConstantTable> {
        self.tables.get(owner.index() as usize)
    }

    /// Every binding of `owner`, in insertion order.
    pub fn constants(&self, owner: EntityId) -> Vec<(&str, Value)> {
        self.table(owner)
            .map(|table| table.iter().collect())
            .unwrap_or_default()
    }

    /// Open `owner::name` as a module, creating and binding it if unbound.
    pub fn define_module(&mut self, owner: EntityId, name: &str) -> Result<EntityId, ConstantError> {
        self.define_namespace(owner, name, false)
    }

    /// Open `owner::name` as a class, creating and binding it if unbound.
    pub fn define_class(&mut self, owner: EntityId, name: &str) -> Result<EntityId, ConstantError> {
        self.define_namespace(owner, name, true)
    }

    fn define_namespace(
        &mut self,
        owner: EntityId,
        name: &str,
        class: bool,
    ) -> Result<EntityId, ConstantError> {
        self.check_binding(owner, name)?;
        let expected = if class { "class" } else { "module" };
        if let Some(existing) = self.const_get(owner, name) {
            return existing
                .as_namespace()
                .filter(|&id| {
                    self.resolver
                        .entity(id)
                        .is_some_and(|e| e.is_class() == class && !e.is_singleton())
                })
                .ok_or_else(|| ConstantError::NotANamespace {
                    name: name.to_string(),
                    expected,
                });
        }
        let id = if class {
            self.new_class()
        } else {
            self.new_module()
        };
        self.const_set(owner, name, id.into())?;
        Ok(id)
    }

    fn check_binding(&self, owner: EntityId, name: &str) -> Result<(), ConstantError> {
        if self.table(owner).is_none() {
            return Err(ConstantError::UnknownNamespace(owner));
        }
        if !is_constant_name(name) {
            return Err(ConstantError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    // ==========================================================================
    // Naming
    // ==========================================================================

    /// The name of `id`. May freeze it; see [`NameResolver::resolve_name`].
    pub fn resolve_name(&mut self, id: EntityId) -> Option<ModuleName> {
        self.resolver.resolve_name(id)
    }

    /// The name of `id`, or its anonymous display form.
    pub fn display_name(&mut self, id: EntityId) -> Option<ModuleName> {
        self.resolver.display_name(id)
    }

    /// Assign (`Some`) or clear (`None`) a temporary name.
    pub fn set_temporary_name(
        &mut self,
        id: EntityId,
        name: Option<&str>,
    ) -> Result<(), NamingError> {
        self.resolver.set_temporary_name(id, name)
    }

    pub fn naming_state(&self, id: EntityId) -> Option<&NamingState> {
        self.resolver.entity(id).map(NamespaceEntity::state)
    }

    /// The namespace `id` was permanently named under.
    pub fn enclosing(&self, id: EntityId) -> Option<EntityId> {
        self.resolver.entity(id)?.enclosing()
    }

    pub fn is_singleton(&self, id: EntityId) -> bool {
        self.resolver.entity(id).is_some_and(NamespaceEntity::is_singleton)
    }

    pub fn is_class(&self, id: EntityId) -> bool {
        self.resolver.entity(id).is_some_and(NamespaceEntity::is_class)
    }

    pub fn encoding(&self, id: EntityId) -> Option<Encoding> {
        self.resolver.entity(id).map(NamespaceEntity::encoding)
    }
}
