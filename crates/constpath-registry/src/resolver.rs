//! Name resolution - lazy, cached computation of constant-path names.
//!
//! Reading a name may write: the first read of an entity that is reachable
//! from a permanently named ancestor freezes its name. For that reason
//! [`NameResolver::resolve_name`] takes `&mut self`.
//!
//! # Resolution order
//!
//! For an entity that is not permanent yet:
//!
//! 1. **Rooted binding** - pick the binding on a shortest live path from a
//!    permanently named entity (see [`BindingGraph::shortest_rooted_binding`]),
//!    resolve its owner, and freeze `owner::short`.
//! 2. **Provisional binding** - the first binding the entity got since it was
//!    created or last given a temporary name. A permanent owner freezes
//!    `owner::short` (the binding may be gone by now).
//! 3. **Temporary name** - returned as-is.
//! 4. Otherwise the provisional binding yields `owner_label::short`, not
//!    frozen.
//! 5. Nothing: the entity has no name.
//!
//! Owners are resolved recursively, so a segment is always the owner's own
//! name. A visited set cuts cycles in the binding graph.
//!
//! Non-permanent results are cached against the binding generation, which
//! every binding event and temporary-name change bumps.

use constpath_core::{EntityId, Encoding, ModuleName, NamingError, Value, is_constant_path};
use rustc_hash::FxHashSet;

use crate::binding_graph::BindingGraph;
use crate::entity::{CachedResolution, EntityFlags, NamespaceEntity, NamingState, ProvisionalBinding};
use crate::events::NamingEvents;

/// Outcome of resolving one entity.
#[derive(Debug, Clone)]
enum Resolution {
    /// Frozen constant path.
    Permanent(ModuleName),
    /// Temporary name or a path through an anonymous namespace.
    Provisional(ModuleName),
    /// No name.
    Unnamed,
}

impl Resolution {
    fn into_name(self) -> Option<ModuleName> {
        match self {
            Resolution::Permanent(name) | Resolution::Provisional(name) => Some(name),
            Resolution::Unnamed => None,
        }
    }
}

/// Naming state of every entity plus the index needed to resolve names.
pub struct NameResolver {
    graph: BindingGraph,
    generation: u64,
}

impl NameResolver {
    /// Create a resolver whose root is permanently named `root_name`.
    pub fn new(root_name: ModuleName) -> Self {
        Self {
            graph: BindingGraph::new(root_name),
            generation: 0,
        }
    }

    #[inline]
    pub fn graph(&self) -> &BindingGraph {
        &self.graph
    }

    #[inline]
    pub fn root(&self) -> EntityId {
        self.graph.root()
    }

    /// Current binding generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Create an anonymous entity.
    pub fn create_entity(&mut self, flags: EntityFlags, encoding: Encoding) -> EntityId {
        let flags = flags - EntityFlags::ROOT - EntityFlags::SINGLETON;
        self.graph
            .add_entity(|id| NamespaceEntity::new(id, flags, encoding))
    }

    /// Create a singleton class attached to `attached`.
    pub fn create_singleton(&mut self, attached: Value, encoding: Encoding) -> EntityId {
        self.graph
            .add_entity(|id| NamespaceEntity::singleton(id, attached, encoding))
    }

    pub fn entity(&self, id: EntityId) -> Option<&NamespaceEntity> {
        self.graph.entity(id)
    }

    /// Resolve the externally visible name of `id`.
    ///
    /// Returns `None` for singleton classes, for entities with no name, and
    /// for ids this resolver does not know. Once the result is permanent,
    /// every later call returns a clone of the same handle.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_name(&mut self, id: EntityId) -> Option<ModuleName> {
        let entity = self.graph.entity(id)?;
        if entity.is_singleton() {
            return None;
        }
        if let NamingState::Permanent(name) = entity.state() {
            return Some(name.clone());
        }
        if let Some(cached) = entity.cached(self.generation) {
            return cached.clone();
        }

        let mut visited = FxHashSet::default();
        match self.resolve_inner(id, &mut visited) {
            Resolution::Permanent(name) => Some(name),
            other => {
                let name = other.into_name();
                let generation = self.generation;
                if let Some(entity) = self.graph.entity_mut(id) {
                    entity.cache = Some(CachedResolution {
                        generation,
                        name: name.clone(),
                    });
                }
                name
            }
        }
    }

    /// Render `id` for display: its name, or its anonymous form.
    ///
    /// Anonymous modules render as `#<Module:0x...>`, anonymous classes as
    /// `#<Class:0x...>`, singleton classes as `#<Class:ATTACHED>`.
    pub fn display_name(&mut self, id: EntityId) -> Option<ModuleName> {
        if let Some(name) = self.resolve_name(id) {
            return Some(name);
        }
        let encoding = self.graph.entity(id)?.encoding();
        let mut visited = FxHashSet::default();
        let label = self.label(id, &mut visited);
        Some(ModuleName::new(label, encoding))
    }

    /// Assign or clear a temporary name.
    ///
    /// Fails without touching any state if the entity is permanent, if `name`
    /// is empty, or if `name` is a constant path. Setting or clearing also
    /// drops the entity's provisional binding, so the next binding it receives
    /// decides its provisional path afresh.
    pub fn set_temporary_name(
        &mut self,
        id: EntityId,
        name: Option<&str>,
    ) -> Result<(), NamingError> {
        let entity = self
            .graph
            .entity(id)
            .ok_or(NamingError::UnknownNamespace(id))?;
        if entity.state().is_permanent() {
            return Err(NamingError::PermanentName);
        }
        let state = match name {
            None => NamingState::Anonymous,
            Some("") => return Err(NamingError::EmptyName),
            Some(text) if is_constant_path(text) => {
                return Err(NamingError::ConstantShapedName {
                    name: text.to_string(),
                });
            }
            Some(text) => NamingState::Temporary(ModuleName::new(text, entity.encoding())),
        };

        log::debug!("temporary name of {} set to {:?}", id, name);
        self.generation += 1;
        if let Some(entity) = self.graph.entity_mut(id) {
            entity.state = state;
            entity.provisional = None;
            entity.cache = None;
        }
        Ok(())
    }

    fn resolve_inner(&mut self, id: EntityId, visited: &mut FxHashSet<EntityId>) -> Resolution {
        if !visited.insert(id) {
            return Resolution::Unnamed;
        }
        let Some(entity) = self.graph.entity(id) else {
            return Resolution::Unnamed;
        };
        if entity.is_singleton() {
            return Resolution::Unnamed;
        }
        if let NamingState::Permanent(name) = entity.state() {
            return Resolution::Permanent(name.clone());
        }
        if let Some(cached) = entity.cached(self.generation) {
            return match cached {
                Some(name) => Resolution::Provisional(name.clone()),
                None => Resolution::Unnamed,
            };
        }

        if let Some((owner, short)) = self.graph.shortest_rooted_binding(id) {
            // A failed attempt must not hide its owners from the provisional path.
            let snapshot = visited.clone();
            if let Resolution::Permanent(owner_name) = self.resolve_inner(owner, visited) {
                return Resolution::Permanent(self.promote(id, owner, &owner_name, &short));
            }
            *visited = snapshot;
        }

        let Some(entity) = self.graph.entity(id) else {
            return Resolution::Unnamed;
        };
        let temporary = match entity.state() {
            NamingState::Temporary(name) => Some(name.clone()),
            _ => None,
        };
        let encoding = entity.encoding();
        let Some(ProvisionalBinding { owner, short_name }) = entity.provisional().cloned() else {
            return temporary.map_or(Resolution::Unnamed, Resolution::Provisional);
        };

        let owner_resolution = self.resolve_inner(owner, visited);
        if let Resolution::Permanent(owner_name) = &owner_resolution {
            return Resolution::Permanent(self.promote(id, owner, owner_name, &short_name));
        }
        if let Some(name) = temporary {
            return Resolution::Provisional(name);
        }
        match owner_resolution {
            Resolution::Provisional(owner_name) => {
                Resolution::Provisional(ModuleName::nested(&owner_name, &short_name, encoding))
            }
            _ => {
                let label = self.label(owner, visited);
                Resolution::Provisional(ModuleName::nested(&label, &short_name, encoding))
            }
        }
    }

    /// Freeze `id` as `owner_name::short` (just `short` under the root).
    fn promote(
        &mut self,
        id: EntityId,
        owner: EntityId,
        owner_name: &ModuleName,
        short: &str,
    ) -> ModuleName {
        let under_root = self.graph.entity(owner).is_some_and(|o| o.is_root());
        let Some(entity) = self.graph.entity_mut(id) else {
            return ModuleName::new(short, owner_name.encoding());
        };
        let name = if under_root {
            ModuleName::new(short, entity.encoding())
        } else {
            ModuleName::nested(owner_name, short, entity.encoding())
        };
        entity.state = NamingState::Permanent(name.clone());
        entity.enclosing = Some(owner);
        entity.provisional = None;
        entity.cache = None;
        log::debug!("{} permanently named {}", id, name);
        name
    }

    /// Name of `id` if it has one, else its anonymous form.
    fn label(&mut self, id: EntityId, visited: &mut FxHashSet<EntityId>) -> String {
        let Some(entity) = self.graph.entity(id) else {
            return String::new();
        };
        if entity.is_singleton() {
            let attached = entity.attached();
            let inner = match attached {
                Some(Value::Namespace(target)) if !visited.contains(&target) => {
                    match self.resolve_inner(target, visited).into_name() {
                        Some(name) => name.to_string(),
                        None => self.label(target, visited),
                    }
                }
                Some(Value::Namespace(target)) => match self.graph.entity(target) {
                    Some(t) => match t.state() {
                        NamingState::Permanent(name) => name.to_string(),
                        _ => t.anonymous_form(),
                    },
                    None => String::new(),
                },
                Some(Value::Object(object)) => object.to_string(),
                None => String::new(),
            };
            return format!("#<Class:{}>", inner);
        }
        let anonymous = entity.anonymous_form();
        if visited.contains(&id) {
            return anonymous;
        }
        match self.resolve_inner(id, visited).into_name() {
            Some(name) => name.to_string(),
            None => anonymous,
        }
    }
}

impl NamingEvents for NameResolver {
    fn on_bind(&mut self, table: EntityId, short_name: &str, value: Value) {
        self.generation += 1;
        let Some(child) = value.as_namespace() else {
            self.graph.unlink(table, short_name);
            return;
        };
        log::trace!("bind {}::{} = {}", table, short_name, child);
        self.graph.link(table, short_name, child);

        if let Some(entity) = self.graph.entity_mut(child) {
            let named = entity.state().is_permanent();
            if !named && entity.provisional.is_none() && !entity.is_root() {
                entity.provisional = Some(ProvisionalBinding {
                    owner: table,
                    short_name: short_name.to_string(),
                });
            }
        }
    }

    fn on_unbind(&mut self, table: EntityId, short_name: &str) {
        self.generation += 1;
        log::trace!("unbind {}::{}", table, short_name);
        self.graph.unlink(table, short_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constpath_core::ObjectId;

    fn resolver() -> NameResolver {
        NameResolver::new(ModuleName::new("Object", Encoding::Utf8))
    }

    fn module(resolver: &mut NameResolver) -> EntityId {
        resolver.create_entity(EntityFlags::empty(), Encoding::Utf8)
    }

    #[test]
    fn root_has_its_configured_name() {
        let mut resolver = resolver();
        let root = resolver.root();
        assert_eq!(resolver.resolve_name(root).unwrap(), "Object");
    }

    #[test]
    fn unbound_entity_has_no_name() {
        let mut resolver = resolver();
        let m = module(&mut resolver);
        assert_eq!(resolver.resolve_name(m), None);
        assert_eq!(
            resolver.display_name(m).unwrap(),
            format!("#<Module:{}>", m.identity_hex()).as_str()
        );
    }

    #[test]
    fn top_level_binding_uses_bare_name() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);

        resolver.on_bind(root, "Top", m.into());

        assert_eq!(resolver.resolve_name(m).unwrap(), "Top");
        assert_eq!(resolver.entity(m).unwrap().enclosing(), Some(root));
    }

    #[test]
    fn permanent_reads_share_one_instance() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.on_bind(root, "Top", m.into());

        let first = resolver.resolve_name(m).unwrap();
        let other = module(&mut resolver);
        resolver.on_bind(root, "Other", other.into());
        let second = resolver.resolve_name(m).unwrap();

        assert!(ModuleName::ptr_eq(&first, &second));
    }

    #[test]
    fn nested_under_anonymous_owner() {
        let mut resolver = resolver();
        let m = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.on_bind(m, "N", n.into());

        let expected = format!("#<Module:{}>::N", m.identity_hex());
        assert_eq!(resolver.resolve_name(n).unwrap(), expected.as_str());
        assert!(!resolver.entity(n).unwrap().state().is_permanent());
    }

    #[test]
    fn naming_the_owner_renames_the_child() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.on_bind(m, "N", n.into());
        assert!(resolver.resolve_name(n).unwrap().starts_with("#<Module:"));

        resolver.on_bind(root, "M", m.into());

        assert_eq!(resolver.resolve_name(n).unwrap(), "M::N");
        assert!(resolver.entity(m).unwrap().state().is_permanent());
        assert_eq!(resolver.entity(n).unwrap().enclosing(), Some(m));
    }

    #[test]
    fn unbinding_keeps_permanent_name() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.on_bind(root, "Kept", m.into());
        let name = resolver.resolve_name(m).unwrap();

        resolver.on_unbind(root, "Kept");

        assert!(ModuleName::ptr_eq(&name, &resolver.resolve_name(m).unwrap()));
    }

    #[test]
    fn removed_before_first_read_keeps_definition_path() {
        let mut resolver = resolver();
        let root = resolver.root();
        let specs = module(&mut resolver);
        let m = module(&mut resolver);
        resolver.on_bind(root, "Specs", specs.into());
        resolver.on_bind(specs, "ToRemove", m.into());

        resolver.on_unbind(specs, "ToRemove");

        assert_eq!(resolver.resolve_name(m).unwrap(), "Specs::ToRemove");
    }

    #[test]
    fn temporary_name_round_trip() {
        let mut resolver = resolver();
        let m = module(&mut resolver);

        resolver.set_temporary_name(m, Some("fake_name")).unwrap();
        assert_eq!(resolver.resolve_name(m).unwrap(), "fake_name");

        resolver.set_temporary_name(m, None).unwrap();
        assert_eq!(resolver.resolve_name(m), None);
    }

    #[test]
    fn temporary_name_rejections_leave_state_alone() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.set_temporary_name(m, Some("keep_me")).unwrap();

        assert_eq!(
            resolver.set_temporary_name(m, Some("")),
            Err(NamingError::EmptyName)
        );
        assert_eq!(
            resolver.set_temporary_name(m, Some("Foo::Bar")),
            Err(NamingError::ConstantShapedName {
                name: "Foo::Bar".into()
            })
        );
        assert_eq!(
            resolver.set_temporary_name(root, Some("fake_name")),
            Err(NamingError::PermanentName)
        );
        assert_eq!(resolver.resolve_name(m).unwrap(), "keep_me");
    }

    #[test]
    fn unknown_entity() {
        let mut resolver = resolver();
        let ghost = EntityId::new(99);
        assert_eq!(resolver.resolve_name(ghost), None);
        assert_eq!(resolver.display_name(ghost), None);
        assert_eq!(
            resolver.set_temporary_name(ghost, None),
            Err(NamingError::UnknownNamespace(ghost))
        );
    }

    #[test]
    fn rooted_binding_promotes_temporary_name() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.set_temporary_name(m, Some("fake_name")).unwrap();

        resolver.on_bind(root, "Real", m.into());

        assert_eq!(resolver.resolve_name(m).unwrap(), "Real");
        assert!(resolver.entity(m).unwrap().state().is_permanent());
    }

    #[test]
    fn children_of_temporary_names_use_them() {
        let mut resolver = resolver();
        let m = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.set_temporary_name(m, Some("fake_name")).unwrap();
        resolver.on_bind(m, "N", n.into());

        assert_eq!(resolver.resolve_name(n).unwrap(), "fake_name::N");
    }

    #[test]
    fn singletons_never_resolve() {
        let mut resolver = resolver();
        let root = resolver.root();
        let object = ObjectId::new(0x40);
        let singleton = resolver.create_singleton(object.into(), Encoding::Utf8);
        resolver.on_bind(root, "Bound", singleton.into());

        assert_eq!(resolver.resolve_name(singleton), None);
        assert_eq!(
            resolver.display_name(singleton).unwrap(),
            "#<Class:#<Object:0x0000000000000040>>"
        );
    }

    #[test]
    fn singleton_of_named_module_displays_its_name() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.on_bind(root, "Str", m.into());
        let singleton = resolver.create_singleton(m.into(), Encoding::Utf8);

        assert_eq!(resolver.display_name(singleton).unwrap(), "#<Class:Str>");
    }

    #[test]
    fn bound_singleton_is_not_a_rooted_step() {
        let mut resolver = resolver();
        let root = resolver.root();
        let meta = resolver.create_singleton(ObjectId::new(1).into(), Encoding::Utf8);
        let other = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.on_bind(root, "Meta", meta.into());
        resolver.on_bind(root, "Other", other.into());
        resolver.on_bind(meta, "Inner", n.into());
        resolver.on_bind(other, "N2", n.into());

        assert_eq!(resolver.resolve_name(n).unwrap(), "Other::N2");
        assert!(resolver.entity(n).unwrap().state().is_permanent());
    }

    #[test]
    fn chain_under_bound_singleton_keeps_every_segment() {
        let mut resolver = resolver();
        let root = resolver.root();
        let meta = resolver.create_singleton(ObjectId::new(1).into(), Encoding::Utf8);
        let o = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.on_bind(root, "Meta", meta.into());
        resolver.on_bind(meta, "O", o.into());
        resolver.on_bind(o, "N", n.into());

        let singleton = "#<Class:#<Object:0x0000000000000001>>";
        assert_eq!(resolver.resolve_name(n).unwrap(), format!("{singleton}::O::N").as_str());
        assert_eq!(resolver.resolve_name(o).unwrap(), format!("{singleton}::O").as_str());
        assert!(!resolver.entity(n).unwrap().state().is_permanent());
    }

    #[test]
    fn temporary_entity_keeps_removed_rooted_path() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        resolver.set_temporary_name(m, Some("fake_name")).unwrap();

        resolver.on_bind(root, "T", m.into());
        resolver.on_unbind(root, "T");

        assert_eq!(resolver.resolve_name(m).unwrap(), "T");
        assert!(resolver.entity(m).unwrap().state().is_permanent());
    }

    #[test]
    fn temporary_name_wins_over_anonymous_owner() {
        let mut resolver = resolver();
        let owner = module(&mut resolver);
        let m = module(&mut resolver);
        resolver.set_temporary_name(m, Some("fake_name")).unwrap();

        resolver.on_bind(owner, "T", m.into());

        assert_eq!(resolver.resolve_name(m).unwrap(), "fake_name");
    }

    #[test]
    fn self_binding_does_not_loop() {
        let mut resolver = resolver();
        let m = module(&mut resolver);
        resolver.on_bind(m, "Me", m.into());

        let expected = format!("#<Module:{}>::Me", m.identity_hex());
        assert_eq!(resolver.resolve_name(m).unwrap(), expected.as_str());
    }

    #[test]
    fn provisional_cache_tracks_generation() {
        let mut resolver = resolver();
        let root = resolver.root();
        let m = module(&mut resolver);
        let n = module(&mut resolver);
        resolver.on_bind(m, "N", n.into());

        let first = resolver.resolve_name(n).unwrap();
        let again = resolver.resolve_name(n).unwrap();
        assert!(ModuleName::ptr_eq(&first, &again));

        resolver.on_bind(root, "Unrelated", Value::Object(ObjectId::new(1)));
        let after = resolver.resolve_name(n).unwrap();
        assert_eq!(first, after);
        assert!(!ModuleName::ptr_eq(&first, &after));
    }

    #[test]
    fn names_carry_the_entitys_encoding() {
        let mut resolver = resolver();
        let root = resolver.root();
        let outer = resolver.create_entity(EntityFlags::empty(), Encoding::UsAscii);
        let inner = resolver.create_entity(EntityFlags::CLASS, Encoding::EucJp);
        resolver.on_bind(root, "Outer", outer.into());
        resolver.on_bind(outer, "Inner", inner.into());

        let name = resolver.resolve_name(inner).unwrap();
        assert_eq!(name, "Outer::Inner");
        assert_eq!(name.encoding(), Encoding::EucJp);
        assert_eq!(resolver.resolve_name(outer).unwrap().encoding(), Encoding::UsAscii);
    }
}
