//! Namespace entities and their naming state.
//!
//! # State machine
//!
//! ```text
//! Anonymous ──set_temporary_name(s)──▶ Temporary(s)
//!     ▲                                   │
//!     └──────set_temporary_name(None)─────┘
//!     │                                   │
//!     └──── first read while rooted ──────┴──▶ Permanent(name)   (terminal)
//! ```
//!
//! `Permanent` is frozen: the cached handle is returned on every read and the
//! enclosing back-reference is never rewritten.

use bitflags::bitflags;
use constpath_core::{EntityId, Encoding, ModuleName, Value};

bitflags! {
    /// What kind of namespace an entity is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntityFlags: u8 {
        /// Extended into a class (anonymous form renders as `#<Class:...>`).
        const CLASS = 1 << 0;
        /// Per-object singleton class. Never resolves to a name.
        const SINGLETON = 1 << 1;
        /// The global root namespace.
        const ROOT = 1 << 2;
    }
}

/// Naming state of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamingState {
    /// No name has been assigned or computed.
    #[default]
    Anonymous,
    /// Explicit temporary name. May be replaced or cleared.
    Temporary(ModuleName),
    /// Resolved constant path. Never changes again.
    Permanent(ModuleName),
}

impl NamingState {
    /// Check if the state is `Permanent`.
    #[inline]
    pub fn is_permanent(&self) -> bool {
        matches!(self, NamingState::Permanent(_))
    }

    /// Check if the state is `Temporary`.
    #[inline]
    pub fn is_temporary(&self) -> bool {
        matches!(self, NamingState::Temporary(_))
    }

    /// The stored name, for `Temporary` and `Permanent` states.
    pub fn name(&self) -> Option<&ModuleName> {
        match self {
            NamingState::Anonymous => None,
            NamingState::Temporary(name) | NamingState::Permanent(name) => Some(name),
        }
    }
}

/// The first binding an entity received while not permanently named.
///
/// Reset whenever its temporary name is set or cleared.
///
/// Kept after the binding itself is removed: a module taken out of its
/// constant still reports the path it was defined under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionalBinding {
    /// Entity whose constant table held the binding.
    pub owner: EntityId,
    /// Short constant name.
    pub short_name: String,
}

/// Result of the last non-permanent resolution, stamped with the binding
/// generation it was computed at.
#[derive(Debug, Clone)]
pub(crate) struct CachedResolution {
    pub(crate) generation: u64,
    pub(crate) name: Option<ModuleName>,
}

/// A node of the naming graph.
#[derive(Debug, Clone)]
pub struct NamespaceEntity {
    id: EntityId,
    flags: EntityFlags,
    encoding: Encoding,
    /// Value a singleton class is attached to.
    attached: Option<Value>,
    pub(crate) state: NamingState,
    pub(crate) enclosing: Option<EntityId>,
    pub(crate) provisional: Option<ProvisionalBinding>,
    pub(crate) cache: Option<CachedResolution>,
}

impl NamespaceEntity {
    pub(crate) fn new(id: EntityId, flags: EntityFlags, encoding: Encoding) -> Self {
        Self {
            id,
            flags,
            encoding,
            attached: None,
            state: NamingState::Anonymous,
            enclosing: None,
            provisional: None,
            cache: None,
        }
    }

    pub(crate) fn singleton(id: EntityId, attached: Value, encoding: Encoding) -> Self {
        let mut entity = Self::new(id, EntityFlags::CLASS | EntityFlags::SINGLETON, encoding);
        entity.attached = Some(attached);
        entity
    }

    pub(crate) fn root(id: EntityId, name: ModuleName) -> Self {
        let mut entity = Self::new(id, EntityFlags::CLASS | EntityFlags::ROOT, name.encoding());
        entity.state = NamingState::Permanent(name);
        entity
    }

    /// The entity's identity.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    /// Encoding of the entity's definition site.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.flags.contains(EntityFlags::CLASS)
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.flags.contains(EntityFlags::SINGLETON)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.flags.contains(EntityFlags::ROOT)
    }

    /// The value a singleton class belongs to.
    #[inline]
    pub fn attached(&self) -> Option<Value> {
        self.attached
    }

    #[inline]
    pub fn state(&self) -> &NamingState {
        &self.state
    }

    /// The namespace this entity was permanently named under.
    ///
    /// `None` for the root and for entities that are not permanent yet.
    /// Top-level entities record the root.
    #[inline]
    pub fn enclosing(&self) -> Option<EntityId> {
        self.enclosing
    }

    #[inline]
    pub fn provisional(&self) -> Option<&ProvisionalBinding> {
        self.provisional.as_ref()
    }

    /// Anonymous display form, e.g. `#<Module:0x0000000000000004>`.
    ///
    /// Singletons are rendered by the resolver since their form depends on
    /// what they are attached to.
    pub fn anonymous_form(&self) -> String {
        let kind = if self.is_class() { "Class" } else { "Module" };
        format!("#<{}:{}>", kind, self.id.identity_hex())
    }

    pub(crate) fn cached(&self, generation: u64) -> Option<&Option<ModuleName>> {
        self.cache
            .as_ref()
            .filter(|c| c.generation == generation)
            .map(|c| &c.name)
    }
}
