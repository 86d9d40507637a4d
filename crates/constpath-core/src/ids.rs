//! Identifier types for namespace entities and plain objects.
//!
//! Entities live in an arena owned by the registry; an [`EntityId`] is a
//! plain index into that arena. Back-references between entities (the
//! enclosing namespace, the owner of a binding) are stored as ids and looked
//! up on demand, never as owning pointers.

use std::fmt;

/// Identifies a namespace entity (module, class, or singleton class).
///
/// The id is stable for the lifetime of the registry that issued it and
/// doubles as the entity's identity in anonymous display forms.
///
/// # Example
///
/// ```
/// use constpath_core::EntityId;
///
/// let id = EntityId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.identity_hex(), "0x0000000000000003");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Create an entity ID from an arena index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying arena index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Opaque identity used when synthesizing `#<Module:0x...>` forms.
    #[inline]
    pub const fn identity(self) -> u64 {
        self.0 as u64
    }

    /// The identity rendered as `0x` followed by 16 lowercase hex digits.
    pub fn identity_hex(self) -> String {
        format!("{:#018x}", self.identity())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity_{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Identifies a plain (non-namespace) object bound in a constant table.
///
/// Plain objects never take part in naming. They only matter as constant
/// values and as the attachment point of singleton classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Create an object ID.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The identity rendered as `0x` followed by 16 lowercase hex digits.
    pub fn identity_hex(self) -> String {
        format!("{:#018x}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Object:{}>", self.identity_hex())
    }
}
