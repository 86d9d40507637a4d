use crate::{EntityId, ObjectId};

/// A value bound to a constant.
///
/// Only [`Value::Namespace`] values participate in naming; plain objects are
/// carried through constant tables untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// A namespace entity (module, class, or singleton class).
    Namespace(EntityId),
    /// Any other object.
    Object(ObjectId),
}

impl Value {
    /// The namespace entity held by this value, if any.
    #[inline]
    pub fn as_namespace(self) -> Option<EntityId> {
        match self {
            Value::Namespace(id) => Some(id),
            Value::Object(_) => None,
        }
    }

    /// Check if this value is a namespace entity.
    #[inline]
    pub fn is_namespace(self) -> bool {
        matches!(self, Value::Namespace(_))
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::Namespace(id)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}
