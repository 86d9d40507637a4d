//! Frozen, identity-stable name strings.
//!
//! A [`ModuleName`] is the value handed out by name resolution. Once an entity
//! is permanently named, every read returns a clone of the same handle, so two
//! reads are not merely equal but share one allocation. [`ModuleName::ptr_eq`]
//! is the identity test; `==` compares contents.
//!
//! # Examples
//!
//! ```
//! use constpath_core::{Encoding, ModuleName};
//!
//! let name = ModuleName::new("Game::Entities::Player", Encoding::Utf8);
//! let again = name.clone();
//! assert!(ModuleName::ptr_eq(&name, &again));
//!
//! let copy = ModuleName::new("Game::Entities::Player", Encoding::Utf8);
//! assert_eq!(name, copy);
//! assert!(!ModuleName::ptr_eq(&name, &copy));
//!
//! assert_eq!(name.last_segment(), "Player");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::Encoding;

/// Separator between constant path segments.
pub const PATH_SEPARATOR: &str = "::";

#[derive(Debug)]
struct NameRepr {
    text: Box<str>,
    encoding: Encoding,
}

/// Immutable name string tagged with its source encoding.
#[derive(Clone)]
pub struct ModuleName(Arc<NameRepr>);

impl ModuleName {
    /// Freeze a new name.
    pub fn new(text: impl Into<Box<str>>, encoding: Encoding) -> Self {
        Self(Arc::new(NameRepr {
            text: text.into(),
            encoding,
        }))
    }

    /// Join an enclosing name and a short constant name with `::`.
    pub fn nested(outer: &str, short: &str, encoding: Encoding) -> Self {
        let mut text = String::with_capacity(outer.len() + PATH_SEPARATOR.len() + short.len());
        text.push_str(outer);
        text.push_str(PATH_SEPARATOR);
        text.push_str(short);
        Self::new(text, encoding)
    }

    /// The name text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    /// The encoding tag carried by this name.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.0.encoding
    }

    /// Check whether two handles are the same instance.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }

    /// Iterate over the `::`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.as_str().split(PATH_SEPARATOR)
    }

    /// The final segment (the entity's own short name for constant paths).
    pub fn last_segment(&self) -> &str {
        self.as_str()
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or_default()
    }
}

impl Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for ModuleName {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.as_str() == other.as_str()
    }
}

impl Eq for ModuleName {}

impl Hash for ModuleName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ModuleName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.as_str(), self.encoding())
    }
}
