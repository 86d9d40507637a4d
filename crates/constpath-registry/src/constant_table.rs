//! Per-entity constant tables.
//!
//! A [`ConstantTable`] maps short constant names to values in insertion order.
//! Names are unique within a table: rebinding replaces the entry in place.
//! Every successful mutation is reported to the [`NamingEvents`] sink passed
//! in by the caller.

use constpath_core::{EntityId, Value};
use rustc_hash::FxHashMap;

use crate::events::NamingEvents;

/// A single binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstEntry {
    /// Short constant name.
    pub name: String,
    /// Bound value.
    pub value: Value,
}

/// Ordered constant table owned by one namespace entity.
#[derive(Debug)]
pub struct ConstantTable {
    owner: EntityId,
    /// Entries in insertion order.
    entries: Vec<ConstEntry>,
    /// Short name -> position in `entries`.
    index: FxHashMap<String, usize>,
}

impl ConstantTable {
    /// Create an empty table owned by `owner`.
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// The entity owning this table.
    #[inline]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Number of bindings.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no bindings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a binding by short name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.index.get(name).map(|&slot| self.entries[slot].value)
    }

    /// Check if a short name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over all bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.value))
    }

    /// Iterate over the bindings whose value is a namespace entity.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.entries
            .iter()
            .filter_map(|e| e.value.as_namespace().map(|id| (e.name.as_str(), id)))
    }

    /// Bind `name` to `value`, replacing any previous binding.
    ///
    /// Returns the previous value, if any. Fires `on_bind`.
    pub fn bind(
        &mut self,
        name: &str,
        value: Value,
        events: &mut dyn NamingEvents,
    ) -> Option<Value> {
        let previous = self.insert(name, value);
        events.on_bind(self.owner, name, value);
        previous
    }

    /// Bind `name` to `value` only if `name` is not bound yet.
    ///
    /// Returns the existing value when the slot was occupied, in which case
    /// nothing changes and no event fires. Fires `on_conditional_bind` on
    /// success.
    pub fn bind_if_absent(
        &mut self,
        name: &str,
        value: Value,
        events: &mut dyn NamingEvents,
    ) -> Option<Value> {
        if let Some(existing) = self.get(name) {
            return Some(existing);
        }
        self.insert(name, value);
        events.on_conditional_bind(self.owner, name, value);
        None
    }

    /// Remove the binding for `name`.
    ///
    /// Returns the removed value. Fires `on_unbind` only if something was
    /// removed.
    pub fn unbind(&mut self, name: &str, events: &mut dyn NamingEvents) -> Option<Value> {
        let slot = self.index.remove(name)?;
        let removed = self.entries.remove(slot);
        for entry in &self.entries[slot..] {
            if let Some(pos) = self.index.get_mut(&entry.name) {
                *pos -= 1;
            }
        }
        events.on_unbind(self.owner, name);
        Some(removed.value)
    }

    fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        if let Some(&slot) = self.index.get(name) {
            let entry = &mut self.entries[slot];
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(ConstEntry {
            name: name.to_string(),
            value,
        });
        None
    }
}
