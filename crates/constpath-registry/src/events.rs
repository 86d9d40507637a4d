//! Hooks fired by constant tables when bindings change.
//!
//! The naming layer never scans constant tables on its own initiative. Every
//! table mutation is reported through [`NamingEvents`], and the receiver keeps
//! whatever index it needs (the resolver mirrors namespace-valued bindings in
//! its binding graph and bumps its cache generation).

use constpath_core::{EntityId, Value};

/// Receiver of constant-table mutation events.
///
/// `table` is the entity that owns the constant table being mutated.
pub trait NamingEvents {
    /// A constant was bound or rebound.
    fn on_bind(&mut self, table: EntityId, short_name: &str, value: Value);

    /// A constant was removed.
    fn on_unbind(&mut self, table: EntityId, short_name: &str);

    /// A bind-if-absent succeeded.
    ///
    /// Participates in naming exactly like an unconditional bind.
    fn on_conditional_bind(&mut self, table: EntityId, short_name: &str, value: Value) {
        self.on_bind(table, short_name, value);
    }
}

/// Event sink that ignores everything.
///
/// Useful for tables that are not wired into a resolver, such as scratch
/// tables built in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreEvents;

impl NamingEvents for IgnoreEvents {
    fn on_bind(&mut self, _table: EntityId, _short_name: &str, _value: Value) {}

    fn on_unbind(&mut self, _table: EntityId, _short_name: &str) {}
}
