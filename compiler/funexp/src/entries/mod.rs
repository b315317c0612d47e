//! Per-call deduplication of registered arguments.
//!
//! The table maps each distinct argument to the key it was first registered
//! under, so repeated arguments share one lookup slot. It lives for exactly
//! one processing call and is dropped with it.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use funexp_ir::{HandleId, Value};
use rustc_hash::FxHashMap;

/// What makes two arguments "the same" for registration.
///
/// Handles compare by allocation, primitives by value. Every NaN is one
/// identity and `-0` is the same as `0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Identity {
    Null,
    Bool(bool),
    /// Canonical bit pattern.
    Number(u64),
    Str(Arc<str>),
    Ref(HandleId),
}

impl Identity {
    #[allow(clippy::float_cmp)]
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Identity::Null,
            Value::Bool(b) => Identity::Bool(*b),
            Value::Number(n) if n.is_nan() => Identity::Number(f64::NAN.to_bits()),
            Value::Number(n) if *n == 0.0 => Identity::Number(0),
            Value::Number(n) => Identity::Number(n.to_bits()),
            Value::Str(s) => Identity::Str(Arc::clone(s)),
            Value::Ref(h) => Identity::Ref(h.id()),
        }
    }
}

/// Outcome of [`EntryTable::register`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Registration {
    /// First occurrence; the value now owns this key.
    Fresh(String),
    /// Seen before under this key.
    Reused(String),
}

impl Registration {
    pub(crate) fn key(&self) -> &str {
        match self {
            Registration::Fresh(key) | Registration::Reused(key) => key,
        }
    }

    pub(crate) fn is_fresh(&self) -> bool {
        matches!(self, Registration::Fresh(_))
    }
}

/// Argument identity to entry key, scoped to one call.
///
/// Handle identities are allocation addresses, so the table must not
/// outlive the template whose arguments it has seen.
#[derive(Default)]
pub(crate) struct EntryTable {
    keys: FxHashMap<Identity, String>,
}

impl EntryTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Look up `value`, assigning `make_key()` if it has not been seen.
    pub(crate) fn register(
        &mut self,
        value: &Value,
        make_key: impl FnOnce() -> String,
    ) -> Registration {
        match self.keys.entry(Identity::of(value)) {
            Entry::Occupied(seen) => Registration::Reused(seen.get().clone()),
            Entry::Vacant(slot) => Registration::Fresh(slot.insert(make_key()).clone()),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}
