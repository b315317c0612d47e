//! Per-call emission state.
//!
//! An `Emitter` accumulates the source text and bindings for one processing
//! call, including every pass of a repeated template. It is created inside
//! the call and consumed by it, so no state survives between calls.

use funexp_ir::{inline_literal, Arg, Template, Value};
use tracing::trace;

use crate::bindings::Bindings;
use crate::config::ProcessorConfig;
use crate::entries::EntryTable;
use crate::FunExp;

pub(crate) struct Emitter<'c> {
    config: &'c ProcessorConfig,
    entries: EntryTable,
    source: String,
    bindings: Bindings,
}

impl<'c> Emitter<'c> {
    pub(crate) fn new(config: &'c ProcessorConfig, capacity: usize) -> Self {
        Self {
            config,
            entries: EntryTable::new(),
            source: String::with_capacity(capacity),
            bindings: Bindings::new(),
        }
    }

    /// Render one pass of `template`. `item` is the current driver value
    /// of a repeated template, if any.
    pub(crate) fn render(&mut self, template: &Template<'_>, item: Option<&Value>) {
        for (slot, literal, arg) in template.segments() {
            self.source.push_str(literal);
            match (arg, item) {
                (None, _) => {}
                (Some(Arg::Item), Some(current)) => self.emit_item(current),
                (Some(Arg::Item), None) => self.emit_value(slot, &Arg::Item.to_value()),
                (Some(Arg::Value(value)), _) => self.emit_value(slot, value),
            }
        }
    }

    fn emit_item(&mut self, current: &Value) {
        self.source.push_str(&current.to_string());
    }

    fn emit_value(&mut self, slot: usize, value: &Value) {
        if self.config.inline_primitives {
            if let Some(literal) = inline_literal(value) {
                self.source.push_str(&literal);
                return;
            }
        }
        self.register(slot, value);
    }

    fn register(&mut self, slot: usize, value: &Value) {
        let config = self.config;
        let registration = self.entries.register(value, || config.entry_key(slot));
        trace!(
            slot,
            key = registration.key(),
            fresh = registration.is_fresh(),
            "registered argument"
        );

        self.source.push_str(&config.lookup_var);
        self.source.push('.');
        self.source.push_str(registration.key());
        if registration.is_fresh() {
            self.bindings.insert(registration.key(), value.clone());
        }
    }

    /// Number of distinct registered arguments so far.
    pub(crate) fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn finish(self) -> FunExp {
        FunExp {
            source: self.source,
            bindings: self.bindings,
        }
    }
}
