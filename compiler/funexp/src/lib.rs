//! funexp - Function Expressions from Templates
//!
//! Turns a template of source fragments interleaved with runtime values into
//! a function body plus the lookup context that body reads its values from.
//! Hand both to an evaluator and the result is a specialized function with
//! no per-call dispatch on the injected values.
//!
//! # Architecture
//!
//! ```text
//! Template (literals + args)
//!        ↓
//!    Processor / Each   (inline primitives, register everything else)
//!        ↓
//!     FunExp            (source + bindings)
//!        ↓
//!    Evaluator          (supplied by the embedding application)
//! ```
//!
//! # Example
//!
//! ```
//! use funexp::{fun, template, Value};
//!
//! let calc_total = Value::function(|args| match args {
//!     [Value::Number(price), Value::Number(discount)] => Value::Number(price * discount),
//!     _ => Value::Null,
//! });
//!
//! let exp = fun().process(&template!(
//!     "model.total = ${}(model.price, ${}); return model;",
//!     calc_total.clone(),
//!     0.75,
//! ));
//!
//! assert_eq!(exp.source, "model.total = ctx.$e_0(model.price, 0.75); return model;");
//! assert_eq!(exp.bindings.get("$e_0"), Some(&calc_total));
//! ```
//!
//! # Tracing
//!
//! Enable with `RUST_LOG=funexp=debug` (one event per processed template) or
//! `RUST_LOG=funexp=trace` (one event per registered argument) after calling
//! [`init_tracing`].

mod bindings;
mod config;
mod entries;
mod evaluator;
mod processor;

use std::sync::{Once, OnceLock};

pub use bindings::Bindings;
pub use config::{
    ProcessorConfig, DEFAULT_INLINE_PRIMITIVES, DEFAULT_KEY_PREFIX, DEFAULT_LOOKUP_VAR,
};
pub use evaluator::{CompileError, Evaluator};
pub use processor::{Each, FunExp, Processor, TemplateProcessor};

pub use funexp_ir::{
    format_number, inline_literal, template, Arg, Handle, HandleId, NativeFn, Template,
    TemplateBuilder, TemplateError, Value, ITEM_PLACEHOLDER, SLOT_MARKER,
};

/// The shared processor with default settings.
///
/// Lookup variable `ctx`, key prefix `$e_`, primitives inlined. It holds no
/// per-call state, so unrelated call sites can share it freely.
pub fn fun() -> &'static Processor {
    static DEFAULT: OnceLock<Processor> = OnceLock::new();
    DEFAULT.get_or_init(Processor::default)
}

/// Build a processor with custom settings.
pub fn make_processor(config: ProcessorConfig) -> Processor {
    Processor::new(config)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Only installs a subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
