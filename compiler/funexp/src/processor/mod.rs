//! Template processing.
//!
//! # Algorithm
//!
//! ```text
//! for each literal segment i:
//!     append literal[i]
//!     if slot i exists:
//!         %s item inside `each`  -> append the driver value's text
//!         inlinable primitive    -> append its JSON literal
//!         anything else          -> append `<lookup_var>.<key>`,
//!                                   key = first key seen for this value,
//!                                   else `<key_prefix><i>`
//! ```
//!
//! All mutable state lives in an [`Emitter`] created per call, so one
//! `Processor` can serve any number of threads.

mod emitter;

use funexp_ir::{Template, Value};
use tracing::debug;

use crate::bindings::Bindings;
use crate::config::ProcessorConfig;
use crate::evaluator::{CompileError, Evaluator};
use emitter::Emitter;

/// Generated function source together with its lookup context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FunExp {
    /// Function body. Registered arguments appear as `<lookup_var>.<key>`.
    pub source: String,
    /// Registered arguments by key, in first-occurrence order.
    pub bindings: Bindings,
}

/// Anything that turns a template into a [`FunExp`].
///
/// Implemented by [`Processor`] (one pass) and [`Each`] (one pass per
/// driver value), so call sites can accept either.
pub trait TemplateProcessor {
    fn process(&self, template: &Template<'_>) -> FunExp;
}

/// A configured template processor.
///
/// Immutable after construction; see [`fun`](crate::fun) for the shared
/// default instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process `template` once.
    #[tracing::instrument(level = "debug", skip_all, fields(slots = template.slot_count()))]
    pub fn process(&self, template: &Template<'_>) -> FunExp {
        let mut emitter = Emitter::new(&self.config, template.literal_len());
        emitter.render(template, None);
        finish(emitter)
    }

    /// Bind a driver sequence for repeated processing.
    ///
    /// ```text
    /// fun().each(["a", "b", "c"]).process(&template!("log(model.${});", "%s"))
    /// // source: "log(model.a);log(model.b);log(model.c);"
    /// ```
    pub fn each<I>(&self, drivers: I) -> Each<'_>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Each {
            processor: self,
            drivers: drivers.into_iter().map(Into::into).collect(),
        }
    }

    /// Hand `exp` to an evaluator.
    ///
    /// The evaluator receives the lookup variable as its first parameter,
    /// followed by `params`, and the bindings to supply for it at call time.
    #[tracing::instrument(level = "debug", skip_all, fields(params = params.len()))]
    pub fn compile<E: Evaluator>(
        &self,
        exp: &FunExp,
        params: &[&str],
        evaluator: &E,
    ) -> Result<E::Output, CompileError> {
        let lookup_var = self.config.lookup_var.as_str();
        if params.contains(&lookup_var) {
            return Err(CompileError::ShadowedLookupVar(lookup_var.to_string()));
        }

        let mut all_params = Vec::with_capacity(params.len() + 1);
        all_params.push(lookup_var);
        all_params.extend_from_slice(params);

        evaluator
            .evaluate(&all_params, &exp.source, &exp.bindings)
            .map_err(|err| {
                debug!(error = %err, "evaluator rejected generated source");
                CompileError::Evaluator(err.into())
            })
    }
}

impl TemplateProcessor for Processor {
    fn process(&self, template: &Template<'_>) -> FunExp {
        Processor::process(self, template)
    }
}

/// A processor bound to a driver sequence.
///
/// Processing runs the template once per driver value, in order, and
/// concatenates the passes. One entry table spans all passes, so an
/// argument repeated across passes is registered once.
#[derive(Clone, Debug)]
pub struct Each<'p> {
    processor: &'p Processor,
    drivers: Vec<Value>,
}

impl Each<'_> {
    pub fn drivers(&self) -> &[Value] {
        &self.drivers
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(slots = template.slot_count(), passes = self.drivers.len())
    )]
    pub fn process(&self, template: &Template<'_>) -> FunExp {
        let capacity = template.literal_len() * self.drivers.len();
        let mut emitter = Emitter::new(&self.processor.config, capacity);
        for item in &self.drivers {
            emitter.render(template, Some(item));
        }
        finish(emitter)
    }
}

impl TemplateProcessor for Each<'_> {
    fn process(&self, template: &Template<'_>) -> FunExp {
        Each::process(self, template)
    }
}

fn finish(emitter: Emitter<'_>) -> FunExp {
    let entries = emitter.entry_count();
    let exp = emitter.finish();
    debug!(
        entries,
        source_len = exp.source.len(),
        "template processed"
    );
    exp
}
