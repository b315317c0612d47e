//! Seam to the code evaluator that turns generated source into something
//! callable.
//!
//! funexp never compiles or runs the source it produces. An embedding
//! application supplies an [`Evaluator`] (a scripting engine, an expression
//! interpreter, a JIT) and [`Processor::compile`](crate::Processor::compile)
//! hands it the parameter list, the body and the bindings.

use thiserror::Error;

use crate::bindings::Bindings;

/// External facility that compiles a function body with named parameters.
pub trait Evaluator {
    /// The compiled, callable unit.
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compile `body` as a function of `params`.
    ///
    /// `params[0]` is the processor's lookup variable; the caller binds
    /// `bindings` to it when invoking the result.
    fn evaluate(
        &self,
        params: &[&str],
        body: &str,
        bindings: &Bindings,
    ) -> Result<Self::Output, Self::Error>;
}

/// Error when handing generated source to an evaluator.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A caller parameter has the same name as the lookup variable.
    #[error("parameter `{0}` shadows the lookup variable")]
    ShadowedLookupVar(String),

    /// The evaluator rejected the source.
    #[error("evaluator rejected generated source: {0}")]
    Evaluator(#[source] Box<dyn std::error::Error + Send + Sync>),
}
