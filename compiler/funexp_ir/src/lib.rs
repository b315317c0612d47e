//! funexp IR - Template and Value Types
//!
//! This crate contains the data structures shared by the funexp processor:
//! - `Value` for runtime arguments (primitives and shared handles)
//! - `Arg` for template slots (an ordinary value or the `%s` item marker)
//! - `Template` for paired literal segments and argument slots
//! - Literal encoding used when a value is inlined into generated source
//!
//! # Design Philosophy
//!
//! - **Share, never copy**: non-primitive arguments live behind `Arc`, so the
//!   bindings map holds the very instance the caller passed in.
//! - **Well-formed by construction**: a `Template` always has exactly one
//!   more literal segment than it has argument slots.
//! - **Opaque text**: literal segments are never parsed or validated.

mod error;
mod literal;
mod template;
mod value;

pub use error::TemplateError;
pub use literal::{format_number, inline_literal};
pub use template::{Arg, Template, TemplateBuilder, ITEM_PLACEHOLDER, SLOT_MARKER};
pub use value::{Handle, HandleId, NativeFn, Value};

/// Build a [`Template`] from text containing empty `${}` slot markers.
///
/// Each `${}` in the text is replaced, in order, by the following argument.
/// Arguments are anything convertible into [`Arg`]; the string `"%s"` becomes
/// the item placeholder used by repeated templates.
///
/// # Panics
///
/// Panics if the number of `${}` markers differs from the number of
/// arguments, the same way `format!` rejects mismatched arguments. Use
/// [`Template::parse`] to handle the mismatch as an error instead.
///
/// # Example
///
/// ```
/// use funexp_ir::{template, Value};
///
/// let double = Value::function(|args| match args {
///     [Value::Number(n)] => Value::Number(n * 2.0),
///     _ => Value::Null,
/// });
/// let tpl = template!("return ${}(model.price, ${});", double, 0.75);
/// assert_eq!(tpl.slot_count(), 2);
/// ```
#[macro_export]
macro_rules! template {
    ($text:expr $(, $arg:expr)* $(,)?) => {
        match $crate::Template::parse($text, ::std::vec![$($crate::Arg::from($arg)),*]) {
            ::std::result::Result::Ok(template) => template,
            ::std::result::Result::Err(err) => ::std::panic!("{}", err),
        }
    };
}
