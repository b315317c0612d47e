//! Templates: literal segments paired with argument slots.
//!
//! A template with N argument slots always carries N + 1 literal segments:
//!
//! ```text
//! literal[0] arg[0] literal[1] arg[1] ... arg[N-1] literal[N]
//! ```
//!
//! Segments are opaque text. Nothing here looks inside them beyond splitting
//! on the `${}` slot marker in [`Template::parse`].

use std::borrow::Cow;

use crate::error::TemplateError;
use crate::value::{Handle, NativeFn, Value};

/// Argument value that marks the current item of a repeated template.
pub const ITEM_PLACEHOLDER: &str = "%s";

/// Slot marker recognised by [`Template::parse`] and `template!`.
pub const SLOT_MARKER: &str = "${}";

/// A template argument slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// An ordinary argument.
    Value(Value),
    /// Positional item marker, written as `"%s"`.
    ///
    /// Inside a repeated template it renders the current driver value.
    /// Anywhere else it is processed as the plain string `"%s"`.
    Item,
}

impl Arg {
    /// The value this slot stands for when no driver is active.
    pub fn to_value(&self) -> Value {
        match self {
            Arg::Value(v) => v.clone(),
            Arg::Item => Value::string(ITEM_PLACEHOLDER),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(ref s) if &**s == ITEM_PLACEHOLDER => Arg::Item,
            value => Arg::Value(value),
        }
    }
}

impl From<&Value> for Arg {
    fn from(value: &Value) -> Self {
        Arg::from(value.clone())
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::from(Value::from(v))
                }
            }
        )*
    };
}

impl_arg_from!(bool, f64, f32, i32, u32, i16, u16, i8, u8, &str, String, Handle, NativeFn);

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::from(Value::from(v))
    }
}

/// A well-formed template.
#[derive(Clone, Debug, PartialEq)]
pub struct Template<'a> {
    literals: Vec<Cow<'a, str>>,
    args: Vec<Arg>,
}

impl<'a> Template<'a> {
    /// A template with no argument slots.
    pub fn literal(text: impl Into<Cow<'a, str>>) -> Self {
        Template {
            literals: vec![text.into()],
            args: Vec::new(),
        }
    }

    /// Pair literal segments with arguments.
    ///
    /// Fails unless there is exactly one more segment than arguments.
    pub fn from_parts<L, A>(literals: L, args: A) -> Result<Self, TemplateError>
    where
        L: IntoIterator,
        L::Item: Into<Cow<'a, str>>,
        A: IntoIterator,
        A::Item: Into<Arg>,
    {
        let literals: Vec<Cow<'a, str>> = literals.into_iter().map(Into::into).collect();
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        if literals.len() != args.len() + 1 {
            return Err(TemplateError::ArityMismatch {
                literals: literals.len(),
                args: args.len(),
            });
        }
        Ok(Template { literals, args })
    }

    /// Split `text` at every `${}` marker and fill the slots with `args`.
    ///
    /// Segments borrow from `text`.
    pub fn parse(text: &'a str, args: Vec<Arg>) -> Result<Self, TemplateError> {
        Self::from_parts(text.split(SLOT_MARKER), args)
    }

    /// Start building a template piece by piece.
    pub fn builder() -> TemplateBuilder<'a> {
        TemplateBuilder::new()
    }

    /// Literal segments, always one more than [`Template::args`].
    #[inline]
    pub fn literals(&self) -> &[Cow<'a, str>] {
        &self.literals
    }

    /// Argument slots.
    #[inline]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Number of argument slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.args.len()
    }

    /// Walk the template in order: each literal segment with the slot that
    /// follows it, if any. Yields `(slot index, segment, slot)`.
    pub fn segments(&self) -> impl Iterator<Item = (usize, &str, Option<&Arg>)> + '_ {
        self.literals
            .iter()
            .enumerate()
            .map(|(i, lit)| (i, lit.as_ref(), self.args.get(i)))
    }

    /// Total bytes of literal text.
    pub fn literal_len(&self) -> usize {
        self.literals.iter().map(|lit| lit.len()).sum()
    }
}

/// Incremental [`Template`] construction.
///
/// Text and arguments may be appended in any order; consecutive text pieces
/// join into one segment, and consecutive arguments get an empty segment
/// between them. The result is always well-formed.
///
/// ```text
/// let tpl = Template::builder()
///     .text("model.total = ")
///     .arg(calc_total)
///     .text("(model.price, ")
///     .arg(0.75)
///     .text(");")
///     .build();
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplateBuilder<'a> {
    /// Closed segments, one per argument pushed so far.
    literals: Vec<Cow<'a, str>>,
    args: Vec<Arg>,
    /// Segment still open for text.
    current: Cow<'a, str>,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text to the current segment.
    #[must_use]
    pub fn text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        let text = text.into();
        if self.current.is_empty() {
            self.current = text;
        } else {
            self.current.to_mut().push_str(&text);
        }
        self
    }

    /// Append an argument slot and open a new segment after it.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.literals.push(std::mem::take(&mut self.current));
        self.args.push(arg.into());
        self
    }

    /// Append the `%s` item marker.
    #[must_use]
    pub fn item(self) -> Self {
        self.arg(Arg::Item)
    }

    pub fn build(mut self) -> Template<'a> {
        self.literals.push(self.current);
        Template {
            literals: self.literals,
            args: self.args,
        }
    }
}
