//! Argument values supplied to template slots.
//!
//! # Sharing
//!
//! Primitives (`Null`, `Bool`, `Number`, `Str`) are plain data. Everything
//! else, callables and structured values alike, is carried by a [`Handle`]:
//! an `Arc` around the caller's value. Cloning a `Value` never copies the
//! underlying object, which is what lets the processor compare arguments by
//! identity and hand the same instance back in its bindings map.
//!
//! # Thread Safety
//!
//! Handles require `Send + Sync` payloads, so templates, values and results
//! can cross threads freely.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::literal::format_number;

/// Native callable stored behind a [`Handle`].
///
/// Generated source refers to these through the lookup variable; an
/// evaluator resolves the reference and calls them with evaluated arguments.
pub struct NativeFn(Box<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl NativeFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        NativeFn(Box::new(f))
    }

    /// Invoke the callable.
    #[inline]
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFn(..)")
    }
}

/// Identity of a [`Handle`]'s allocation.
///
/// Two handles have the same id exactly when they share one allocation.
/// Only meaningful while at least one of the handles is alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandleId(usize);

/// Shared reference to a non-primitive argument.
#[derive(Clone)]
pub struct Handle {
    value: Arc<dyn Any + Send + Sync>,
    /// Text used when the handle is rendered as an `each` item.
    label: Option<Arc<str>>,
}

impl Handle {
    /// Move `value` behind a new shared allocation.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Handle {
            value: Arc::new(value),
            label: None,
        }
    }

    /// Like [`Handle::new`], with a display label.
    pub fn named<T: Any + Send + Sync>(label: impl Into<Arc<str>>, value: T) -> Self {
        Handle {
            value: Arc::new(value),
            label: Some(label.into()),
        }
    }

    /// Share an existing allocation. Identity follows the `Arc`.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Handle { value, label: None }
    }

    /// Allocation identity used for deduplication.
    #[inline]
    pub fn id(&self) -> HandleId {
        HandleId(Arc::as_ptr(&self.value).cast::<()>() as usize)
    }

    /// Check whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        self.id() == other.id()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Borrow the payload as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Borrow the payload as a callable, if it is one.
    pub fn as_function(&self) -> Option<&NativeFn> {
        self.downcast_ref::<NativeFn>()
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "Handle({label} @ {:#x})", self.id().0),
            None => write!(f, "Handle({:#x})", self.id().0),
        }
    }
}

/// Runtime argument value.
#[derive(Clone, Debug)]
pub enum Value {
    /// The null literal.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value. May be NaN or infinite.
    Number(f64),
    /// String value.
    Str(Arc<str>),
    /// Callable or structured value, compared by identity.
    Ref(Handle),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create a numeric value.
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Wrap an arbitrary value in a fresh handle.
    ///
    /// # Example
    ///
    /// ```text
    /// let rates = Value::object(vec![0.5, 0.75]);
    /// ```
    #[inline]
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Value::Ref(Handle::new(value))
    }

    /// Wrap a closure as a callable value.
    ///
    /// # Example
    ///
    /// ```text
    /// let twice = Value::function(|args| args.first().cloned().unwrap_or(Value::Null));
    /// ```
    #[inline]
    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Value::Ref(Handle::new(NativeFn::new(f)))
    }

    /// Wrap a closure as a callable value with a label.
    #[inline]
    pub fn named_function(
        label: impl Into<Arc<str>>,
        f: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Value::Ref(Handle::named(label, NativeFn::new(f)))
    }
}

// Value Methods

impl Value {
    /// Check whether this is a primitive (anything but a handle).
    #[inline]
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Ref(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Ref(h) => Some(h),
            _ => None,
        }
    }

    /// Check whether two values are the same argument.
    ///
    /// Primitives compare by value, handles by allocation. Unlike `==`,
    /// NaN is the same as NaN.
    #[allow(clippy::float_cmp)]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Textual form used when a value is spliced in as an `each` item.
///
/// Strings are written raw, without quotes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Ref(h) => f.write_str(h.label().unwrap_or("[object]")),
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(f64::from(n))
                }
            }
        )*
    };
}

impl_from_number!(f32, i32, u32, i16, u16, i8, u8);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Ref(h)
    }
}

impl From<NativeFn> for Value {
    fn from(f: NativeFn) -> Self {
        Value::Ref(Handle::new(f))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
