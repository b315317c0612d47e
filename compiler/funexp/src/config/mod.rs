//! Processor configuration.

/// Name of the lookup variable in generated source.
pub const DEFAULT_LOOKUP_VAR: &str = "ctx";

/// Prefix of registered entry keys.
pub const DEFAULT_KEY_PREFIX: &str = "$e_";

/// Whether primitives are inlined by default.
pub const DEFAULT_INLINE_PRIMITIVES: bool = true;

/// Settings fixed for the lifetime of a [`Processor`](crate::Processor).
///
/// With the `serde` feature enabled this can be read from configuration
/// files; missing fields take their defaults.
///
/// ```text
/// { "lookupVar": "methods", "keyPrefix": "$m_" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ProcessorConfig {
    /// Variable that prefixes every registered argument access.
    pub lookup_var: String,
    /// Prefix joined with the slot index to form each entry key.
    pub key_prefix: String,
    /// When `true`, strings, non-NaN numbers, booleans and null are written
    /// as literals instead of being registered.
    pub inline_primitives: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            lookup_var: DEFAULT_LOOKUP_VAR.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            inline_primitives: DEFAULT_INLINE_PRIMITIVES,
        }
    }
}

impl ProcessorConfig {
    /// Set the lookup variable name.
    #[must_use]
    pub fn with_lookup_var(mut self, lookup_var: impl Into<String>) -> Self {
        self.lookup_var = lookup_var.into();
        self
    }

    /// Set the entry key prefix.
    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Enable or disable primitive inlining.
    #[must_use]
    pub fn with_inline_primitives(mut self, inline_primitives: bool) -> Self {
        self.inline_primitives = inline_primitives;
        self
    }

    /// Entry key for the argument in slot `slot`.
    #[inline]
    pub fn entry_key(&self, slot: usize) -> String {
        format!("{}{slot}", self.key_prefix)
    }
}
