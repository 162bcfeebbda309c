use serde::Deserialize;

/// Executor options
///
/// Deserializable so a host can load it from whatever format it already
/// uses; every missing field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolve literal lexemes to typed values (`30` → integer, `'Bob'` → `Bob`)
    /// on INSERT and UPDATE. Off by default: values are stored as their lexeme text.
    pub coerce_literals: bool,
}

impl Config {
    pub fn with_coerce_literals(mut self, coerce: bool) -> Self {
        self.coerce_literals = coerce;
        self
    }
}
