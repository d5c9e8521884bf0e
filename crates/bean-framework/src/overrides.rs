//! # Literal Overrides
//!
//! Literal directives are written into the descriptor table at compile time.
//! [`LiteralOverrides`] lets configuration supplied at startup replace them per
//! bean and field without touching the record's code. The type is a plain serde
//! map, so it can be read from any format the application already uses:
//!
//! ```json
//! { "database": { "url": "postgres://db.internal/app", "pool_size": "32" } }
//! ```
//!
//! Overridden values go through the same parsing as descriptor literals: an
//! unparsable override is logged and leaves the field at its zero value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw literal values keyed by bean name, then field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiteralOverrides {
    beans: HashMap<String, HashMap<String, String>>,
}

impl LiteralOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, replacing any previous value for the same field.
    pub fn with(mut self, bean: impl Into<String>, field: impl Into<String>, raw: impl Into<String>) -> Self {
        self.set(bean, field, raw);
        self
    }

    pub fn set(&mut self, bean: impl Into<String>, field: impl Into<String>, raw: impl Into<String>) {
        self.beans
            .entry(bean.into())
            .or_default()
            .insert(field.into(), raw.into());
    }

    pub fn get(&self, bean: &str, field: &str) -> Option<&str> {
        self.beans
            .get(bean)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Number of overridden fields across all beans.
    pub fn len(&self) -> usize {
        self.beans.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
