//! Builder API for ergonomic Table construction.
//!
//! # Example
//!
//! ```rust
//! use vardb::model::builder::TableBuilder;
//!
//! let root = TableBuilder::new()
//!     .string("player_name", "Harry")
//!     .number("xp", 12.0)
//!     .table("reputation", |t| t
//!         .number("communist", 3.0)
//!         .number("moralist", 1.0)
//!     )
//!     .boolean("TASK.find_gun", true)
//!     .build();
//!
//! assert_eq!(root.len(), 4);
//! ```

use crate::model::{Table, Value};

/// Builder for constructing a [`Table`] in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry of any kind.
    pub fn value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.table.insert(key, value);
        self
    }

    /// Adds a string entry.
    pub fn string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.value(key, Value::Str(value.into()))
    }

    /// Adds a number entry.
    pub fn number(self, key: impl Into<String>, value: f64) -> Self {
        self.value(key, Value::Num(value))
    }

    /// Adds a boolean entry.
    pub fn boolean(self, key: impl Into<String>, value: bool) -> Self {
        self.value(key, Value::Bool(value))
    }

    /// Adds a nested table using a builder function.
    pub fn table<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(TableBuilder) -> TableBuilder,
    {
        let nested = f(TableBuilder::new()).build();
        self.value(key, Value::Table(nested))
    }

    /// Finishes the table.
    pub fn build(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_build() {
        let root = TableBuilder::new()
            .number("a", 1.0)
            .table("b", |t| t.table("c", |t| t.boolean("d", true)))
            .build();

        let d = root
            .get("b")
            .and_then(Value::as_table)
            .and_then(|b| b.get("c"))
            .and_then(Value::as_table)
            .and_then(|c| c.get("d"));
        assert_eq!(d, Some(&Value::Bool(true)));
    }

    #[test]
    fn test_repeated_key_overwrites() {
        let root = TableBuilder::new()
            .string("k", "first")
            .number("other", 0.0)
            .string("k", "second")
            .build();
        assert_eq!(root.keys().collect::<Vec<_>>(), ["k", "other"]);
        assert_eq!(root.get("k"), Some(&Value::from("second")));
    }
}
