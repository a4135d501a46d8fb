//! Value types for the variable database.
//!
//! Every value on the wire is prefixed by a one-byte type tag; [`ValueKind`]
//! is that tag and [`Value`] is the tagged payload.

use std::fmt;

use crate::limits::{TAG_BOOLEAN, TAG_NUMBER, TAG_STRING, TAG_TABLE};
use crate::model::Table;

/// Kinds of values (one per wire type tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueKind {
    Str = TAG_STRING,
    Num = TAG_NUMBER,
    Bool = TAG_BOOLEAN,
    Table = TAG_TABLE,
}

impl ValueKind {
    /// Creates a ValueKind from its wire tag.
    pub fn from_tag(tag: u8) -> Option<ValueKind> {
        match tag {
            TAG_STRING => Some(ValueKind::Str),
            TAG_NUMBER => Some(ValueKind::Num),
            TAG_BOOLEAN => Some(ValueKind::Bool),
            TAG_TABLE => Some(ValueKind::Table),
            _ => None,
        }
    }

    /// Returns the wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the name shown to users for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Str => "String",
            ValueKind::Num => "Number",
            ValueKind::Bool => "Boolean",
            ValueKind::Table => "Table",
        }
    }
}

/// A typed value stored in the variable database.
#[derive(Debug, Clone)]
pub enum Value {
    /// UTF-8 text.
    Str(String),
    /// IEEE-754 double.
    Num(f64),
    /// Boolean. Any nonzero wire byte decodes as true.
    Bool(bool),
    /// Nested table of string keys to values.
    Table(Table),
}

impl Value {
    /// Returns the kind (wire tag) of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Num(_) => ValueKind::Num,
            Value::Bool(_) => ValueKind::Bool,
            Value::Table(_) => ValueKind::Table,
        }
    }

    /// Returns the name shown to users for this value's kind.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true for every kind except tables.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Table(_))
    }
}

/// Numbers compare by bit pattern, so `-0.0 != 0.0` and a NaN equals
/// itself. That is the equality a byte-faithful round trip needs.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Num(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Table(t) => write!(f, "table({} entries)", t.len()),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
