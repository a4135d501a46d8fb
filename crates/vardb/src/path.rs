//! Dotted-path access to nested tables.
//!
//! Editors address leaves as dot-joined key paths such as
//! `"reputation.communist"`. A key that itself contains `.` flattens to a
//! path that re-nests differently on [`set_by_path`]; that ambiguity is a
//! property of the path notation and is left as is.

use crate::model::{Table, Value};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Flattens nested tables into a mapping of dotted path to leaf value.
///
/// Leaves keep the order they are reached in a depth-first walk. Empty
/// nested tables contribute no entries. If two paths collide, the later
/// one wins.
pub fn flatten(root: &Table) -> Table {
    let mut out = Table::new();
    flatten_into(root, "", &mut out);
    out
}

fn flatten_into(table: &Table, prefix: &str, out: &mut Table) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{key}")
        };
        match value {
            Value::Table(nested) => flatten_into(nested, &path, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Looks up the value at a dotted path.
pub fn get_by_path<'a>(root: &'a Table, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(PATH_SEPARATOR);
    let last = segments.next_back()?;
    let mut current = root;
    for segment in segments {
        current = current.get(segment)?.as_table()?;
    }
    current.get(last)
}

/// Stores a value at a dotted path.
///
/// Every segment but the last names a table; a missing or non-table value
/// there is replaced by a new empty table. The last segment is assigned.
pub fn set_by_path(root: &mut Table, path: &str, value: Value) {
    let mut segments = path.split(PATH_SEPARATOR);
    let Some(last) = segments.next_back() else {
        return;
    };
    let mut current = root;
    for segment in segments {
        current = current.table_entry(segment);
    }
    current.insert(last, value);
}
