//! Editing helpers for user-facing variable views.
//!
//! Editors show leaves as text and receive text back. These helpers turn
//! that text into a value of the same kind as the leaf it replaces, and
//! search the flattened view by path.

use tracing::debug;

use crate::error::EditError;
use crate::model::{Table, Value};
use crate::path::{flatten, get_by_path, set_by_path};

/// A flattened variable: its dotted path and leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    pub path: String,
    pub value: Value,
}

impl VariableEntry {
    /// Returns the name shown to users for the value's kind.
    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    /// Returns the value rendered for display.
    pub fn display_value(&self) -> String {
        self.value.to_string()
    }
}

/// Parses `text` as a value of the same kind as `original`.
///
/// Numbers accept anything `f64` parses (surrounding whitespace is
/// trimmed); booleans accept `true` or `false` in any case; strings take the
/// text verbatim.
pub fn parse_like(original: &Value, text: &str) -> Result<Value, EditError> {
    match original {
        Value::Str(_) => Ok(Value::Str(text.to_owned())),
        Value::Num(_) => text
            .trim()
            .parse::<f64>()
            .map(Value::Num)
            .map_err(|_| EditError::InvalidNumber {
                text: text.to_owned(),
            }),
        Value::Bool(_) => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(EditError::InvalidBoolean {
                    text: text.to_owned(),
                })
            }
        }
        Value::Table(_) => Err(EditError::NotALeaf {
            path: String::new(),
        }),
    }
}

/// Applies one text edit to the leaf at `path`, keeping its kind.
pub fn apply_text_edit(root: &mut Table, path: &str, text: &str) -> Result<(), EditError> {
    let Some(original) = get_by_path(root, path) else {
        return Err(EditError::UnknownPath {
            path: path.to_owned(),
        });
    };
    let value = parse_like(original, text).map_err(|err| with_path(err, path))?;
    set_by_path(root, path, value);
    Ok(())
}

/// Applies a batch of `(path, text)` edits, keeping each leaf's kind.
///
/// Paths are looked up in the flattened view taken before any edit is
/// applied; paths not present there are skipped. Returns the number of
/// edits applied. The first edit whose text does not parse aborts the batch;
/// edits before it stay applied.
pub fn apply_text_edits<I, P, T>(root: &mut Table, edits: I) -> Result<usize, EditError>
where
    I: IntoIterator<Item = (P, T)>,
    P: AsRef<str>,
    T: AsRef<str>,
{
    let flat = flatten(root);
    let mut applied = 0;
    for (path, text) in edits {
        let path = path.as_ref();
        let Some(original) = flat.get(path) else {
            debug!(path, "skipping edit for unknown variable");
            continue;
        };
        let value = parse_like(original, text.as_ref()).map_err(|err| with_path(err, path))?;
        set_by_path(root, path, value);
        applied += 1;
    }
    Ok(applied)
}

fn with_path(err: EditError, path: &str) -> EditError {
    match err {
        EditError::NotALeaf { .. } => EditError::NotALeaf {
            path: path.to_owned(),
        },
        other => other,
    }
}

/// Returns flattened variables whose path contains `query`.
///
/// Matching is case-insensitive; an empty query matches everything. Results
/// are sorted by path and truncated to `limit`.
pub fn search(root: &Table, query: &str, limit: usize) -> Vec<VariableEntry> {
    let needle = query.to_lowercase();
    let mut entries: Vec<VariableEntry> = flatten(root)
        .into_iter()
        .filter(|(path, _)| needle.is_empty() || path.to_lowercase().contains(&needle))
        .map(|(path, value)| VariableEntry { path, value })
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries.truncate(limit);
    entries
}
