//! Whole-store encoding/decoding.
//!
//! A store is normally one root table spanning the file. Captured saves may
//! instead hold several top-level fragments separated by stray bytes; the
//! decoder merges every table fragment into one namespace and skips forward
//! one byte at a time past anything it cannot read.
//!
//! Recovery is best-effort: a skip can land inside a real value and resume on
//! bytes that happen to parse. [`DecodeReport`] says whether any recovery
//! happened so callers can warn about it.

use tracing::{debug, warn};

use crate::codec::primitives::{Reader, Writer};
use crate::codec::value::{decode_value, encode_table};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Table, Value};

// =============================================================================
// DECODING
// =============================================================================

/// What the top-level scan did while decoding a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Table fragments merged into the result.
    pub tables_merged: usize,
    /// Non-table top-level values that were dropped.
    pub fragments_discarded: usize,
    /// Zero bytes skipped as padding between fragments.
    pub padding_skipped: usize,
    /// Nonzero bytes skipped while resynchronizing after a failed read.
    pub junk_skipped: usize,
}

impl DecodeReport {
    /// Returns true if the input was exactly one table with nothing skipped.
    pub fn is_clean(&self) -> bool {
        self.tables_merged == 1
            && self.fragments_discarded == 0
            && self.padding_skipped == 0
            && self.junk_skipped == 0
    }

    /// Returns true if bytes had to be skipped to find fragment starts.
    pub fn recovered(&self) -> bool {
        self.padding_skipped + self.junk_skipped > 0
    }
}

/// Decodes a whole store into its root table.
///
/// See [`decode_database_with_report`] for how irregular files are handled.
pub fn decode_database(input: &[u8]) -> Result<Table, DecodeError> {
    decode_database_with_report(input).map(|(root, _)| root)
}

/// Decodes a whole store, also reporting what the top-level scan did.
///
/// Top-level values are read until the input is consumed:
/// - tables are merged into the result, later keys overwriting earlier ones;
/// - any other value is dropped;
/// - a read that fails on a malformed byte restarts one byte past where it
///   began.
///
/// The scan stops when a read runs off the end of the input, or when no byte
/// is left to restart from. At that point the merged result is returned if
/// any table was merged, otherwise the error is. A truncated root table is
/// therefore an error rather than a resync into its nested tables.
pub fn decode_database_with_report(input: &[u8]) -> Result<(Table, DecodeReport), DecodeError> {
    let mut reader = Reader::new(input);
    let mut root = Table::new();
    let mut report = DecodeReport::default();

    while !reader.is_empty() {
        let start = reader.position();
        match decode_value(&mut reader) {
            Ok(Value::Table(table)) => {
                root.merge(table);
                report.tables_merged += 1;
            }
            Ok(other) => {
                debug!(offset = start, kind = other.type_name(), "discarding top-level non-table fragment");
                report.fragments_discarded += 1;
            }
            Err(err) => {
                let next = start + 1;
                if err.is_end_of_stream() || next >= reader.len() {
                    if report.tables_merged > 0 {
                        debug!(offset = start, error = %err, "ignoring unreadable trailing bytes");
                        break;
                    }
                    return Err(err);
                }

                let skipped = reader.byte_at(start).unwrap_or_default();
                if skipped == 0 {
                    report.padding_skipped += 1;
                } else {
                    report.junk_skipped += 1;
                }
                debug!(offset = start, byte = skipped, error = %err, "resyncing one byte forward");
                reader.seek(next);
            }
        }
    }

    if !report.is_clean() && report.tables_merged > 0 {
        warn!(
            tables = report.tables_merged,
            discarded = report.fragments_discarded,
            padding = report.padding_skipped,
            junk = report.junk_skipped,
            "variable store was irregular; loaded with best-effort recovery"
        );
    }

    Ok((root, report))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a whole store as a single root table.
pub fn encode_database(root: &Table) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(estimate_size(root));
    encode_table(&mut writer, root)?;
    Ok(writer.into_bytes())
}

/// Rough encoded size, used to size the output buffer once.
fn estimate_size(table: &Table) -> usize {
    let mut size = 9;
    for (key, value) in table {
        size += 2 + key.len();
        size += match value {
            Value::Str(s) => 2 + s.len(),
            Value::Num(_) => 9,
            Value::Bool(_) => 2,
            Value::Table(t) => estimate_size(t),
        };
    }
    size
}
