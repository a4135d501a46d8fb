//! vardb: codec for the binary runtime variable database found in game saves.
//!
//! The variable database (`*.ntwtf.lua` inside a save folder) holds the
//! dialogue runtime's variables: on the order of ten thousand string, number
//! and boolean leaves grouped into nested tables. This crate decodes it into
//! an ordered in-memory tree, lets editors address leaves by dotted path, and
//! encodes the tree back into bytes the game accepts.
//!
//! # Quick Start
//!
//! ```rust
//! use vardb::{decode_database, encode_database, flatten, set_by_path, TableBuilder, Value};
//!
//! let root = TableBuilder::new()
//!     .table("reputation", |t| t.number("communist", 3.0))
//!     .boolean("TASK.find_your_gun", false)
//!     .build();
//!
//! // Encode to binary
//! let bytes = encode_database(&root).unwrap();
//!
//! // Decode, edit by path, and encode again
//! let mut decoded = decode_database(&bytes).unwrap();
//! assert_eq!(decoded, root);
//!
//! set_by_path(&mut decoded, "reputation.communist", Value::Num(5.0));
//! assert_eq!(flatten(&decoded).get("reputation.communist"), Some(&Value::Num(5.0)));
//!
//! let saved = encode_database(&decoded).unwrap();
//! assert_eq!(decode_database(&saved).unwrap(), decoded);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Value, Table, builders, fingerprints)
//! - [`codec`]: Binary encoding/decoding, including multi-fragment recovery
//! - [`path`]: Dotted-path flatten/get/set
//! - [`edit`]: Type-preserving text edits and variable search
//! - [`store`]: Whole-file load and all-or-nothing save
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoder safety limits
//!
//! # Wire Format
//!
//! Every value is a one-byte tag followed by its payload:
//! - `S`: 7-bit encoded byte length + UTF-8 bytes
//! - `N`: little-endian IEEE-754 double
//! - `B`: one byte, nonzero = true
//! - `T`: 4 reserved bytes + little-endian i32 count + count key/value pairs
//!
//! A store is one root table. When reading, several concatenated top-level
//! fragments are merged and unreadable bytes between them are skipped; see
//! [`codec::database`].

pub mod codec;
pub mod edit;
pub mod error;
pub mod limits;
pub mod model;
pub mod path;
pub mod store;

// Re-export commonly used types at crate root
pub use codec::{DecodeReport, decode_database, decode_database_with_report, encode_database};
pub use edit::{VariableEntry, apply_text_edit, apply_text_edits, parse_like, search};
pub use error::{DecodeError, EditError, EncodeError, ErrorCode, StoreError};
pub use model::{Fingerprint, Table, TableBuilder, Value, ValueKind};
pub use path::{PATH_SEPARATOR, flatten, get_by_path, set_by_path};
pub use store::VariableStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
