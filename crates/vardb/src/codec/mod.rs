//! Binary encoding/decoding for the variable database.
//!
//! Every value is a one-byte type tag followed by its payload; tables nest
//! recursively. A store is one root table (or, when read, several top-level
//! fragments merged together).

pub mod database;
pub mod primitives;
pub mod value;

pub use database::{DecodeReport, decode_database, decode_database_with_report, encode_database};
pub use primitives::{Reader, Writer};
pub use value::{decode_value, encode_table, encode_value};
