//! Data model types for the variable database.
//!
//! This module contains the in-memory representation shared by the decoder
//! and the encoder:
//! - Values (string / number / boolean / table)
//! - Tables (insertion-ordered string-keyed mappings)
//! - Builders (ergonomic construction)
//! - Fingerprints (digests of encoded stores)

pub mod builder;
pub mod fingerprint;
pub mod table;
pub mod value;

pub use builder::TableBuilder;
pub use fingerprint::Fingerprint;
pub use table::Table;
pub use value::{Value, ValueKind};
