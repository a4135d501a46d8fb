//! Wire constants and decoder safety limits.

/// Type tag for a length-prefixed UTF-8 string (`'S'`).
pub const TAG_STRING: u8 = b'S';

/// Type tag for a little-endian IEEE-754 double (`'N'`).
pub const TAG_NUMBER: u8 = b'N';

/// Type tag for a single-byte boolean (`'B'`).
pub const TAG_BOOLEAN: u8 = b'B';

/// Type tag for a count-prefixed table of key/value pairs (`'T'`).
pub const TAG_TABLE: u8 = b'T';

/// Reserved bytes between a table tag and its entry count.
///
/// Written as zero, ignored on read.
pub const TABLE_PADDING_LEN: usize = 4;

/// Maximum bytes in a 7-bit encoded length.
///
/// Lengths are 32-bit, so five groups are enough; the fifth byte may only
/// carry the top four bits.
pub const MAX_VARINT_BYTES: usize = 5;

/// Maximum table nesting depth accepted by the decoder and produced by the
/// encoder. The root table is depth 1.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Smallest possible encoded key/value pair: an empty string key
/// (`'S'` + one length byte) followed by a boolean (`'B'` + one byte).
pub const MIN_ENTRY_LEN: usize = 4;

/// Largest string byte length or table count the format can express.
pub const MAX_WIRE_LEN: usize = i32::MAX as usize;
