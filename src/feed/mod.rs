//! Télérama feed decoding
//!
//! Contains the record parser, the details-block tokenizer and the text
//! helpers they rely on.

mod details;
mod encoding;
mod record;
mod split;

// Re-export public types
pub use details::DetailsBlock;
pub use encoding::decode_windows_1252;
pub use record::{
    parse_channel_list,
    parse_records,
    RawRecord,
    FIELD_SEPARATOR,
    PROGRAM_FIELD_COUNT,
    RECORD_SEPARATOR,
};
pub use split::split_outside_delimiters;
