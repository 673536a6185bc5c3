//! Parser for the delimiter-separated Télérama feed
//!
//! A feed body is a list of records terminated by `:$$$:`; each record is a
//! positional list of fields separated by `$$$`.

use crate::error::{GrabError, Result};
use crate::guide::channel_id::to_xmltv_id;
use crate::models::Channel;

/// Record terminator
pub const RECORD_SEPARATOR: &str = ":$$$:";
/// Field separator within a record
pub const FIELD_SEPARATOR: &str = "$$$";
/// Number of fields a program record must carry
pub const PROGRAM_FIELD_COUNT: usize = 13;
/// Length of the trailer appended to the channel list body
const CHANNEL_LIST_TRAILER_LEN: usize = 5;

/// One program entry of the feed, fields trimmed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub channel_id: String,
    pub channel_name: String,
    pub title: String,
    /// Time of day, "HH:MM:SS"
    pub start_time: String,
    pub stop_time: String,
    pub category: String,
    pub synopsis: String,
    /// Free-text `Label : value` lines, see [`crate::feed::DetailsBlock`]
    pub details: String,
    /// Numeric content rating, "0" when unrated
    pub rating: String,
    /// '0' to '3'
    pub star_rating: String,
    pub review: String,
    /// Broadcast date, "DD/MM/YYYY"
    pub date: String,
}

impl RawRecord {
    /// Build a record from its positional fields
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < PROGRAM_FIELD_COUNT {
            return Err(GrabError::MalformedRecord {
                fields: fields.len(),
                expected: PROGRAM_FIELD_COUNT,
            });
        }

        let field = |i: usize| fields[i].trim().to_string();

        Ok(RawRecord {
            channel_id: field(0),
            channel_name: field(1),
            title: field(2),
            start_time: field(3),
            stop_time: field(4),
            category: field(5),
            synopsis: field(6),
            details: field(7),
            rating: field(8),
            // field 9 is not used by the feed
            star_rating: field(10),
            review: field(11),
            date: field(12),
        })
    }
}

/// Split a body on the record terminator, dropping what follows the last one
fn split_records(content: &str) -> Vec<&str> {
    let mut records: Vec<&str> = content.split(RECORD_SEPARATOR).collect();
    records.pop();
    records
}

/// Parse a program listing body into records
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>> {
    split_records(content)
        .into_iter()
        .map(|record| {
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            RawRecord::from_fields(&fields)
        })
        .collect()
}

/// Parse the channel list body
///
/// Records that are not exactly `id$$$name` with a non-empty name are
/// skipped. Duplicate ids keep their first entry.
pub fn parse_channel_list(content: &str) -> Vec<Channel> {
    let cut = content
        .char_indices()
        .rev()
        .nth(CHANNEL_LIST_TRAILER_LEN - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let content = &content[..cut];

    let mut channels: Vec<Channel> = Vec::new();
    for record in split_records(content) {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        if fields.len() != 2 || fields[1].is_empty() {
            continue;
        }

        let id = to_xmltv_id(fields[0]);
        if channels.iter().any(|c| c.id == id) {
            continue;
        }
        channels.push(Channel {
            id,
            display_name: fields[1].to_string(),
        });
    }

    channels
}
