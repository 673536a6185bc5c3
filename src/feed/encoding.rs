//! Windows-1252 decoding for feed bodies
//!
//! The listings server answers in the Western European code page, not UTF-8.
//! Bytes below 0x80 and from 0xA0 upward map straight to the same Unicode
//! code point; only the 0x80-0x9F block needs a table.

/// Code points for 0x80..=0x9F. Bytes left undefined by the code page map to
/// the matching C1 control character.
const HIGH_BLOCK: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

fn decode_byte(b: u8) -> char {
    match b {
        0x80..=0x9F => HIGH_BLOCK[(b - 0x80) as usize],
        _ => char::from(b),
    }
}

/// Decode a Windows-1252 byte buffer into a UTF-8 string
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 8);
    out.extend(bytes.iter().copied().map(decode_byte));
    out
}
