//! Mapping between Télérama channel ids and XMLTV channel ids

/// Domain appended to native ids
pub const XMLTV_ID_SUFFIX: &str = ".tv.telerama.fr";

/// "192" -> "192.tv.telerama.fr"
pub fn to_xmltv_id(native_id: &str) -> String {
    format!("{}{}", native_id, XMLTV_ID_SUFFIX)
}

/// "192.tv.telerama.fr" -> "192"
pub fn to_native_id(xmltv_id: &str) -> String {
    xmltv_id.replace(XMLTV_ID_SUFFIX, "")
}
