//! Tokenizer for the free-text "details" field of a feed record
//!
//! The details field holds one fact per line. Most lines are `Label : value`
//! pairs ("Réalisateur : Jean Renoir"), the rest are bare flags ("HD",
//! "Rediffusion", "En 16:9"). The block is scanned once; lookups afterwards
//! are map hits or prefix checks over the kept lines.

use std::collections::HashMap;

/// Separator between a label and its value
const LABEL_SEPARATOR: &str = " :";

/// Parsed details block
#[derive(Debug, Clone, Default)]
pub struct DetailsBlock {
    values: HashMap<String, String>,
    lines: Vec<String>,
}

impl DetailsBlock {
    pub fn parse(text: &str) -> Self {
        let mut block = DetailsBlock::default();

        for line in text.split('\n') {
            let line = line.trim_end_matches('\r');

            if let Some(pos) = line.find(LABEL_SEPARATOR) {
                let label = &line[..pos];
                let value = line[pos + LABEL_SEPARATOR.len()..].trim();
                // First occurrence wins; a label with nothing after it is not a match
                if !label.is_empty() && !value.is_empty() && !block.values.contains_key(label) {
                    block.values.insert(label.to_string(), value.to_string());
                }
            }

            block.lines.push(line.to_string());
        }

        block
    }

    /// Value of the first `label : value` line
    pub fn value(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    /// True if some line is exactly `text`
    pub fn has_line(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l == text)
    }

    /// True if some line starts with `prefix`
    pub fn has_line_prefix(&self, prefix: &str) -> bool {
        self.lines.iter().any(|l| l.starts_with(prefix))
    }

    /// The prefix matched by the earliest line starting with any of `prefixes`
    pub fn first_line_prefix(&self, prefixes: &[&'static str]) -> Option<&'static str> {
        self.lines
            .iter()
            .find_map(|line| prefixes.iter().copied().find(|p| line.starts_with(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Réalisateur : Jean Renoir\r\n\
Acteurs : Jean Gabin (Maréchal), Pierre Fresnay (Boeldieu)\r\n\
Année : 1937\r\n\
En 4:3\r\n\
Rediffusion\r\n\
HD";

    #[test]
    fn test_labelled_values() {
        let block = DetailsBlock::parse(SAMPLE);
        assert_eq!(block.value("Réalisateur"), Some("Jean Renoir"));
        assert_eq!(block.value("Année"), Some("1937"));
        assert_eq!(block.value("Acteurs"), Some("Jean Gabin (Maréchal), Pierre Fresnay (Boeldieu)"));
        assert_eq!(block.value("Musique"), None);
    }

    #[test]
    fn test_labels_are_accent_and_case_sensitive() {
        let block = DetailsBlock::parse("Annee : 1999\nacteurs : Bob");
        assert_eq!(block.value("Année"), None);
        assert_eq!(block.value("Acteurs"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let block = DetailsBlock::parse("Genre : Drame\nGenre : Comédie");
        assert_eq!(block.value("Genre"), Some("Drame"));
    }

    #[test]
    fn test_empty_value_is_ignored() {
        let block = DetailsBlock::parse("Sous-titre :   \nSous-titre : Le retour");
        assert_eq!(block.value("Sous-titre"), Some("Le retour"));
    }

    #[test]
    fn test_flags() {
        let block = DetailsBlock::parse(SAMPLE);
        assert!(block.has_line("HD"));
        assert!(block.has_line_prefix("En 4:3"));
        assert!(block.has_line_prefix("Rediffusion"));
        assert!(!block.has_line_prefix("VOST"));
    }

    #[test]
    fn test_hd_must_be_whole_line() {
        let block = DetailsBlock::parse("HD ready\nEn HD");
        assert!(!block.has_line("HD"));
    }

    #[test]
    fn test_first_line_prefix_picks_earliest_line() {
        let block = DetailsBlock::parse("Première diffusion\nInédit");
        assert_eq!(
            block.first_line_prefix(&["Inédit", "Première diffusion"]),
            Some("Première diffusion")
        );
        assert_eq!(block.first_line_prefix(&["VOST"]), None);
    }
}
