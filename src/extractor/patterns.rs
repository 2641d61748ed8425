// src/extractor/patterns.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::normalizer::tables::POSTAL_PATTERN;

/// Keywords whose presence marks a text line as address-bearing.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "head office",
    "corporate office",
    "registered office",
    "headquarters",
    "address",
    "location",
];

lazy_static! {
    pub static ref POSTAL_TOKEN: Regex =
        Regex::new(&format!(r"\b(?:{})\b", POSTAL_PATTERN)).expect("POSTAL_TOKEN regex is valid");

    pub static ref STREET_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Place|Pl|Court|Ct|Parkway|Pkwy|Square|Sq|Suite|Ste|Floor|Fl|Highway|Hwy)\b"
    )
    .expect("STREET_SUFFIX regex is valid");

    /// Leading "Address:"-style labels, stripped from keyword lines before
    /// they become candidates.
    pub static ref LABEL_PREFIX: Regex = Regex::new(
        r"(?i)^(?:head office|corporate office|registered office|headquarters|our address|address|location)\s*[:\-]\s*"
    )
    .expect("LABEL_PREFIX regex is valid");
}

pub fn is_keyword_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ADDRESS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

pub fn has_postal_token(line: &str) -> bool {
    POSTAL_TOKEN.is_match(line)
}

pub fn has_street_suffix(line: &str) -> bool {
    STREET_SUFFIX.is_match(line)
}

pub fn strip_label(line: &str) -> String {
    LABEL_PREFIX.replace(line, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_token() {
        assert!(has_postal_token("Springfield, IL 62704"));
        assert!(has_postal_token("London SW1A 2AA"));
        assert!(!has_postal_token("no digits in sight"));
        assert!(!has_postal_token("since 1873211"));
    }

    #[test]
    fn test_street_suffix() {
        assert!(has_street_suffix("123 Main St"));
        assert!(has_street_suffix("456 Sunset Boulevard"));
        assert!(!has_street_suffix("general enquiries"));
    }

    #[test]
    fn test_keyword_lines() {
        assert!(is_keyword_line("Head Office: 123 Main St"));
        assert!(is_keyword_line("Our headquarters in Springfield"));
        assert!(!is_keyword_line("About our products"));
    }

    #[test]
    fn test_label_stripping() {
        assert_eq!(
            strip_label("Address: 123 Main St, Springfield"),
            "123 Main St, Springfield"
        );
        assert_eq!(
            strip_label("HEAD OFFICE - 9 Elm Rd"),
            "9 Elm Rd"
        );
        assert_eq!(strip_label("123 Main St"), "123 Main St");
    }
}
