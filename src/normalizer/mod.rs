// src/normalizer/mod.rs
pub mod tables;

use deunicode::deunicode;

use crate::models::NormalizedAddress;
use tables::{canonical_country, state_code, ABBREVIATION_RES, POSTAL_RE, REGION_POSTAL_RE};

const UNITED_STATES: &str = "UNITED STATES OF AMERICA";

/// Turns a raw candidate string into structured address fields. Pure and
/// deterministic; fields that cannot be assigned with confidence stay
/// empty, they are never guessed.
pub struct AddressNormalizer;

impl AddressNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> NormalizedAddress {
        let cleaned = clean(raw);

        let mut parts: Vec<String> = cleaned
            .split(',')
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();

        let mut address = NormalizedAddress::default();

        if let Some(last) = parts.last() {
            if let Some(country) = canonical_country(last) {
                address.country = country.to_string();
                parts.pop();
            }
        }

        // Right-most postal token wins; "IL 62704" style parts also assign
        // the region.
        for i in (0..parts.len()).rev() {
            if POSTAL_RE.is_match(&parts[i]) {
                address.postal_code = parts.remove(i);
                break;
            }
            if let Some(caps) = REGION_POSTAL_RE.captures(&parts[i]) {
                address.region = caps["region"].to_string();
                address.postal_code = caps["postal"].to_string();
                parts.remove(i);
                break;
            }
        }

        if address.region.is_empty() && parts.len() >= 3 {
            address.region = parts.pop().unwrap_or_default();
        }
        if parts.len() >= 2 {
            address.city = parts.pop().unwrap_or_default();
        }
        address.street = expand_abbreviations(&parts.join(", "));

        if address.country == UNITED_STATES {
            if let Some(code) = state_code(&address.region) {
                address.region = code.to_string();
            }
        }

        address.rebuild_formatted();
        address
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Transliterate to ASCII, collapse whitespace, strip stray punctuation at
/// the ends.
fn clean(raw: &str) -> String {
    let ascii = deunicode(raw);
    let collapsed = ascii.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.' | '-' | '|'))
        .to_string()
}

/// Applied to the street field only, so region codes ("FL", "CT") and city
/// names ("St. Louis") stay untouched.
fn expand_abbreviations(street: &str) -> String {
    let mut expanded = street.to_string();
    for (re, full) in ABBREVIATION_RES.iter() {
        expanded = re.replace_all(&expanded, *full).into_owned();
    }
    expanded
}
