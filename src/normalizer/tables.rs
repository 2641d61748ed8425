// src/normalizer/tables.rs
use lazy_static::lazy_static;
use regex::Regex;

/// Street-abbreviation expansions. Matching is whole-word and
/// case-insensitive with an optional trailing period; replacements are the
/// canonical long forms.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("St", "Street"),
    ("Ave", "Avenue"),
    ("Rd", "Road"),
    ("Blvd", "Boulevard"),
    ("Dr", "Drive"),
    ("Ln", "Lane"),
    ("Pl", "Place"),
    ("Ct", "Court"),
    ("Pkwy", "Parkway"),
    ("Sq", "Square"),
    ("Ste", "Suite"),
    ("Fl", "Floor"),
    ("Hwy", "Highway"),
];

/// Recognized countries and their canonical names. Only an entire trailing
/// comma part is ever matched against this table; canonical names map to
/// themselves so re-normalizing a formatted address is stable.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("USA", "UNITED STATES OF AMERICA"),
    ("US", "UNITED STATES OF AMERICA"),
    ("UNITED STATES", "UNITED STATES OF AMERICA"),
    ("UNITED STATES OF AMERICA", "UNITED STATES OF AMERICA"),
    (
        "UK",
        "UNITED KINGDOM OF GREAT BRITAIN AND NORTHERN IRELAND",
    ),
    (
        "UNITED KINGDOM",
        "UNITED KINGDOM OF GREAT BRITAIN AND NORTHERN IRELAND",
    ),
    (
        "UNITED KINGDOM OF GREAT BRITAIN AND NORTHERN IRELAND",
        "UNITED KINGDOM OF GREAT BRITAIN AND NORTHERN IRELAND",
    ),
    ("CHINA", "CHINA"),
    ("RUSSIA", "RUSSIAN FEDERATION"),
    ("RUSSIAN FEDERATION", "RUSSIAN FEDERATION"),
    ("SOUTH KOREA", "KOREA (REPUBLIC OF)"),
    ("KOREA", "KOREA (REPUBLIC OF)"),
    ("KOREA (REPUBLIC OF)", "KOREA (REPUBLIC OF)"),
    ("CANADA", "CANADA"),
    ("GERMANY", "GERMANY"),
    ("FRANCE", "FRANCE"),
    ("INDIA", "INDIA"),
    ("JAPAN", "JAPAN"),
    ("AUSTRALIA", "AUSTRALIA"),
];

/// US state names to their two-letter codes, applied to the region field
/// when the country resolves to the United States.
pub const US_STATES: &[(&str, &str)] = &[
    ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZONA", "AZ"),
    ("ARKANSAS", "AR"),
    ("CALIFORNIA", "CA"),
    ("COLORADO", "CO"),
    ("CONNECTICUT", "CT"),
    ("DELAWARE", "DE"),
    ("FLORIDA", "FL"),
    ("GEORGIA", "GA"),
    ("HAWAII", "HI"),
    ("IDAHO", "ID"),
    ("ILLINOIS", "IL"),
    ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KANSAS", "KS"),
    ("KENTUCKY", "KY"),
    ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MARYLAND", "MD"),
    ("MASSACHUSETTS", "MA"),
    ("MICHIGAN", "MI"),
    ("MINNESOTA", "MN"),
    ("MISSISSIPPI", "MS"),
    ("MISSOURI", "MO"),
    ("MONTANA", "MT"),
    ("NEBRASKA", "NE"),
    ("NEVADA", "NV"),
    ("NEW HAMPSHIRE", "NH"),
    ("NEW JERSEY", "NJ"),
    ("NEW MEXICO", "NM"),
    ("NEW YORK", "NY"),
    ("NORTH CAROLINA", "NC"),
    ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLAHOMA", "OK"),
    ("OREGON", "OR"),
    ("PENNSYLVANIA", "PA"),
    ("RHODE ISLAND", "RI"),
    ("SOUTH CAROLINA", "SC"),
    ("SOUTH DAKOTA", "SD"),
    ("TENNESSEE", "TN"),
    ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VERMONT", "VT"),
    ("VIRGINIA", "VA"),
    ("WASHINGTON", "WA"),
    ("WEST VIRGINIA", "WV"),
    ("WISCONSIN", "WI"),
    ("WYOMING", "WY"),
];

/// Postal-code token shapes: US ZIP+4, UK, Canadian, and generic 4-6 digit
/// groups. Shared with the extractor's unanchored scanning regex.
pub const POSTAL_PATTERN: &str = r"\d{5}-\d{4}|[A-Za-z]{1,2}\d{1,2}[A-Za-z]?\s?\d[A-Za-z]{2}|[A-Za-z]\d[A-Za-z]\s?\d[A-Za-z]\d|\d{4,6}";

lazy_static! {
    /// A comma part that is exactly a postal code.
    pub static ref POSTAL_RE: Regex =
        Regex::new(&format!(r"^(?:{})$", POSTAL_PATTERN)).expect("POSTAL_RE regex is valid");

    /// A comma part of the shape "<region> <postal>", e.g. "IL 62704".
    /// Region is one to three words and must start with a letter.
    pub static ref REGION_POSTAL_RE: Regex = Regex::new(&format!(
        r"^(?P<region>[A-Za-z][A-Za-z.]*(?: [A-Za-z.]+){{0,2}})\s+(?P<postal>(?:{}))$",
        POSTAL_PATTERN
    ))
    .expect("REGION_POSTAL_RE regex is valid");

    pub static ref ABBREVIATION_RES: Vec<(Regex, &'static str)> = ABBREVIATIONS
        .iter()
        .map(|(abbr, full)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b\.?", abbr))
                .expect("abbreviation regex is valid");
            (re, *full)
        })
        .collect();
}

pub fn canonical_country(part: &str) -> Option<&'static str> {
    let upper = part.trim().to_uppercase();
    COUNTRIES
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|(_, canonical)| *canonical)
}

pub fn state_code(region: &str) -> Option<&'static str> {
    let upper = region.trim().to_uppercase();
    US_STATES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, code)| *code)
}
