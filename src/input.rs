// src/input.rs
use url::Url;

use crate::errors::ValidationError;
use crate::models::CompanyRecord;

/// Boundary validation for single-company requests. Inside a batch a bad
/// website becomes that row's fetch error instead, so sibling rows still
/// process.
pub fn validate_company(company: &CompanyRecord) -> Result<(), ValidationError> {
    if company.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let website = company.website.trim();
    if website.is_empty() {
        return Err(ValidationError::MissingField("website"));
    }
    match Url::parse(website) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::MalformedUrl(website.to_string())),
    }
}

/// Parses an uploaded company roster. Accepts `name`/`website` headers in
/// any casing, plus the legacy "COMPANY NAME"/"OFFICIAL WEBSITE" spellings.
pub fn parse_roster_csv(data: &[u8]) -> Result<Vec<CompanyRecord>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| ValidationError::InvalidRoster(e.to_string()))?
        .clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };

    let name_idx = find(&["name", "company name"]).ok_or_else(|| {
        ValidationError::InvalidRoster("missing required column: name".to_string())
    })?;
    let website_idx = find(&["website", "official website"]).ok_or_else(|| {
        ValidationError::InvalidRoster("missing required column: website".to_string())
    })?;

    let mut companies = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ValidationError::InvalidRoster(e.to_string()))?;
        let name = record.get(name_idx).unwrap_or("").to_string();
        let website = record.get(website_idx).unwrap_or("").to_string();
        if name.is_empty() && website.is_empty() {
            continue;
        }
        companies.push(CompanyRecord { name, website });
    }

    if companies.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, website: &str) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            website: website.to_string(),
        }
    }

    #[test]
    fn test_validate_company() {
        assert!(validate_company(&company("Acme", "https://acme.com")).is_ok());
        assert!(matches!(
            validate_company(&company("", "https://acme.com")),
            Err(ValidationError::MissingField("name"))
        ));
        assert!(matches!(
            validate_company(&company("Acme", "")),
            Err(ValidationError::MissingField("website"))
        ));
        assert!(matches!(
            validate_company(&company("Acme", "acme dot com")),
            Err(ValidationError::MalformedUrl(_))
        ));
        assert!(matches!(
            validate_company(&company("Acme", "ftp://acme.com")),
            Err(ValidationError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_parse_roster() {
        let csv = "name,website\nAcme,https://acme.com\nGlobex,https://globex.com\n";
        let companies = parse_roster_csv(csv.as_bytes()).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].name, "Acme");
        assert_eq!(companies[1].website, "https://globex.com");
    }

    #[test]
    fn test_parse_roster_legacy_headers() {
        let csv = "COMPANY NAME,OFFICIAL WEBSITE\nAcme,https://acme.com\n";
        let companies = parse_roster_csv(csv.as_bytes()).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Acme");
    }

    #[test]
    fn test_parse_roster_missing_column() {
        let csv = "name,homepage\nAcme,https://acme.com\n";
        assert!(matches!(
            parse_roster_csv(csv.as_bytes()),
            Err(ValidationError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_parse_roster_with_no_rows_is_empty_batch() {
        let csv = "name,website\n";
        assert!(matches!(
            parse_roster_csv(csv.as_bytes()),
            Err(ValidationError::EmptyBatch)
        ));
    }
}
