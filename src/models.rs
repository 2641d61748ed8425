// src/models.rs
use serde::{Deserialize, Serialize};

use crate::errors::{EnrichmentError, FetchError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub website: String,
}

/// A span of text suspected to contain a postal address, prior to
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub raw_text: String,
    pub source_url: String,
}

/// Structured address fields. Empty string means the field could not be
/// assigned with confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub formatted: String,
}

impl NormalizedAddress {
    /// `formatted` is always the join of the present fields in this fixed
    /// order, never text copied from elsewhere.
    pub fn rebuild_formatted(&mut self) {
        let fields = [
            &self.street,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ];
        self.formatted = fields
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }

    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Ambiguous,
    NotFound,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Ambiguous => "ambiguous",
            MatchStatus::NotFound => "not_found",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedAddress {
    #[serde(flatten)]
    pub address: NormalizedAddress,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub match_status: MatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInfo {
    Enriched(EnrichedAddress),
    Normalized(NormalizedAddress),
}

impl AddressInfo {
    pub fn normalized(&self) -> &NormalizedAddress {
        match self {
            AddressInfo::Enriched(e) => &e.address,
            AddressInfo::Normalized(n) => n,
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self {
            AddressInfo::Enriched(e) => e.latitude.zip(e.longitude),
            AddressInfo::Normalized(_) => None,
        }
    }

    pub fn match_status(&self) -> Option<MatchStatus> {
        match self {
            AddressInfo::Enriched(e) => Some(e.match_status),
            AddressInfo::Normalized(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Success,
    NoAddressFound,
    FetchError,
    EnrichmentError,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Success => "success",
            RowStatus::NoAddressFound => "no_address_found",
            RowStatus::FetchError => "fetch_error",
            RowStatus::EnrichmentError => "enrichment_error",
        }
    }
}

/// One output row per input company. Per-company failures land here and
/// never abort the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub company: CompanyRecord,
    pub address: Option<AddressInfo>,
    pub source_url: Option<String>,
    pub status: RowStatus,
    pub error_detail: Option<String>,
}

impl ResultRow {
    pub fn success(company: CompanyRecord, address: AddressInfo, source_url: String) -> Self {
        Self {
            company,
            address: Some(address),
            source_url: Some(source_url),
            status: RowStatus::Success,
            error_detail: None,
        }
    }

    pub fn no_address_found(company: CompanyRecord) -> Self {
        Self {
            company,
            address: None,
            source_url: None,
            status: RowStatus::NoAddressFound,
            error_detail: None,
        }
    }

    pub fn fetch_error(company: CompanyRecord, err: &FetchError) -> Self {
        Self {
            company,
            address: None,
            source_url: None,
            status: RowStatus::FetchError,
            error_detail: Some(format!("{}: {}", err.kind(), err)),
        }
    }

    pub fn enrichment_error(
        company: CompanyRecord,
        address: NormalizedAddress,
        source_url: String,
        err: &EnrichmentError,
    ) -> Self {
        Self {
            company,
            address: Some(AddressInfo::Normalized(address)),
            source_url: Some(source_url),
            status: RowStatus::EnrichmentError,
            error_detail: Some(format!("{}: {}", err.kind(), err)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub no_address: usize,
    pub fetch_errors: usize,
    pub enrichment_errors: usize,
    pub duration_ms: u64,
}

impl BatchSummary {
    pub fn from_rows(rows: &[ResultRow], duration_ms: u64) -> Self {
        let count = |status: RowStatus| rows.iter().filter(|r| r.status == status).count();
        Self {
            total: rows.len(),
            succeeded: count(RowStatus::Success),
            no_address: count(RowStatus::NoAddressFound),
            fetch_errors: count(RowStatus::FetchError),
            enrichment_errors: count(RowStatus::EnrichmentError),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_skips_absent_fields() {
        let mut address = NormalizedAddress {
            street: "123 Main Street".to_string(),
            city: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62704".to_string(),
            country: String::new(),
            formatted: String::new(),
        };
        address.rebuild_formatted();
        assert_eq!(address.formatted, "123 Main Street, Springfield, IL, 62704");
    }

    #[test]
    fn formatted_of_empty_address_is_empty() {
        let mut address = NormalizedAddress::default();
        address.rebuild_formatted();
        assert!(address.formatted.is_empty());
        assert!(address.is_empty());
    }

    #[test]
    fn summary_counts_by_status() {
        let company = CompanyRecord {
            name: "Example Corp".to_string(),
            website: "https://example.com".to_string(),
        };
        let rows = vec![
            ResultRow::no_address_found(company.clone()),
            ResultRow::fetch_error(company, &FetchError::Timeout),
        ];
        let summary = BatchSummary::from_rows(&rows, 42);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.no_address, 1);
        assert_eq!(summary.fetch_errors, 1);
        assert_eq!(summary.succeeded, 0);
    }
}
