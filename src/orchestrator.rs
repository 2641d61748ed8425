// src/orchestrator.rs
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::enricher::{Geocoder, MapsGeocoder};
use crate::errors::{EnrichmentError, FetchError};
use crate::extractor::AddressExtractor;
use crate::fetcher::{PageFetcher, FALLBACK_PATHS};
use crate::models::{AddressInfo, Candidate, CompanyRecord, NormalizedAddress, ResultRow};
use crate::normalizer::AddressNormalizer;

#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    pub enrich: bool,
    pub scan_subpages: bool,
}

/// Runs each company through fetch, extract, normalize and enrich, and
/// collects one row per input in input order. Failures stay on their row
/// and never abort the batch.
pub struct AddressPipeline {
    fetcher: PageFetcher,
    extractor: AddressExtractor,
    normalizer: AddressNormalizer,
    geocoder: Option<Box<dyn Geocoder>>,
    delay_ms: u64,
    scan_subpages: bool,
}

impl AddressPipeline {
    pub fn from_config(config: &Config) -> Self {
        let geocoder: Option<Box<dyn Geocoder>> = if config.geocoding.enabled {
            Some(Box::new(MapsGeocoder::new(config.geocoding.clone())))
        } else {
            None
        };

        Self {
            fetcher: PageFetcher::new(&config.fetch),
            extractor: AddressExtractor::new(),
            normalizer: AddressNormalizer::new(),
            geocoder,
            delay_ms: config.fetch.delay_ms,
            scan_subpages: config.fetch.scan_subpages,
        }
    }

    pub fn default_options(&self) -> ProcessOptions {
        ProcessOptions {
            enrich: true,
            scan_subpages: self.scan_subpages,
        }
    }

    pub async fn process_company(&self, company: &CompanyRecord) -> ResultRow {
        self.process_company_with(company, self.default_options())
            .await
    }

    /// States per company: pending -> fetched -> extracted -> normalized ->
    /// (enriched) -> done, short-circuiting to a terminal row at any step.
    pub async fn process_company_with(
        &self,
        company: &CompanyRecord,
        options: ProcessOptions,
    ) -> ResultRow {
        let url = match parse_website(&company.website) {
            Ok(url) => url,
            Err(err) => {
                warn!("Skipping {}: {}", company.name, err);
                return ResultRow::fetch_error(company.clone(), &err);
            }
        };

        let html = match self.fetcher.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(err) => {
                warn!("Fetch failed for {}: {}", url, err);
                return ResultRow::fetch_error(company.clone(), &err);
            }
        };

        let mut candidates = self.extractor.extract(&html, url.as_str());
        if candidates.is_empty() && options.scan_subpages {
            candidates = self.scan_fallback_pages(&url).await;
        }

        let Some(candidate) = candidates.into_iter().next() else {
            info!("No address found on {}", url);
            return ResultRow::no_address_found(company.clone());
        };

        let address = self.normalizer.normalize(&candidate.raw_text);
        self.finish_row(company, candidate, address, options).await
    }

    pub async fn process_batch(&self, companies: &[CompanyRecord]) -> Vec<ResultRow> {
        self.process_batch_with(companies, self.default_options())
            .await
    }

    pub async fn process_batch_with(
        &self,
        companies: &[CompanyRecord],
        options: ProcessOptions,
    ) -> Vec<ResultRow> {
        let start = Instant::now();
        info!("🚀 Processing batch of {} companies", companies.len());

        let mut rows = Vec::with_capacity(companies.len());
        for (i, company) in companies.iter().enumerate() {
            info!(
                "Processing {}/{}: {}",
                i + 1,
                companies.len(),
                company.name
            );
            rows.push(self.process_company_with(company, options).await);

            if i < companies.len() - 1 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
        }

        info!(
            "🏁 Batch complete: {}/{} with an address in {}ms",
            rows.iter().filter(|r| r.address.is_some()).count(),
            companies.len(),
            start.elapsed().as_millis()
        );
        rows
    }

    /// The orchestrator-level retry policy: guessed contact pages, first
    /// page with a candidate wins. Sub-page fetch failures only get logged,
    /// the root page already answered.
    async fn scan_fallback_pages(&self, base: &Url) -> Vec<Candidate> {
        for path in FALLBACK_PATHS {
            let Ok(page) = base.join(path) else {
                continue;
            };
            match self.fetcher.fetch(page.as_str()).await {
                Ok(html) => {
                    let candidates = self.extractor.extract(&html, page.as_str());
                    if !candidates.is_empty() {
                        debug!("Fallback page {} yielded candidates", page);
                        return candidates;
                    }
                }
                Err(err) => debug!("Fallback page {} failed: {}", page, err),
            }
        }
        Vec::new()
    }

    async fn finish_row(
        &self,
        company: &CompanyRecord,
        candidate: Candidate,
        address: NormalizedAddress,
        options: ProcessOptions,
    ) -> ResultRow {
        let enrichment = match (&self.geocoder, options.enrich) {
            (Some(geocoder), true) => {
                let query = if address.is_empty() {
                    candidate.raw_text.as_str()
                } else {
                    address.formatted.as_str()
                };
                Some(geocoder.enrich(&address, query).await)
            }
            _ => None,
        };
        assemble_row(company, candidate.source_url, address, enrichment)
    }
}

fn parse_website(website: &str) -> Result<Url, FetchError> {
    let website = website.trim();
    if website.is_empty() {
        return Err(FetchError::InvalidUrl("no website given".to_string()));
    }
    match Url::parse(website) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(FetchError::InvalidUrl(website.to_string())),
    }
}

/// A geocoder "no match" keeps the row a success; only provider-level
/// failures downgrade it, and even then the normalized address survives.
fn assemble_row(
    company: &CompanyRecord,
    source_url: String,
    address: NormalizedAddress,
    enrichment: Option<Result<crate::models::EnrichedAddress, EnrichmentError>>,
) -> ResultRow {
    match enrichment {
        Some(Ok(enriched)) => ResultRow::success(
            company.clone(),
            AddressInfo::Enriched(enriched),
            source_url,
        ),
        Some(Err(err)) => {
            warn!("Enrichment failed for {}: {}", company.name, err);
            ResultRow::enrichment_error(company.clone(), address, source_url, &err)
        }
        None => ResultRow::success(
            company.clone(),
            AddressInfo::Normalized(address),
            source_url,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrichedAddress, MatchStatus, RowStatus};
    use crate::normalizer::AddressNormalizer;

    fn pipeline() -> AddressPipeline {
        AddressPipeline::from_config(&Config::default())
    }

    fn company(name: &str, website: &str) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            website: website.to_string(),
        }
    }

    fn normalized() -> NormalizedAddress {
        AddressNormalizer::new().normalize("123 Main St, Springfield, IL 62704")
    }

    #[tokio::test]
    async fn test_invalid_url_yields_fetch_error_row() {
        let row = pipeline()
            .process_company(&company("Acme", "not a url"))
            .await;
        assert_eq!(row.status, RowStatus::FetchError);
        assert!(row.address.is_none());
        assert!(row.error_detail.is_some());
    }

    #[tokio::test]
    async fn test_missing_website_yields_fetch_error_row() {
        let row = pipeline().process_company(&company("Acme", "  ")).await;
        assert_eq!(row.status, RowStatus::FetchError);
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order_and_length() {
        let companies = vec![
            company("First", "not a url"),
            company("Second", "ftp://example.com"),
            company("Third", ""),
        ];
        let rows = pipeline().process_batch(&companies).await;

        assert_eq!(rows.len(), 3);
        let names: Vec<&str> = rows.iter().map(|r| r.company.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert!(rows.iter().all(|r| r.status == RowStatus::FetchError));
    }

    #[test]
    fn test_not_found_enrichment_keeps_row_successful() {
        let address = normalized();
        let enriched = EnrichedAddress {
            address: address.clone(),
            latitude: None,
            longitude: None,
            match_status: MatchStatus::NotFound,
        };
        let row = assemble_row(
            &company("Acme", "https://example.com"),
            "https://example.com".to_string(),
            address,
            Some(Ok(enriched)),
        );

        assert_eq!(row.status, RowStatus::Success);
        let info = row.address.unwrap();
        assert_eq!(info.match_status(), Some(MatchStatus::NotFound));
        assert!(info.coordinates().is_none());
    }

    #[test]
    fn test_enrichment_failure_keeps_normalized_address() {
        let address = normalized();
        let row = assemble_row(
            &company("Acme", "https://example.com"),
            "https://example.com".to_string(),
            address.clone(),
            Some(Err(EnrichmentError::QuotaExceeded)),
        );

        assert_eq!(row.status, RowStatus::EnrichmentError);
        assert_eq!(row.address.unwrap().normalized(), &address);
        assert!(row.error_detail.unwrap().contains("quota"));
    }

    #[test]
    fn test_no_enrichment_is_plain_success() {
        let address = normalized();
        let row = assemble_row(
            &company("Acme", "https://example.com"),
            "https://example.com".to_string(),
            address.clone(),
            None,
        );

        assert_eq!(row.status, RowStatus::Success);
        assert_eq!(row.address.unwrap().normalized(), &address);
    }
}
