// src/export/exporter.rs
use chrono::Utc;
use std::path::PathBuf;

use crate::errors::Result;
use crate::models::{NormalizedAddress, ResultRow};

const HEADERS: &[&str] = &[
    "company",
    "website",
    "street",
    "city",
    "region",
    "postal_code",
    "country",
    "formatted",
    "latitude",
    "longitude",
    "match",
    "status",
    "error",
    "source_url",
];

/// Writes the result table as a spreadsheet, one row per input company.
pub struct SpreadsheetExporter {
    output_dir: String,
}

impl SpreadsheetExporter {
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// CSV as in-memory bytes, for download responses.
    pub fn csv_bytes(&self, rows: &[ResultRow]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for row in rows {
            writer.write_record(record_fields(row))?;
        }
        Ok(writer.into_inner().map_err(|e| e.into_error())?)
    }

    pub async fn write_csv(&self, rows: &[ResultRow]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = PathBuf::from(self.generate_filename());
        tokio::fs::write(&path, self.csv_bytes(rows)?).await?;
        Ok(path)
    }

    pub fn generate_filename(&self) -> String {
        format!(
            "{}/addresses_{}.csv",
            self.output_dir,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }
}

fn record_fields(row: &ResultRow) -> Vec<String> {
    static EMPTY: NormalizedAddress = NormalizedAddress {
        street: String::new(),
        city: String::new(),
        region: String::new(),
        postal_code: String::new(),
        country: String::new(),
        formatted: String::new(),
    };

    let address = row
        .address
        .as_ref()
        .map(|info| info.normalized())
        .unwrap_or(&EMPTY);
    let (latitude, longitude) = row
        .address
        .as_ref()
        .and_then(|info| info.coordinates())
        .map(|(lat, lng)| (lat.to_string(), lng.to_string()))
        .unwrap_or_default();
    let match_status = row
        .address
        .as_ref()
        .and_then(|info| info.match_status())
        .map(|status| status.as_str().to_string())
        .unwrap_or_default();

    vec![
        row.company.name.clone(),
        row.company.website.clone(),
        address.street.clone(),
        address.city.clone(),
        address.region.clone(),
        address.postal_code.clone(),
        address.country.clone(),
        address.formatted.clone(),
        latitude,
        longitude,
        match_status,
        row.status.as_str().to_string(),
        row.error_detail.clone().unwrap_or_default(),
        row.source_url.clone().unwrap_or_default(),
    ]
}
