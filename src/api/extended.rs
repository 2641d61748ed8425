// src/api/extended.rs
use rocket::serde::json::Json;
use rocket::{post, State};
use serde::Deserialize;
use std::time::Instant;

use crate::api::process::{BatchOutcome, CompanyRequest};
use crate::api::{bad_request, ApiResponse, ApiResult};
use crate::errors::ValidationError;
use crate::input::validate_company;
use crate::models::{BatchSummary, CompanyRecord};
use crate::orchestrator::ProcessOptions;
use crate::server::ServerState;

/// Explicitly tagged request shapes, validated at the boundary.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ExtendedTarget {
    SingleCompany(CompanyRequest),
    CompanyList(Vec<CompanyRequest>),
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtendedOptions {
    pub enrich: Option<bool>,
    pub scan_subpages: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ExtendedRequest {
    #[serde(flatten)]
    pub target: ExtendedTarget,
    #[serde(default)]
    pub options: ExtendedOptions,
}

/// Processing with per-call heuristics toggles layered over the configured
/// defaults.
#[post("/process-extended", format = "json", data = "<request>")]
pub async fn process_extended(
    state: &State<ServerState>,
    request: Json<ExtendedRequest>,
) -> ApiResult<BatchOutcome> {
    let request = request.into_inner();

    let defaults = state.pipeline.default_options();
    let options = ProcessOptions {
        enrich: request.options.enrich.unwrap_or(defaults.enrich),
        scan_subpages: request.options.scan_subpages.unwrap_or(defaults.scan_subpages),
    };

    let companies: Vec<CompanyRecord> = match request.target {
        ExtendedTarget::SingleCompany(company) => {
            let company: CompanyRecord = company.into();
            validate_company(&company).map_err(|e| bad_request(&e))?;
            vec![company]
        }
        ExtendedTarget::CompanyList(companies) => {
            if companies.is_empty() {
                return Err(bad_request(&ValidationError::EmptyBatch));
            }
            companies.into_iter().map(CompanyRecord::from).collect()
        }
    };

    let start = Instant::now();
    let rows = state.pipeline.process_batch_with(&companies, options).await;
    let summary = BatchSummary::from_rows(&rows, start.elapsed().as_millis() as u64);

    Ok(Json(ApiResponse::success(BatchOutcome { rows, summary })))
}
