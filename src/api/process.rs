// src/api/process.rs
use rocket::serde::json::Json;
use rocket::{post, State};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::api::{bad_request, ApiResponse, ApiResult};
use crate::errors::ValidationError;
use crate::input::validate_company;
use crate::models::{BatchSummary, CompanyRecord, ResultRow};
use crate::server::ServerState;

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub website: String,
}

impl From<CompanyRequest> for CompanyRecord {
    fn from(request: CompanyRequest) -> Self {
        CompanyRecord {
            name: request.name,
            website: request.website,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub companies: Vec<CompanyRequest>,
}

#[derive(Serialize)]
pub struct BatchOutcome {
    pub rows: Vec<ResultRow>,
    pub summary: BatchSummary,
}

#[post("/process-company", format = "json", data = "<request>")]
pub async fn process_company(
    state: &State<ServerState>,
    request: Json<CompanyRequest>,
) -> ApiResult<ResultRow> {
    let company: CompanyRecord = request.into_inner().into();
    validate_company(&company).map_err(|e| bad_request(&e))?;

    let row = state.pipeline.process_company(&company).await;
    Ok(Json(ApiResponse::success(row)))
}

#[post("/process-batch", format = "json", data = "<request>")]
pub async fn process_batch(
    state: &State<ServerState>,
    request: Json<BatchRequest>,
) -> ApiResult<BatchOutcome> {
    if request.companies.is_empty() {
        return Err(bad_request(&ValidationError::EmptyBatch));
    }

    let companies: Vec<CompanyRecord> = request
        .into_inner()
        .companies
        .into_iter()
        .map(CompanyRecord::from)
        .collect();

    let start = Instant::now();
    let rows = state.pipeline.process_batch(&companies).await;
    let summary = BatchSummary::from_rows(&rows, start.elapsed().as_millis() as u64);

    Ok(Json(ApiResponse::success(BatchOutcome { rows, summary })))
}
