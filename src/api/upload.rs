// src/api/upload.rs
use rocket::http::Header;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{post, Responder, State};

use crate::api::{bad_request, internal_error, ApiResponse};
use crate::input::parse_roster_csv;
use crate::server::ServerState;

/// The processed spreadsheet, served as a download.
#[derive(Responder)]
#[response(status = 200, content_type = "text/csv")]
pub struct SpreadsheetResponse {
    content: Vec<u8>,
    disposition: Header<'static>,
}

impl SpreadsheetResponse {
    fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            disposition: Header::new(
                "Content-Disposition",
                "attachment; filename=\"siteintel_addresses.csv\"",
            ),
        }
    }
}

/// Upload a roster CSV, get back the processed spreadsheet.
#[post("/process-upload", data = "<roster>")]
pub async fn process_upload(
    state: &State<ServerState>,
    roster: String,
) -> Result<SpreadsheetResponse, Custom<Json<ApiResponse<()>>>> {
    let companies = parse_roster_csv(roster.as_bytes()).map_err(|e| bad_request(&e))?;

    let rows = state.pipeline.process_batch(&companies).await;
    let bytes = state
        .exporter
        .csv_bytes(&rows)
        .map_err(|e| internal_error(e.to_string()))?;

    Ok(SpreadsheetResponse::new(bytes))
}
