// src/server/mod.rs
use crate::api::*;
use crate::config::Config;
use crate::export::SpreadsheetExporter;
use crate::orchestrator::AddressPipeline;
use rocket::serde::json::Json;
use rocket::{catch, catchers, routes, Build, Rocket};

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub pipeline: AddressPipeline,
    pub exporter: SpreadsheetExporter,
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    let pipeline = AddressPipeline::from_config(&config);
    let exporter = SpreadsheetExporter::new(config.output.directory.clone());
    let state = ServerState {
        config,
        pipeline,
        exporter,
    };

    rocket::build()
        .manage(state)
        .mount(
            "/api",
            routes![
                // Health and info endpoints
                routes::health::health_check,
                routes::health::index,
                // Processing endpoints
                process_company,
                process_batch,
                process_upload,
                process_extended,
            ],
        )
        .register(
            "/",
            catchers![
                bad_request_catcher,
                not_found_catcher,
                unprocessable_catcher,
                internal_catcher
            ],
        )
}

// Framework-level rejections carry the same envelope as handler errors.

#[catch(400)]
fn bad_request_catcher() -> Json<ApiResponse<()>> {
    Json(ApiResponse::error(
        "bad_request",
        "malformed request".to_string(),
    ))
}

#[catch(404)]
fn not_found_catcher() -> Json<ApiResponse<()>> {
    Json(ApiResponse::error(
        "not_found",
        "no such endpoint".to_string(),
    ))
}

#[catch(422)]
fn unprocessable_catcher() -> Json<ApiResponse<()>> {
    Json(ApiResponse::error(
        "invalid_body",
        "request body did not match the expected schema".to_string(),
    ))
}

#[catch(500)]
fn internal_catcher() -> Json<ApiResponse<()>> {
    Json(ApiResponse::error(
        "internal",
        "internal server error".to_string(),
    ))
}
