// src/server/routes.rs

pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "site-intel-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "SiteIntel API",
            "version": "0.1.0",
            "description": "Company address extraction, standardization and enrichment",
            "endpoints": {
                "health": "/api/health",
                "process_company": "/api/process-company",
                "process_batch": "/api/process-batch",
                "process_upload": "/api/process-upload",
                "process_extended": "/api/process-extended"
            }
        }))
    }
}
