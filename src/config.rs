use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub geocoding: GeocodingConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub delay_ms: u64,
    pub scan_subpages: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub delay_ms: u64,

    // Secret, never read from config.yml.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                timeout_seconds: 10,
                max_redirects: 5,
                user_agent: "Mozilla/5.0 (compatible; SiteIntelBot/1.0)".to_string(),
                delay_ms: 250,
                scan_subpages: true,
            },
            geocoding: GeocodingConfig {
                enabled: true,
                endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
                delay_ms: 100,
                api_key: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
