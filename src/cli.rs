// src/cli.rs
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::fmt;
use std::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::errors::Result;
use crate::export::SpreadsheetExporter;
use crate::input::{parse_roster_csv, validate_company};
use crate::models::{BatchSummary, CompanyRecord};
use crate::orchestrator::AddressPipeline;
use crate::server::build_rocket;

enum MenuAction {
    ProcessRoster,
    ProcessSingleCompany,
    StartServer,
    Exit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::ProcessRoster => "Process a company roster (CSV)",
            MenuAction::ProcessSingleCompany => "Process a single company",
            MenuAction::StartServer => "Start the API server",
            MenuAction::Exit => "Exit",
        };
        write!(f, "{}", label)
    }
}

pub struct CliApp {
    config: Config,
    pipeline: AddressPipeline,
    exporter: SpreadsheetExporter,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        let pipeline = AddressPipeline::from_config(&config);
        let exporter = SpreadsheetExporter::new(config.output.directory.clone());
        Self {
            config,
            pipeline,
            exporter,
        }
    }

    pub async fn run(&self) -> Result<()> {
        println!("\n📍 Welcome to SiteIntel!");
        println!("═══════════════════════════════════════");

        loop {
            let actions = vec![
                MenuAction::ProcessRoster,
                MenuAction::ProcessSingleCompany,
                MenuAction::StartServer,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::ProcessRoster => {
                    if let Err(e) = self.run_roster().await {
                        error!("Roster processing failed: {}", e);
                    }
                }
                MenuAction::ProcessSingleCompany => {
                    if let Err(e) = self.run_single_company().await {
                        error!("Company processing failed: {}", e);
                    }
                }
                MenuAction::StartServer => {
                    info!("Starting API server...");
                    let _ = build_rocket(self.config.clone()).launch().await?;
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using SiteIntel!");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn run_roster(&self) -> Result<()> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Roster CSV path")
            .interact_text()?;

        let data = tokio::fs::read(&path).await?;
        let companies = parse_roster_csv(&data)?;

        let start = Instant::now();
        let rows = self.pipeline.process_batch(&companies).await;
        let summary = BatchSummary::from_rows(&rows, start.elapsed().as_millis() as u64);

        let output = self.exporter.write_csv(&rows).await?;
        self.print_summary(&summary);
        println!("📄 Spreadsheet written to {}", output.display());

        Ok(())
    }

    async fn run_single_company(&self) -> Result<()> {
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Company name")
            .interact_text()?;
        let website: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Official website")
            .interact_text()?;

        let company = CompanyRecord { name, website };
        validate_company(&company)?;

        let row = self.pipeline.process_company(&company).await;
        let rendered = if self.config.output.pretty_json {
            serde_json::to_string_pretty(&row)?
        } else {
            serde_json::to_string(&row)?
        };
        println!("{}", rendered);

        Ok(())
    }

    fn print_summary(&self, summary: &BatchSummary) {
        println!("\n📊 Batch Summary:");
        println!("━━━━━━━━━━━━━━━━━━━━━");
        println!("   ✅ success: {}", summary.succeeded);
        println!("   ❔ no address found: {}", summary.no_address);
        println!("   🌐 fetch errors: {}", summary.fetch_errors);
        println!("   🗺️  enrichment errors: {}", summary.enrichment_errors);
        println!(
            "   ⏱️  {} companies in {}ms",
            summary.total, summary.duration_ms
        );
    }
}
