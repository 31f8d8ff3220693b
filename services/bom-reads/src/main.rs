//! SAP Bill of Material Reads
//!
//! Reads an input descriptor, fetches the selected Bill of Material aspects
//! from the SAP OData API in parallel, and logs the decoded records.
//! Fetch failures are logged per aspect and never change the exit status.

use anyhow::{Context, Result};
use sap_bom_utils::{init_logging, AppConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

mod caller;
mod input_reader;
mod request_client;
mod sink;

use caller::{BillOfMaterialCaller, RunSummary};
use request_client::SapRequestClient;
use sink::TracingSink;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_validated().context("Failed to load configuration")?;
    init_logging(&config.logging)?;
    info!("Starting SAP Bill of Material reads");

    let sdc = input_reader::read_sdc(&config.input.file_path)
        .with_context(|| format!("Failed to read input descriptor {}", config.input.file_path))?;

    let selection = sdc.aspects();
    for ignored in &selection.ignored {
        warn!(selector = %ignored, "Ignoring unknown accepter entry");
    }
    debug!(aspects = ?selection.aspects, "Expanded accepter");

    let client = SapRequestClient::new(&config.sap).context("Failed to create SAP request client")?;
    let caller = BillOfMaterialCaller::new(
        config.sap.base_url.clone(),
        Arc::new(client),
        Arc::new(TracingSink),
    );

    let reports = caller.fetch_selected(&sdc.query(), &selection.aspects).await;

    let summary = RunSummary::from_reports(&reports);
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Bill of Material reads finished"
    );

    Ok(())
}
