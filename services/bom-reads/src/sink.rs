//! Output sink for fetch outcomes.

use sap_bom_models::{Aspect, Records};
use sap_bom_utils::BomError;
use tracing::{error, info};

/// Receives exactly one call per fetch attempt.
///
/// Calls are fire-and-forget and must not fail.
pub trait OutputSink: Send + Sync {
    fn info(&self, aspect: Aspect, stage: FetchStage, records: &Records);
    fn error(&self, aspect: Aspect, stage: FetchStage, error: &BomError);
}

/// Which request of an aspect an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    List,
    /// The request to a header's item link.
    FollowUp,
}

impl FetchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStage::List => "list",
            FetchStage::FollowUp => "follow_up",
        }
    }
}

/// Emits outcomes as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn info(&self, aspect: Aspect, stage: FetchStage, records: &Records) {
        let data = serde_json::to_string(records).unwrap_or_else(|e| format!("<unserialisable: {}>", e));
        info!(
            aspect = %aspect,
            stage = stage.as_str(),
            count = records.len(),
            data = %data,
            "Fetched bill of material records"
        );
    }

    fn error(&self, aspect: Aspect, stage: FetchStage, err: &BomError) {
        error!(
            aspect = %aspect,
            stage = stage.as_str(),
            code = err.error_code(),
            error = %err,
            "Bill of material fetch failed"
        );
    }
}
