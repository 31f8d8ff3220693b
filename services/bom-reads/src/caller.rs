//! Bill of Material API Caller
//!
//! Fans out one task per selected aspect, chains the header's item link as a
//! follow-up request, and joins every task before returning.
//!
//! Each aspect fetch runs `build query -> request -> decode -> emit` and ends
//! in success or failure without retrying. Failures stay inside their own
//! task: they are emitted to the [`OutputSink`] and returned in the aspect's
//! [`AspectReport`], and never stop the other aspects.

use reqwest::Method;
use sap_bom_models::{Aspect, BillOfMaterialQuery, Header, Item, Records};
use sap_bom_utils::odata::{self, QueryParams};
use sap_bom_utils::{BomError, BomResult};
use std::sync::Arc;
use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

use crate::request_client::FetchAdapter;
use crate::sink::{FetchStage, OutputSink};

/// What happened to the header's item link request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// The aspect has no follow-up, or its list request failed.
    NotApplicable,
    /// The header list was empty or its first row carried no item link.
    Skipped,
    Completed(BomResult<Vec<Item>>),
}

/// Outcome of one dispatched aspect.
#[derive(Debug, Clone)]
pub struct AspectReport {
    pub aspect: Aspect,
    pub outcome: BomResult<Records>,
    pub follow_up: FollowUp,
}

impl AspectReport {
    fn failed(aspect: Aspect, error: BomError) -> Self {
        Self {
            aspect,
            outcome: Err(error),
            follow_up: FollowUp::NotApplicable,
        }
    }

    /// True when neither the list request nor a follow-up failed.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok() && !matches!(self.follow_up, FollowUp::Completed(Err(_)))
    }
}

/// Success/failure counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[AspectReport]) -> Self {
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        Self {
            succeeded,
            failed: reports.len() - succeeded,
        }
    }
}

/// Bill of Material API caller
#[derive(Clone)]
pub struct BillOfMaterialCaller {
    base_url: Arc<str>,
    fetcher: Arc<dyn FetchAdapter>,
    sink: Arc<dyn OutputSink>,
}

impl BillOfMaterialCaller {
    pub fn new(
        base_url: impl Into<String>,
        fetcher: Arc<dyn FetchAdapter>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            base_url: Arc::from(base_url.into()),
            fetcher,
            sink,
        }
    }

    /// Fetch every aspect in `aspects` concurrently and wait for all of them.
    ///
    /// Reports come back in dispatch order, one per aspect.
    pub async fn fetch_selected(
        &self,
        query: &BillOfMaterialQuery,
        aspects: &[Aspect],
    ) -> Vec<AspectReport> {
        let run_span = info_span!("bom_fetch", run_id = %Uuid::new_v4());
        let query = Arc::new(query.clone());

        let handles: Vec<_> = aspects
            .iter()
            .map(|&aspect| {
                let caller = self.clone();
                let query = Arc::clone(&query);
                let span = info_span!(parent: &run_span, "aspect_fetch", aspect = %aspect);
                let handle = tokio::spawn(
                    async move { caller.fetch_aspect(aspect, &query).await }.instrument(span),
                );
                (aspect, handle)
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (aspect, handle) in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    let err = BomError::internal(format!("{} fetch task aborted: {}", aspect, e));
                    error!(parent: &run_span, aspect = %aspect, error = %err, "Aspect fetch task did not complete");
                    reports.push(AspectReport::failed(aspect, err));
                }
            }
        }
        reports
    }

    /// Runs the fetcher for a single aspect.
    pub async fn fetch_aspect(&self, aspect: Aspect, query: &BillOfMaterialQuery) -> AspectReport {
        match aspect {
            Aspect::Header => self.header(query).await,
            Aspect::Item => self.item(query).await,
            Aspect::ProductDescription => self.product_description(query).await,
            Aspect::Component => self.component(query).await,
            Aspect::ComponentDescription => self.component_description(query).await,
        }
    }

    async fn header(&self, query: &BillOfMaterialQuery) -> AspectReport {
        let aspect = Aspect::Header;
        let outcome = self.call_list(aspect, query).await;
        let outcome = self.emit(aspect, FetchStage::List, outcome);

        let follow_up = match outcome.as_ref().ok().and_then(Records::headers) {
            Some(headers) => match first_item_link(headers) {
                Some(link) => FollowUp::Completed(self.to_item(aspect, link).await),
                None => {
                    debug!(
                        records = headers.len(),
                        "No item link on first header record, skipping follow-up"
                    );
                    FollowUp::Skipped
                }
            },
            None => FollowUp::NotApplicable,
        };

        AspectReport {
            aspect,
            outcome,
            follow_up,
        }
    }

    async fn item(&self, query: &BillOfMaterialQuery) -> AspectReport {
        self.list_only(Aspect::Item, query).await
    }

    async fn product_description(&self, query: &BillOfMaterialQuery) -> AspectReport {
        self.list_only(Aspect::ProductDescription, query).await
    }

    async fn component(&self, query: &BillOfMaterialQuery) -> AspectReport {
        self.list_only(Aspect::Component, query).await
    }

    async fn component_description(&self, query: &BillOfMaterialQuery) -> AspectReport {
        self.list_only(Aspect::ComponentDescription, query).await
    }

    async fn list_only(&self, aspect: Aspect, query: &BillOfMaterialQuery) -> AspectReport {
        let outcome = self.call_list(aspect, query).await;
        AspectReport {
            aspect,
            outcome: self.emit(aspect, FetchStage::List, outcome),
            follow_up: FollowUp::NotApplicable,
        }
    }

    /// List request against the aspect's entity set, decoded into header or
    /// item records depending on the aspect.
    async fn call_list(&self, aspect: Aspect, query: &BillOfMaterialQuery) -> BomResult<Records> {
        let entity_set = aspect.entity_set();
        let url = odata::entity_set_url(&self.base_url, entity_set);
        let params = odata::query_params(aspect, query);

        debug!(url = %url, "Requesting bill of material list");
        let payload = self
            .fetcher
            .request(Method::GET, &url, &params, None)
            .await
            .map_err(|e| e.with_context(entity_set))?;

        let records = if aspect.returns_headers() {
            odata::convert_to_header(&payload).map(Records::Headers)
        } else {
            odata::convert_to_item(&payload).map(Records::Items)
        };
        records.map_err(|e| e.with_context(entity_set))
    }

    /// Follow-up request to a header's item link. The link is used as given.
    async fn to_item(&self, aspect: Aspect, link: &str) -> BomResult<Vec<Item>> {
        debug!(url = link, "Requesting header item link");
        let result = self
            .fetcher
            .request(Method::GET, link, &QueryParams::new(), None)
            .await
            .and_then(|payload| odata::convert_to_item(&payload))
            .map_err(|e| e.with_context("to_BillOfMaterialItem"));

        match &result {
            Ok(items) => self
                .sink
                .info(aspect, FetchStage::FollowUp, &Records::Items(items.clone())),
            Err(e) => self.sink.error(aspect, FetchStage::FollowUp, e),
        }
        result
    }

    fn emit(&self, aspect: Aspect, stage: FetchStage, outcome: BomResult<Records>) -> BomResult<Records> {
        match &outcome {
            Ok(records) => self.sink.info(aspect, stage, records),
            Err(e) => self.sink.error(aspect, stage, e),
        }
        outcome
    }
}

fn first_item_link(headers: &[Header]) -> Option<&str> {
    headers.first().and_then(Header::item_link)
}
