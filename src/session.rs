use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::types::SearchConfig;
use crate::domain::itinerary::{ItineraryRecord, LegDirection, MatchCriteria};
use crate::domain::query::FlightQuery;
use crate::error::{FlightError, Result};
use crate::ports::diagnostics::DiagnosticSink;
use crate::ports::render::{RenderContext, RenderSource};
use crate::scrape::{self, locator};

/// Orchestrates the three-stage round-trip protocol. Each stage opens
/// one browsing context, owns it for the stage's lifetime, and releases
/// it on every exit path. No stage retries internally; retry policy
/// belongs to the caller, as does the selection policy that turns a
/// stage's records into the next stage's criteria.
pub struct SearchSession {
    render: Arc<dyn RenderSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
    search: SearchConfig,
}

impl SearchSession {
    pub fn new(
        render: Arc<dyn RenderSource>,
        diagnostics: Arc<dyn DiagnosticSink>,
        search: SearchConfig,
    ) -> Self {
        Self {
            render,
            diagnostics,
            search,
        }
    }

    /// Stage 1: render the initial round-trip query and return every
    /// visible outbound option. No selection happens here; each record
    /// carries the page address as its continuation reference so a
    /// later stage can resume this still-uncommitted search.
    ///
    /// Faults yield an empty list, never an error — "no options found"
    /// is a first-class outcome for the decision-maker.
    pub async fn search_outbound(&self, query: &FlightQuery) -> Vec<ItineraryRecord> {
        if let Err(e) = query.validate() {
            warn!(error = %e, "rejecting outbound search");
            return Vec::new();
        }
        info!(
            origin = %query.origin,
            destination = %query.destination,
            depart = %query.depart_date,
            "searching outbound flights"
        );

        let mut ctx = match self.render.open().await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(error = %e, "failed to open browsing context");
                return Vec::new();
            }
        };

        let records = match self.run_outbound(ctx.as_mut(), query).await {
            Ok(records) => {
                info!(count = records.len(), "outbound scrape complete");
                records
            }
            Err(e) => {
                warn!(error = %e, "outbound stage failed");
                self.snapshot("outbound-failure", ctx.as_mut()).await;
                Vec::new()
            }
        };

        ctx.close().await;
        records
    }

    async fn run_outbound(
        &self,
        ctx: &mut dyn RenderContext,
        query: &FlightQuery,
    ) -> Result<Vec<ItineraryRecord>> {
        let url = query.to_search_url(&self.search.base_url)?;
        debug!(%url, "navigating to search results");
        ctx.goto(&url).await?;
        ctx.wait_ready().await?;

        let blocks = ctx.render_blocks().await?;
        let address = ctx.current_address().await?;
        Ok(scrape::scrape_records(
            &blocks,
            LegDirection::Outbound,
            &address,
            &self.search.airlines,
        ))
    }

    /// Stage 2: resume the search at `continuation`, re-find the
    /// outbound row the caller committed to, select it, and scrape the
    /// dependent return-leg options. Each returned record's
    /// continuation now encodes the outbound leg as committed.
    ///
    /// An empty list means either the row could not be re-found (the
    /// caller should ask the end user to pick differently) or a render
    /// fault; both are recoverable, neither is an error here.
    pub async fn search_return(
        &self,
        continuation: &str,
        criteria: &MatchCriteria,
    ) -> Vec<ItineraryRecord> {
        info!("relocating outbound selection to search return flights");

        let mut ctx = match self.render.open().await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(error = %e, "failed to open browsing context");
                return Vec::new();
            }
        };

        let records = match self.run_return(ctx.as_mut(), continuation, criteria).await {
            Ok(records) => records,
            Err(FlightError::NoMatch) => {
                info!("outbound selection no longer present in result set");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "return stage failed");
                self.snapshot("return-failure", ctx.as_mut()).await;
                Vec::new()
            }
        };

        ctx.close().await;
        records
    }

    async fn run_return(
        &self,
        ctx: &mut dyn RenderContext,
        continuation: &str,
        criteria: &MatchCriteria,
    ) -> Result<Vec<ItineraryRecord>> {
        let index = self.relocate_and_commit(ctx, continuation, criteria).await?;
        debug!(index, "outbound row committed, scraping return leg");

        let blocks = ctx.render_blocks().await?;
        let address = ctx.current_address().await?;
        Ok(scrape::scrape_records(
            &blocks,
            LegDirection::Return,
            &address,
            &self.search.airlines,
        ))
    }

    /// Stage 3: re-find the chosen return row on the return-selection
    /// page, commit to it, and return the settled page address — the
    /// booking link that restores both committed legs.
    ///
    /// `FlightError::NoMatch` is the distinguished failure when the row
    /// cannot be re-found; a partially committed link is never returned.
    pub async fn finalize_booking(
        &self,
        continuation: &str,
        criteria: &MatchCriteria,
    ) -> Result<String> {
        info!("relocating return selection to finalize booking link");

        let mut ctx = self.render.open().await?;

        let result = self.run_finalize(ctx.as_mut(), continuation, criteria).await;
        match &result {
            Ok(link) => info!(%link, "booking link generated"),
            Err(FlightError::NoMatch) => {
                info!("return selection no longer present in result set");
            }
            Err(e) => {
                warn!(error = %e, "finalize stage failed");
                self.snapshot("finalize-failure", ctx.as_mut()).await;
            }
        }

        ctx.close().await;
        result
    }

    async fn run_finalize(
        &self,
        ctx: &mut dyn RenderContext,
        continuation: &str,
        criteria: &MatchCriteria,
    ) -> Result<String> {
        let index = self.relocate_and_commit(ctx, continuation, criteria).await?;
        debug!(index, "return row committed, capturing final address");
        ctx.current_address().await
    }

    /// Shared stage 2/3 front half: reload the continuation, locate the
    /// target row among the freshly rendered blocks, commit to it, and
    /// wait for the resulting transition to settle.
    async fn relocate_and_commit(
        &self,
        ctx: &mut dyn RenderContext,
        continuation: &str,
        criteria: &MatchCriteria,
    ) -> Result<usize> {
        ctx.goto(continuation).await?;
        ctx.wait_ready().await?;

        let blocks = ctx.render_blocks().await?;
        let index = locator::locate(&blocks, criteria, &self.search.airlines)
            .ok_or(FlightError::NoMatch)?;

        ctx.commit_row(index).await?;
        ctx.wait_settle().await?;
        Ok(index)
    }

    async fn snapshot(&self, label: &str, ctx: &mut dyn RenderContext) {
        match ctx.screenshot().await {
            Ok(png) => self.diagnostics.capture(label, &png).await,
            Err(e) => debug!(error = %e, "screenshot capture failed"),
        }
    }
}
