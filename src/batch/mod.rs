//! Batch orchestration
//!
//! A crawl whose page budget does not fit into one request is split into
//! sequential steps of a fixed sub-budget. Each step hands back its crawl
//! state, which is fed into the next one; results are merged into one
//! `AggregateResult`.

mod remote;

pub use remote::RemoteStep;

use crate::check::{CheckRequest, Checker};
use crate::config::BatchConfig;
use crate::output::{AggregateResult, CheckResponse};
use crate::SweepError;
use async_trait::async_trait;
use std::sync::Arc;

/// One resumable check step
#[async_trait]
pub trait CheckStep: Send + Sync {
    /// Runs a step for `request` and returns its report
    async fn run_step(&self, request: CheckRequest) -> Result<CheckResponse, SweepError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Runs steps in-process
#[derive(Debug, Clone)]
pub struct LocalStep {
    checker: Arc<Checker>,
}

impl LocalStep {
    pub fn new(checker: Arc<Checker>) -> Self {
        Self { checker }
    }
}

#[async_trait]
impl CheckStep for LocalStep {
    async fn run_step(&self, request: CheckRequest) -> Result<CheckResponse, SweepError> {
        self.checker.check(&request).await
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[async_trait]
impl<T: CheckStep + ?Sized> CheckStep for Arc<T> {
    async fn run_step(&self, request: CheckRequest) -> Result<CheckResponse, SweepError> {
        (**self).run_step(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Outcome of a batched session
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Merged result of every successful step
    pub result: CheckResponse,

    /// Batches the budget was split into
    pub batches_planned: usize,

    /// Steps that returned a report
    pub batches_run: usize,

    /// Steps that timed out and were skipped
    pub batches_skipped: usize,
}

impl BatchReport {
    /// True if at least one step ran and the last one found nothing left to crawl
    pub fn is_complete(&self) -> bool {
        self.batches_run > 0 && !self.result.has_more
    }
}

/// Drives a `CheckStep` until the site is crawled or the budget is spent
pub struct BatchOrchestrator<S> {
    step: S,
    sub_budget: usize,
}

impl<S: CheckStep> BatchOrchestrator<S> {
    /// Creates an orchestrator; a zero sub-budget is treated as 1
    pub fn new(step: S, sub_budget: usize) -> Self {
        Self {
            step,
            sub_budget: sub_budget.max(1),
        }
    }

    /// Creates an orchestrator using the configured sub-budget
    pub fn from_config(step: S, config: &BatchConfig) -> Self {
        Self::new(step, config.sub_budget)
    }

    /// Page budget of one step
    pub fn sub_budget(&self) -> usize {
        self.sub_budget
    }

    /// Number of batches `total_budget` is split into
    pub fn batch_count(&self, total_budget: usize) -> usize {
        total_budget.div_ceil(self.sub_budget)
    }

    /// Runs the session
    ///
    /// Batch `i` gets `min(sub_budget, total_budget - i * sub_budget)` pages.
    /// The loop ends early once a step reports `has_more == false`. A step
    /// that times out is skipped and its slot is consumed; the next step
    /// retries from the same state. Any other error ends the session.
    pub async fn run(&self, seed: &str, total_budget: usize) -> Result<BatchReport, SweepError> {
        let total_budget = total_budget.max(1);
        let planned = self.batch_count(total_budget);

        tracing::info!(
            "Checking {} with budget {} in {} batches of {} ({} step)",
            seed,
            total_budget,
            planned,
            self.sub_budget,
            self.step.name()
        );

        let mut aggregate = AggregateResult::new(seed);
        let mut visited_urls = Vec::new();
        let mut next_urls_to_visit = Vec::new();
        let mut batches_run = 0;
        let mut batches_skipped = 0;

        for batch in 0..planned {
            let budget = self.sub_budget.min(total_budget - batch * self.sub_budget);
            let request = CheckRequest {
                url: Some(seed.to_string()),
                max_pages: Some(budget),
                visited_urls: visited_urls.clone(),
                next_urls_to_visit: next_urls_to_visit.clone(),
            };

            match self.step.run_step(request).await {
                Ok(response) => {
                    batches_run += 1;
                    visited_urls = response.visited_urls.clone();
                    next_urls_to_visit = response.next_urls_to_visit.clone();
                    let has_more = response.has_more;

                    tracing::info!(
                        "Batch {}/{}: {} pages, {} links, {} broken",
                        batch + 1,
                        planned,
                        response.total_pages,
                        response.total_links,
                        response.broken_links
                    );
                    aggregate.merge(response);

                    if !has_more {
                        break;
                    }
                }
                Err(e) if e.is_timeout() => {
                    batches_skipped += 1;
                    tracing::warn!("Batch {}/{} timed out, skipping: {}", batch + 1, planned, e);
                }
                Err(e) => {
                    tracing::error!("Batch {}/{} failed: {}", batch + 1, planned, e);
                    return Err(e);
                }
            }
        }

        let result = aggregate.finish();
        tracing::info!(
            "Session done: {} pages, {} unique links, {} broken, {} working",
            result.total_pages,
            result.total_links,
            result.broken_links,
            result.working_links
        );

        Ok(BatchReport {
            result,
            batches_planned: planned,
            batches_run,
            batches_skipped,
        })
    }
}
