//! Concurrent fetch of every cookbook in the resource list
//!
//! # Architecture
//! - Bounded worker pool via `futures::stream::buffer_unordered(workers)`
//! - Each fetch is isolated: its error is logged and its slot stays `None`
//! - Results land in a pre-sized slot vector addressed by input position, so
//!   output order is request order regardless of completion order
//! - Every resource has its own timeout; a deadline for the whole phase
//!   cancels whatever is still in flight
//!
//! Nothing is written concurrently: completed futures are drained one at a
//! time by the single task that owns the slot vector.

use crate::error::FetchError;
use crate::fetcher::MetadataFetcher;
use crate::types::CookbookRecord;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Runs [`MetadataFetcher`] over a list of resources
pub struct FetchOrchestrator {
    fetcher: Arc<MetadataFetcher>,
    workers: usize,
    task_timeout: Option<Duration>,
    deadline: Option<Duration>,
}

impl FetchOrchestrator {
    /// Create an orchestrator with `workers` concurrent fetches (at least 1)
    /// and no time limits
    pub fn new(fetcher: Arc<MetadataFetcher>, workers: usize) -> Self {
        Self {
            fetcher,
            workers: workers.max(1),
            task_timeout: None,
            deadline: None,
        }
    }

    /// Give up on a single resource after `timeout`
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = Some(timeout);
        self
    }

    /// Cancel all remaining fetches once `deadline` has elapsed
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetch every resource; slot `i` holds the record for `ids[i]`, or
    /// `None` if that fetch failed
    ///
    /// Returns only once every fetch has resolved.
    pub async fn fetch_all(&self, ids: &[String]) -> Vec<Option<CookbookRecord>> {
        info!(
            resources = ids.len(),
            workers = self.workers,
            "Fetching cookbook metadata"
        );

        let cancel = CancellationToken::new();
        let deadline_timer = self.deadline.map(|deadline| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                cancel.cancel();
            })
        });

        let mut slots: Vec<Option<CookbookRecord>> = vec![None; ids.len()];

        let mut completed = stream::iter(ids.iter().enumerate())
            .map(|(index, id)| {
                let cancel = cancel.clone();
                async move { (index, self.fetch_one(id, &cancel).await) }
            })
            .buffer_unordered(self.workers);

        while let Some((index, outcome)) = completed.next().await {
            let id = &ids[index];
            match outcome {
                Ok(record) => {
                    debug!(resource = %id, index, "Fetch completed");
                    slots[index] = Some(record);
                }
                Err(err) => {
                    error!(
                        resource = %id,
                        error = %err,
                        "Error fetching cookbook metadata, skipping"
                    );
                }
            }
        }

        if let Some(timer) = deadline_timer {
            timer.abort();
        }

        let fetched = slots.iter().filter(|slot| slot.is_some()).count();
        info!(
            requested = ids.len(),
            fetched,
            failed = ids.len() - fetched,
            "Metadata fetch finished"
        );

        slots
    }

    async fn fetch_one(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<CookbookRecord, FetchError> {
        let fetch = async {
            match self.task_timeout {
                Some(limit) => match tokio::time::timeout(limit, self.fetcher.fetch(id)).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout { after: limit }),
                },
                None => self.fetcher.fetch(id).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = fetch => result,
        }
    }
}
