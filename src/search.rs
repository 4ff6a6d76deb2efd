//! Aggregation runner and background search session.
//!
//! [`SearchRunner::run`] queries every source for every query, strictly one
//! after another, and reports integer progress after each call. A
//! [`SearchSession`] runs that loop on a spawned task and hands the caller a
//! [`SearchHandle`] with a progress stream and a one-shot result.
//!
//! # Replacement
//!
//! Starting a new search on a session aborts the run still in flight. The old
//! handle's result channel then closes without a value and its progress
//! stream ends.

use crate::config::SearchConfig;
use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::models::{Progress, ResultSet, SearchRequest};
use crate::sources::{self, SourceExtractor};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument};

/// Runs a search request against a fixed, ordered set of extractors.
pub struct SearchRunner {
    fetcher: Fetcher,
    extractors: Vec<Box<dyn SourceExtractor>>,
}

impl std::fmt::Debug for SearchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRunner")
            .field(
                "sources",
                &self.extractors.iter().map(|e| e.source()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SearchRunner {
    /// Runner over all six sources with the configured endpoints and fetch
    /// settings.
    pub fn new(config: &SearchConfig) -> Result<Self, FetchError> {
        Ok(Self::with_extractors(
            Fetcher::new(&config.fetch)?,
            sources::all(&config.endpoints),
        ))
    }

    /// Runner over a custom extractor list.
    pub fn with_extractors(fetcher: Fetcher, extractors: Vec<Box<dyn SourceExtractor>>) -> Self {
        Self {
            fetcher,
            extractors,
        }
    }

    /// Number of extractor calls a run of `request` will make.
    pub fn total_steps(&self, request: &SearchRequest) -> usize {
        self.extractors.len() * request.queries().len()
    }

    /// Run every query against every source in fixed order.
    ///
    /// `on_progress` is called once per extractor call with
    /// `completed * 100 / total`; the last call is always `100`. Sources that
    /// fail contribute nothing; the returned [`ResultSet`] still lists them.
    #[instrument(level = "info", skip_all, fields(mode = ?request.mode(), keywords = request.keywords().len()))]
    pub async fn run<F>(&self, request: &SearchRequest, mut on_progress: F) -> ResultSet
    where
        F: FnMut(u8),
    {
        let t0 = Instant::now();
        let queries = request.queries();
        let mut results = ResultSet::new();
        let mut progress = Progress::new(self.extractors.len() * queries.len());

        for query in &queries {
            for extractor in &self.extractors {
                let records = sources::extract(extractor.as_ref(), &self.fetcher, query).await;
                results.extend(extractor.source(), records);
                let percent = progress.step();
                debug!(source = %extractor.source(), %query, percent, "Step complete");
                on_progress(percent);
            }
        }

        info!(
            steps = progress.completed(),
            records = results.total_records(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Search complete"
        );
        results
    }
}

/// Observation side of one background run.
#[derive(Debug)]
pub struct SearchHandle {
    /// Percentages in step order. Ends when the run finishes or is aborted.
    pub progress: mpsc::UnboundedReceiver<u8>,
    /// The final results, sent once after the last progress value. Closes
    /// without a value if the run is replaced.
    pub result: oneshot::Receiver<ResultSet>,
}

/// Lifecycle of the session's current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Done,
}

/// Starts searches on background tasks, at most one observed at a time.
#[derive(Debug)]
pub struct SearchSession {
    runner: Arc<SearchRunner>,
    current: Option<AbortHandle>,
}

impl SearchSession {
    pub fn new(runner: SearchRunner) -> Self {
        Self {
            runner: Arc::new(runner),
            current: None,
        }
    }

    /// Spawn a run of `request`, aborting any run still in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_search(&mut self, request: SearchRequest) -> SearchHandle {
        if let Some(previous) = self.current.take() {
            if !previous.is_finished() {
                info!("Replacing in-flight search");
            }
            previous.abort();
        }

        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = oneshot::channel();
        let runner = Arc::clone(&self.runner);

        let task = tokio::spawn(async move {
            let results = runner
                .run(&request, |percent| {
                    // The caller may have dropped the receiver; the run still completes.
                    let _ = progress_tx.send(percent);
                })
                .await;
            let _ = result_tx.send(results);
        });
        self.current = Some(task.abort_handle());

        SearchHandle {
            progress: progress_rx,
            result: result_rx,
        }
    }

    pub fn state(&self) -> RunState {
        match &self.current {
            None => RunState::Idle,
            Some(handle) if handle.is_finished() => RunState::Done,
            Some(_) => RunState::Running,
        }
    }
}
