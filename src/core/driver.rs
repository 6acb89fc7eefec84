//! Fan-out/fan-in generation over a fixed worker pool

use super::jsluice::ExtractedEndpoint;
use super::permute::generate;
use crate::error::Result;
use crate::output::ProgressTracker;
use std::sync::Arc;
use tracing::debug;

/// How records are handed out to workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkStrategy {
    /// Every worker permutes the full list; output repeats once per worker
    #[default]
    Replicate,
    /// Worker `k` takes records `k, k + n, k + 2n, ...`
    Shard,
}

/// Concurrent permutation driver
#[derive(Debug, Clone)]
pub struct Driver {
    workers: usize,
    strategy: WorkStrategy,
}

impl Driver {
    /// With zero workers nothing is generated
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            strategy: WorkStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: WorkStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Records a run will permute in total, counting replication
    pub fn total_work(&self, records: usize) -> u64 {
        match self.strategy {
            WorkStrategy::Replicate => (records * self.workers) as u64,
            WorkStrategy::Shard => records as u64,
        }
    }

    /// Permute every record on the worker pool and collect all candidates.
    ///
    /// Returns only after every worker has finished; ordering across and
    /// within workers is unspecified.
    pub async fn run(
        &self,
        endpoints: Vec<ExtractedEndpoint>,
        progress: &ProgressTracker,
    ) -> Result<Vec<String>> {
        let endpoints: Arc<[ExtractedEndpoint]> = endpoints.into();
        let (tx, rx) = async_channel::bounded::<String>(1);

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let (start, step) = match self.strategy {
                WorkStrategy::Replicate => (0, 1),
                WorkStrategy::Shard => (worker_id, self.workers),
            };
            let tx = tx.clone();
            let endpoints = Arc::clone(&endpoints);
            let progress = progress.clone();

            handles.push(tokio::spawn(async move {
                debug!(worker_id, "worker started");
                for endpoint in endpoints.iter().skip(start).step_by(step) {
                    let urls = generate(endpoint);
                    progress.inc_found(urls.len() as u64);
                    for url in urls {
                        if tx.send(url).await.is_err() {
                            return;
                        }
                    }
                    progress.inc();
                }
                debug!(worker_id, "worker finished");
            }));
        }
        // the channel closes once the last worker drops its sender
        drop(tx);

        let mut fuzzed_urls = Vec::new();
        while let Ok(url) = rx.recv().await {
            fuzzed_urls.push(url);
        }

        for joined in futures::future::join_all(handles).await {
            joined?;
        }

        Ok(fuzzed_urls)
    }
}
