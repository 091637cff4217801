//! Cancellable background critical-value scans

use crate::{WorkerConfig, WorkerError, WorkerMetrics};
use hypotest_domain::ScanRequest;
use hypotest_stats::{scan_until, ScanOutcome, StatsError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::debug;

/// Boundary located for one submitted request
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Generation the request was submitted as
    pub generation: u64,
    /// The request
    pub request: ScanRequest,
    /// Boundary (NaN when none exists)
    pub boundary: f64,
    /// Set when the scan rejected its parameters
    pub error: Option<StatsError>,
}

impl ScanResult {
    /// The boundary, or the scan's parameter error
    pub fn into_boundary(self) -> Result<f64, WorkerError> {
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(self.boundary),
        }
    }
}

/// Pending result of one submitted generation
///
/// Holds no borrow of the worker, so a caller can keep submitting while an
/// older ticket is still being awaited elsewhere.
pub struct ScanTicket {
    generation: u64,
    shared: Arc<Shared>,
    receiver: watch::Receiver<Option<ScanResult>>,
    config: WorkerConfig,
}

impl ScanTicket {
    /// Generation this ticket waits for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the result of this generation
    ///
    /// # Errors
    ///
    /// `Superseded` when a newer request was submitted in the meantime,
    /// `Timeout` when nothing arrives within `result_timeout_ms`.
    pub async fn wait(mut self) -> Result<ScanResult, WorkerError> {
        let generation = self.generation;
        let arrived = self
            .receiver
            .wait_for(|slot| slot.as_ref().is_some_and(|r| r.generation >= generation));

        let result = match timeout(self.config.result_timeout(), arrived).await {
            Err(_) => {
                return Err(WorkerError::Timeout {
                    generation,
                    timeout_ms: self.config.result_timeout_ms,
                })
            }
            Ok(Err(_)) => return Err(WorkerError::Closed),
            Ok(Ok(slot)) => (*slot).clone(),
        };

        let latest = self.shared.generation.load(Ordering::Acquire);
        match result {
            Some(r) if r.generation == generation && latest == generation => Ok(r),
            Some(r) => Err(WorkerError::Superseded {
                generation,
                latest: latest.max(r.generation),
            }),
            None => Err(WorkerError::Closed),
        }
    }
}

/// State shared between the worker handle and its blocking tasks
struct Shared {
    generation: AtomicU64,
    results: watch::Sender<Option<ScanResult>>,
    metrics: Mutex<WorkerMetrics>,
}

impl Shared {
    fn metrics(&self) -> MutexGuard<'_, WorkerMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    /// Publish a result unless its request was superseded
    ///
    /// The check runs under the channel lock, so an older result can never
    /// replace a newer one that is already visible.
    fn publish(&self, result: ScanResult) -> bool {
        let generation = result.generation;
        let exhausted = result.error.is_none() && result.boundary.is_nan();

        let published = self.results.send_if_modified(|slot| {
            let newer_visible = slot.as_ref().is_some_and(|r| r.generation >= generation);
            if newer_visible || !self.is_current(generation) {
                return false;
            }
            *slot = Some(result);
            true
        });

        let mut metrics = self.metrics();
        if published {
            metrics.record_completion(exhausted);
            debug!(generation, "Published scan result");
        } else {
            metrics.record_stale();
            debug!(generation, "Discarded stale scan result");
        }
        published
    }
}

/// Boundary and error of a finished scan, None when cancelled
fn run_scan<F>(request: &ScanRequest, cancelled: F) -> Option<(f64, Option<StatsError>)>
where
    F: FnMut() -> bool,
{
    match scan_until(request, cancelled) {
        Ok(ScanOutcome::Cancelled) => None,
        Ok(outcome) => Some((outcome.boundary().unwrap_or(f64::NAN), None)),
        Err(e) => Some((f64::NAN, Some(e))),
    }
}

/// Runs binomial critical-value scans off the interactive thread
///
/// Every [`submit`](ScanWorker::submit) starts a new generation and cancels
/// the scan in flight. Only a result whose generation is still current when
/// it finishes is published, so observers see the newest request's boundary
/// and never a superseded one.
///
/// # Examples
///
/// ```
/// use hypotest_domain::ScanRequest;
/// use hypotest_worker::{ScanWorker, WorkerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut worker = ScanWorker::new(WorkerConfig::responsive())?;
///     let boundary = worker.scan(ScanRequest::new(40, 0.35, 0.95)).await?;
///     assert_eq!(boundary, 18.5);
///     Ok(())
/// }
/// ```
pub struct ScanWorker {
    config: WorkerConfig,
    shared: Arc<Shared>,
    in_flight: Option<Arc<AtomicBool>>,
}

impl ScanWorker {
    /// Create a new worker with the given configuration
    pub fn new(config: WorkerConfig) -> Result<Self, WorkerError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::build(WorkerConfig::default())
    }

    fn build(config: WorkerConfig) -> Self {
        let (results, _) = watch::channel(None);
        Self {
            config,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                results,
                metrics: Mutex::new(WorkerMetrics::new()),
            }),
            in_flight: None,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Start a scan for `request`, superseding any earlier one
    ///
    /// Small samples (up to `inline_threshold`) are scanned before this
    /// returns; larger ones run on tokio's blocking pool. Returns the
    /// generation to pass to [`wait_for`](ScanWorker::wait_for).
    ///
    /// # Errors
    ///
    /// `Worker` when a background scan is needed outside a tokio runtime.
    pub fn submit(&mut self, request: ScanRequest) -> Result<u64, WorkerError> {
        let inline = request.sample_size <= self.config.inline_threshold;
        let runtime = if inline {
            None
        } else {
            Some(
                tokio::runtime::Handle::try_current()
                    .map_err(|e| WorkerError::Worker(e.to_string()))?,
            )
        };

        self.cancel_in_flight();
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.shared.metrics().record_submission(inline);

        let Some(runtime) = runtime else {
            debug!(generation, n = request.sample_size, "Scanning inline");
            if let Some((boundary, error)) = run_scan(&request, || false) {
                self.shared.publish(ScanResult {
                    generation,
                    request,
                    boundary,
                    error,
                });
            }
            return Ok(generation);
        };

        let cancel = Arc::new(AtomicBool::new(false));
        self.in_flight = Some(Arc::clone(&cancel));
        let shared = Arc::clone(&self.shared);
        let interval = self.config.cancel_check_interval;

        debug!(generation, n = request.sample_size, "Submitting background scan");
        runtime.spawn_blocking(move || {
            let mut steps = 0u64;
            let outcome = run_scan(&request, || {
                steps += 1;
                steps % interval == 0
                    && (cancel.load(Ordering::Acquire) || !shared.is_current(generation))
            });

            match outcome {
                Some((boundary, error)) => {
                    shared.publish(ScanResult {
                        generation,
                        request,
                        boundary,
                        error,
                    });
                }
                None => {
                    shared.metrics().record_cancellation();
                    debug!(generation, "Background scan cancelled");
                }
            }
        });

        Ok(generation)
    }

    /// Cancel the scan in flight; its result will never be published
    pub fn cancel(&mut self) {
        self.cancel_in_flight();
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(flag) = self.in_flight.take() {
            flag.store(true, Ordering::Release);
        }
    }

    /// Most recently issued generation
    pub fn current_generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    /// Newest published result
    pub fn latest(&self) -> Option<ScanResult> {
        self.shared.results.borrow().clone()
    }

    /// Receiver notified whenever a result is published
    pub fn subscribe(&self) -> watch::Receiver<Option<ScanResult>> {
        self.shared.results.subscribe()
    }

    /// Ticket for the result of `generation`, usable after `self` is borrowed again
    pub fn ticket(&self, generation: u64) -> ScanTicket {
        ScanTicket {
            generation,
            shared: Arc::clone(&self.shared),
            receiver: self.subscribe(),
            config: self.config.clone(),
        }
    }

    /// Wait for the result of `generation`
    ///
    /// # Errors
    ///
    /// See [`ScanTicket::wait`].
    pub async fn wait_for(&self, generation: u64) -> Result<ScanResult, WorkerError> {
        self.ticket(generation).wait().await
    }

    /// Submit `request` and wait for its boundary
    pub async fn scan(&mut self, request: ScanRequest) -> Result<f64, WorkerError> {
        let generation = self.submit(request)?;
        self.wait_for(generation).await?.into_boundary()
    }

    /// Snapshot of the worker's metrics
    pub fn metrics(&self) -> WorkerMetrics {
        self.shared.metrics().clone()
    }

    /// Reset the worker's metrics counters
    pub fn reset_metrics(&mut self) {
        self.shared.metrics().reset();
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
