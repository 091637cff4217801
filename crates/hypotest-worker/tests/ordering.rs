//! Ordering guarantees under rapid resubmission

use hypotest_domain::ScanRequest;
use hypotest_worker::{ScanWorker, WorkerConfig};
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn newest_request_wins() {
    let mut worker = ScanWorker::new(WorkerConfig::responsive()).unwrap();
    let mut receiver = worker.subscribe();

    let requests: Vec<ScanRequest> = (0..20)
        .map(|i| ScanRequest::new(2_000 + i * 500, 0.35, 0.95))
        .collect();

    let mut last = 0;
    for request in &requests {
        last = worker.submit(*request).unwrap();
    }

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        loop {
            if let Some(result) = receiver.borrow_and_update().clone() {
                seen.push(result.generation);
                if result.generation == last {
                    return seen;
                }
            }
            if receiver.changed().await.is_err() {
                return seen;
            }
        }
    });

    let result = worker.wait_for(last).await.unwrap();
    let expected = hypotest_stats::scan(requests.last().unwrap()).unwrap();
    assert_eq!(result.boundary, expected);
    assert_eq!(result.request, *requests.last().unwrap());

    let seen = tokio::time::timeout(Duration::from_secs(5), observer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(seen.last(), Some(&last));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "generations went backwards: {:?}", seen);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_request_is_accounted_for() {
    let mut worker = ScanWorker::new(WorkerConfig::responsive()).unwrap();

    let mut last = 0;
    for i in 0..10 {
        last = worker.submit(ScanRequest::new(5_000 + i, 0.5, 0.975)).unwrap();
    }
    worker.wait_for(last).await.unwrap();

    // Superseded scans finish by cancellation or as discarded stale results
    let mut settled = false;
    for _ in 0..400 {
        let metrics = worker.metrics();
        if metrics.completed + metrics.total_dropped() == metrics.submitted {
            settled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let metrics = worker.metrics();
    assert!(settled, "unsettled metrics:\n{}", metrics.summary());
    assert_eq!(metrics.submitted, 10);
    assert!(metrics.completed >= 1);
}
