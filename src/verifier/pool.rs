//! Fixed-size worker pool over a shared queue

use super::{LinkVerification, ProgressCallback};
use crate::state::CONNECTION_FAILED;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Runs `check` over every URL with at most `concurrency` in flight
///
/// `min(concurrency, urls.len())` workers each pull the next URL from a
/// shared FIFO until it is empty. The call returns once every worker has
/// finished. A URL whose worker died without reporting is returned as a
/// failed check so the map always covers the whole input.
pub(crate) async fn run_workers<F, Fut>(
    urls: Vec<String>,
    concurrency: usize,
    progress: Option<ProgressCallback>,
    check: F,
) -> HashMap<String, LinkVerification>
where
    F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = LinkVerification> + Send + 'static,
{
    let total = urls.len();
    let mut results = HashMap::with_capacity(total);
    if total == 0 {
        return results;
    }

    let workers = concurrency.clamp(1, total);
    let queue = Arc::new(Mutex::new(VecDeque::from(urls.clone())));
    let checked = Arc::new(AtomicUsize::new(0));
    let mut set = JoinSet::new();

    for worker_id in 0..workers {
        let queue = queue.clone();
        let checked = checked.clone();
        let progress = progress.clone();
        let check = check.clone();

        set.spawn(async move {
            let mut done = Vec::new();
            loop {
                let next = queue.lock().await.pop_front();
                let Some(url) = next else {
                    break;
                };

                let verification = check(url).await;
                let count = checked.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(ref callback) = progress {
                    callback(count, total);
                }
                done.push(verification);
            }
            tracing::trace!("Verifier worker {} finished after {} links", worker_id, done.len());
            done
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(done) => {
                for verification in done {
                    results.insert(verification.url.clone(), verification);
                }
            }
            Err(e) => tracing::error!("Verifier worker failed: {}", e),
        }
    }

    for url in urls {
        results.entry(url.clone()).or_insert_with(|| LinkVerification {
            url,
            status: CONNECTION_FAILED,
            error: Some("Check did not complete".to_string()),
        });
    }

    results
}
