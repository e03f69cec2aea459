//! Fork-join fan-out.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// A worker that panicked, or could not be started, during [`fan_out`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPanic {
    pub worker: usize,
    pub message: String,
}

/// Extracts the message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs `task(worker)` on `count` scoped threads and blocks until all finish.
///
/// Each worker sends its outcome through a shared channel; the channel is
/// drained once after the join. Results come back in worker order. A panic in
/// one worker is captured as [`WorkerPanic`] and does not affect the others;
/// a thread the OS refuses to create is reported the same way.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::fan_out;
///
/// let squares = fan_out(4, |worker| worker * worker);
/// let squares: Vec<usize> = squares.into_iter().map(Result::unwrap).collect();
/// assert_eq!(squares, vec![0, 1, 4, 9]);
/// ```
pub fn fan_out<T, F>(count: usize, task: F) -> Vec<Result<T, WorkerPanic>>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let (tx, rx) = crossbeam::channel::unbounded();

    thread::scope(|s| {
        for worker in 0..count {
            let task = &task;
            let worker_tx = tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("hyperpi-worker-{}", worker))
                .spawn_scoped(s, move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(worker)))
                        .map_err(|payload| WorkerPanic {
                            worker,
                            message: panic_message(payload.as_ref()),
                        });
                    // The receiver outlives the scope, so this cannot fail.
                    let _ = worker_tx.send((worker, outcome));
                });
            if let Err(e) = spawned {
                let _ = tx.send((
                    worker,
                    Err(WorkerPanic {
                        worker,
                        message: format!("failed to spawn worker thread: {}", e),
                    }),
                ));
            }
        }
    });
    drop(tx);

    let mut outcomes: Vec<(usize, Result<T, WorkerPanic>)> = rx.iter().collect();
    outcomes.sort_by_key(|(worker, _)| *worker);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_worker_runs_once() {
        let calls = AtomicUsize::new(0);
        let results = fan_out(16, |_| calls.fetch_add(1, Ordering::SeqCst));
        assert_eq!(results.len(), 16);
        assert_eq!(calls.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_results_in_worker_order() {
        let results = fan_out(8, |worker| worker);
        let workers: Vec<usize> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(workers, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_panic_is_isolated() {
        let results = fan_out(3, |worker| {
            if worker == 1 {
                panic!("worker one failed");
            }
            worker
        });
        assert_eq!(results[0], Ok(0));
        assert_eq!(
            results[1],
            Err(WorkerPanic {
                worker: 1,
                message: "worker one failed".to_string()
            })
        );
        assert_eq!(results[2], Ok(2));
    }

    #[test]
    fn test_workers_run_on_named_threads() {
        let names = fan_out(2, |_| thread::current().name().map(str::to_string));
        let names: Vec<Option<String>> = names.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            names,
            vec![
                Some("hyperpi-worker-0".to_string()),
                Some("hyperpi-worker-1".to_string())
            ]
        );
    }

    #[test]
    fn test_zero_workers() {
        let results: Vec<Result<(), WorkerPanic>> = fan_out(0, |_| ());
        assert!(results.is_empty());
    }

    #[test]
    fn test_formatted_panic_message() {
        let results = fan_out(1, |worker| -> usize { panic!("worker {} down", worker) });
        assert_eq!(results[0].as_ref().unwrap_err().message, "worker 0 down");
    }
}
