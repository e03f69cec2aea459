//! Concurrency workloads.
//!
//! These bodies spawn their own tasks, so each fan-out worker exercises lock
//! contention and message passing on top of the outer parallelism.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use hyperpi_core::{Category, RateUnit, ScoreModel, Workload, WorkloadError, WorkloadInput};

const MUTEX_OPERATIONS: usize = 1_000_000;
const CHANNEL_MESSAGES: usize = 1_000_000;
const CHANNEL_CAPACITY: usize = 100;
const TASKS_PER_BATCH: usize = 10;
const BATCH_OPERATIONS: usize = 10_000;
const HANDOFF_MESSAGES: usize = 10_000;
const BARRIER_ROUNDS: usize = 100;

/// Mutex counter, channel handoff and barrier rounds.
pub fn mutex_barrier() -> Workload {
    Workload::new(
        "mutex-barrier",
        Category::Concurrency,
        MUTEX_OPERATIONS,
        mutex_barrier_body,
    )
    .with_description("contended mutex increments, channel handoff and join barriers")
    .with_work(1.0)
    .with_unit(RateUnit::Invocations)
    .with_score_model(ScoreModel::Latency)
}

/// One producer, one consumer over a bounded channel.
pub fn channel_messaging() -> Workload {
    Workload::new(
        "channel-messaging",
        Category::Concurrency,
        CHANNEL_MESSAGES,
        channel_body,
    )
    .with_description("1M messages through a bounded channel of capacity 100")
    .with_work(1.0)
    .with_unit(RateUnit::Invocations)
    .with_score_model(ScoreModel::Latency)
}

fn mutex_barrier_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let counter = Mutex::new(0u64);
    let mut remaining = input.size;
    while remaining > 0 {
        let batch = remaining.min(BATCH_OPERATIONS);
        let per_task = batch.div_ceil(TASKS_PER_BATCH);
        rayon::scope(|s| {
            let mut left = batch;
            while left > 0 {
                let ops = left.min(per_task);
                left -= ops;
                let counter = &counter;
                s.spawn(move |_| {
                    for _ in 0..ops {
                        if let Ok(mut guard) = counter.lock() {
                            *guard += 1;
                        }
                    }
                });
            }
        });
        remaining -= batch;
    }

    let count = counter
        .into_inner()
        .map_err(|e| WorkloadError::Corrupted(format!("counter poisoned: {}", e)))?;
    if count != input.size as u64 {
        return Err(WorkloadError::Corrupted(format!(
            "counter reached {} of {}",
            count, input.size
        )));
    }

    let received = send_all(HANDOFF_MESSAGES)?;

    for _ in 0..BARRIER_ROUNDS {
        rayon::scope(|s| {
            for _ in 0..TASKS_PER_BATCH {
                s.spawn(|_| thread::sleep(Duration::from_micros(1)));
            }
        });
    }

    Ok(count ^ received)
}

fn channel_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    send_all(input.size)
}

// Sends 0..messages from this thread and sums them on a receiver thread.
fn send_all(messages: usize) -> Result<u64, WorkloadError> {
    let (tx, rx) = crossbeam::channel::bounded::<u64>(CHANNEL_CAPACITY);
    let total = thread::scope(|s| {
        let receiver = s.spawn(move || rx.iter().fold(0u64, |acc, v| acc.wrapping_add(v)));
        for i in 0..messages as u64 {
            if tx.send(i).is_err() {
                break;
            }
        }
        drop(tx);
        receiver.join()
    })
    .map_err(|_| WorkloadError::Corrupted("receiver thread panicked".to_string()))?;

    let expected = (0..messages as u64).fold(0u64, |acc, v| acc.wrapping_add(v));
    if total != expected {
        return Err(WorkloadError::Corrupted(format!(
            "received checksum {} != {}",
            total, expected
        )));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutex_counter_exact() {
        let input = WorkloadInput::for_worker(12_345, 0, 0);
        assert!(mutex_barrier_body(&input).is_ok());
    }

    #[test]
    fn test_channel_sum() {
        let input = WorkloadInput::for_worker(1000, 0, 0);
        assert_eq!(channel_body(&input).unwrap(), 999 * 1000 / 2);
    }

    #[test]
    fn test_channel_empty() {
        assert_eq!(send_all(0).unwrap(), 0);
    }
}
