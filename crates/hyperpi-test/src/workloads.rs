//! Workload fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyperpi_core::{Category, Workload, WorkloadError, WorkloadInput};

/// A workload that sums `0..size` with a seed-dependent offset.
///
/// Cheap enough to run hundreds of times in a unit test.
pub fn spin_workload(name: &str, category: Category, size: usize) -> Workload {
    Workload::new(name, category, size, |input: &WorkloadInput| {
        let mut acc = input.seed;
        for i in 0..input.size as u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        Ok(acc)
    })
    .with_description("test spin loop")
    .with_score_scale(0.001)
}

/// A workload whose body always returns an error.
pub fn failing_workload(name: &str, category: Category) -> Workload {
    Workload::new(name, category, 1, |_: &WorkloadInput| {
        Err(WorkloadError::Corrupted("fixture failure".to_string()))
    })
}

/// A workload whose body panics on `worker`.
///
/// Other workers, including the single-worker baseline when `worker != 0`,
/// succeed.
pub fn panicking_workload(name: &str, category: Category, worker: usize) -> Workload {
    Workload::new(name, category, 1, move |input: &WorkloadInput| {
        if input.worker == worker {
            panic!("fixture panic on worker {}", worker);
        }
        Ok(input.seed)
    })
}

/// A workload that counts its invocations.
pub fn counting_workload(name: &str, category: Category) -> (Workload, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let shared = Arc::clone(&counter);
    let workload = Workload::new(name, category, 1, move |_: &WorkloadInput| {
        Ok(shared.fetch_add(1, Ordering::SeqCst) as u64)
    });
    (workload, counter)
}
