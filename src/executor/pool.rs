//! Destination pool
//!
//! Hands out destinations exclusively to concurrently running jobs. A
//! semaphore sized to the destination count bounds how many jobs run at
//! once; a short mutex guards the available set and the sticky outcome.

#![allow(dead_code)]

use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::Destination;

/// Destination pool errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PoolError {
    #[error("no destinations configured")]
    NoDestinations,

    #[error("no destination available after admission")]
    Unavailable,
}

/// State shared by every job, only touched at checkout and return
struct PoolState {
    available: Vec<Destination>,
    successful: bool,
    failed_jobs: usize,
}

fn lock(state: &Mutex<PoolState>) -> MutexGuard<'_, PoolState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A destination held by one running job
///
/// Dropping it records the job outcome and returns the destination before
/// the admission permit is released, so a job that panics still recycles
/// its destination exactly once and counts as failed.
struct Checkout {
    destination: Destination,
    succeeded: bool,
    state: Arc<Mutex<PoolState>>,
    _permit: OwnedSemaphorePermit,
}

impl Checkout {
    fn succeed(&mut self) {
        self.succeeded = true;
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        state.successful &= self.succeeded;
        if !self.succeeded {
            state.failed_jobs += 1;
        }
        state.available.push(self.destination.clone());
        debug!(destination = %self.destination, "destination returned");
    }
}

/// Bounded pool of exclusive destinations
pub struct DestinationPool {
    capacity: usize,
    permits: Arc<Semaphore>,
    state: Arc<Mutex<PoolState>>,
    jobs: Vec<JoinHandle<()>>,
    submitted: usize,
}

impl DestinationPool {
    /// Create a pool over a non-empty set of destinations
    pub fn new(destinations: Vec<Destination>) -> Result<Self, PoolError> {
        if destinations.is_empty() {
            return Err(PoolError::NoDestinations);
        }

        let capacity = destinations.len();
        Ok(Self {
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
            state: Arc::new(Mutex::new(PoolState {
                available: destinations,
                successful: true,
                failed_jobs: 0,
            })),
            jobs: Vec::new(),
            submitted: 0,
        })
    }

    /// Run `action` on a free destination in a worker task
    ///
    /// Waits only until a destination is free, not for the job itself. An
    /// `Err` from the action marks the run as failed but never stops other
    /// jobs.
    pub async fn submit<F, Fut, E>(&mut self, action: F) -> Result<(), PoolError>
    where
        F: FnOnce(Destination) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PoolError::Unavailable)?;

        let destination = lock(&self.state)
            .available
            .pop()
            .ok_or(PoolError::Unavailable)?;
        debug!(%destination, "destination checked out");

        let mut checkout = Checkout {
            destination,
            succeeded: false,
            state: Arc::clone(&self.state),
            _permit: permit,
        };

        let handle = tokio::spawn(async move {
            let destination = checkout.destination.clone();
            match action(destination).await {
                Ok(()) => checkout.succeed(),
                Err(e) => warn!(destination = %checkout.destination, "job failed: {e}"),
            }
        });

        self.jobs.push(handle);
        self.submitted += 1;
        Ok(())
    }

    /// Wait for every submitted job, then report whether all succeeded
    pub async fn wait_for_finish(&mut self) -> bool {
        let jobs = std::mem::take(&mut self.jobs);
        for result in join_all(jobs).await {
            if let Err(e) = result {
                warn!("job task aborted: {e}");
            }
        }

        lock(&self.state).successful
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Jobs currently holding a destination
    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn failed_jobs(&self) -> usize {
        lock(&self.state).failed_jobs
    }

    /// Snapshot of the destinations not checked out
    pub fn available(&self) -> Vec<Destination> {
        lock(&self.state).available.clone()
    }
}
