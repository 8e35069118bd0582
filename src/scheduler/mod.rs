//! Scheduled jobs
//!
//! Recurring work is explicit timer registrations owned by a [`JobSet`]
//! built at process start; there is no annotation-driven scheduling. Two job
//! families exist:
//!
//! - [`relay`] - fixed-interval fetch-and-persist (default hourly)
//! - [`digest`] - time-of-day sessions delivering a formatted proverb
//!
//! Jobs run as independent tokio tasks on the shared runtime; they may
//! overlap each other and request-driven work, and none of them can take the
//! process down. A probe or backoff sleep inside one job suspends only that
//! job's task.
//!
//! # Modules
//!
//! - [`relay`] - the hourly relay job
//! - [`digest`] - the three digest sessions
//! - [`trigger`] - time-of-day trigger arithmetic

pub mod digest;
pub mod relay;
pub mod trigger;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::models::DigestSession;

pub use digest::DigestScheduler;
pub use relay::RelayScheduler;

/// Handles to the spawned recurring jobs
pub struct JobSet {
    handles: Vec<JoinHandle<()>>,
}

impl JobSet {
    /// Spawn the configured jobs onto the current runtime
    pub fn spawn(
        relay: Option<Arc<RelayScheduler>>,
        digest: Option<Arc<DigestScheduler>>,
    ) -> Self {
        let mut handles = Vec::new();

        if let Some(relay) = relay {
            info!("starting relay job");
            handles.push(tokio::spawn(async move { relay.run().await }));
        }

        if let Some(digest) = digest {
            for session in DigestSession::all() {
                let digest = Arc::clone(&digest);
                info!(session = %session, "starting digest session");
                handles.push(tokio::spawn(async move {
                    digest.run_session(session).await;
                }));
            }
        }

        Self { handles }
    }

    /// Number of running jobs
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Abort all jobs (used on shutdown)
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
        info!("scheduled jobs stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_job_set() {
        let jobs = JobSet::spawn(None, None);
        assert!(jobs.is_empty());
        jobs.shutdown();
    }
}
