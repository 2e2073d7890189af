//! Shared application state for handlers.

use crate::job::{
    ports::{JobRepository, RequestValidator, VideoProcessor},
    services::{JobLifecycleService, ProcessingIntakeService},
};
use mockable::Clock;
use std::sync::Arc;

/// Shared state handed to every handler.
pub struct AppState<R, V, P, C>
where
    R: JobRepository,
    V: RequestValidator,
    P: VideoProcessor,
    C: Clock + Send + Sync,
{
    /// Intake service accepting processing requests.
    pub intake: ProcessingIntakeService<R, V, P, C>,
    /// Processing time estimate returned with accepted jobs.
    pub estimated_time: Arc<str>,
}

impl<R, V, P, C> Clone for AppState<R, V, P, C>
where
    R: JobRepository,
    V: RequestValidator,
    P: VideoProcessor,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            intake: self.intake.clone(),
            estimated_time: Arc::clone(&self.estimated_time),
        }
    }
}

impl<R, V, P, C> AppState<R, V, P, C>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates handler state.
    #[must_use]
    pub fn new(
        intake: ProcessingIntakeService<R, V, P, C>,
        estimated_time: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            intake,
            estimated_time: estimated_time.into(),
        }
    }

    /// Returns the lifecycle service used for job lookups.
    #[must_use]
    pub const fn jobs(&self) -> &JobLifecycleService<R, C> {
        self.intake.lifecycle()
    }
}
