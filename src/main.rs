//! Runs the Storyclip HTTP server.
//!
//! Settings are read from the environment; see [`storyclip::config`].

use std::sync::Arc;

use mockable::DefaultClock;
use storyclip::config::Settings;
use storyclip::http::{AppState, create_router};
use storyclip::job::adapters::{ClipRangeValidator, HttpVideoProcessor, memory::InMemoryJobRepository};
use storyclip::job::services::{JobLifecycleService, ProcessingIntakeService};
use storyclip::observability::init_tracing;
use tokio::net::TcpListener;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = Settings::from_env()?;
    init_tracing(&settings.tracing, settings.server.port)?;

    let lifecycle = JobLifecycleService::new(
        Arc::new(InMemoryJobRepository::new()),
        Arc::new(DefaultClock),
    );
    let validator = settings
        .max_source_duration_secs
        .map_or_else(ClipRangeValidator::new, |limit| {
            ClipRangeValidator::new().with_max_source_duration(limit)
        });
    let processor =
        HttpVideoProcessor::new(&settings.processor.base_url, settings.processor.timeout)?;
    tracing::info!(render_url = processor.render_url(), "Processing backend configured");

    let intake = ProcessingIntakeService::new(lifecycle, Arc::new(validator), Arc::new(processor));
    let router = create_router(AppState::new(intake, settings.estimated_time));

    let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
