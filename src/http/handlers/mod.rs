//! Route handlers.

mod health;
mod jobs;
mod process_video;

pub use health::health_handler;
pub use jobs::{job_handler, job_status_handler, list_jobs_handler};
pub use process_video::process_video_handler;
