//! HTTP surface for job intake and status queries.

pub mod handlers;

mod error;
mod router;
mod state;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
