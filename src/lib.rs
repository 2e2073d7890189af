//! Storyclip: asynchronous video-processing job service.
//!
//! Clients submit clip-editing requests over HTTP. Each accepted request
//! becomes a job that a background task drives through an external
//! FFmpeg-based processing backend, while clients poll for its status.
//!
//! # Architecture
//!
//! Storyclip follows hexagonal architecture principles:
//!
//! - **Domain**: Job state machine and request normalization
//! - **Ports**: Abstract trait interfaces for storage, validation and
//!   processing
//! - **Adapters**: Concrete implementations of ports (in-memory storage,
//!   HTTP processing client)
//!
//! # Modules
//!
//! - [`job`]: Job lifecycle, intake and background execution
//! - [`http`]: axum routes for intake and status queries
//! - [`observability`]: Tracing setup and request correlation
//! - [`config`]: Environment-driven settings

pub mod config;
pub mod http;
pub mod job;
pub mod observability;
