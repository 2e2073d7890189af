//! Asynchronous video-processing job lifecycle.
//!
//! A processing request is normalized, validated, recorded as a `PENDING`
//! job and handed to a background task that drives the job through
//! `PROCESSING` to `COMPLETED` or `FAILED`. Status queries read the most
//! recently committed job record. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
