//! Step definitions for job lifecycle BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
