//! Unit tests for job lifecycle management.
