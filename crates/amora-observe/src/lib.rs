//! Observability utilities for Amora.

pub mod tracing_setup;
