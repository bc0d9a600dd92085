pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Layered boundaries: application use cases, adapters, domain shapes
pub mod app;
pub mod domain;
pub mod infra;

pub mod dashboard;
pub mod observability;
pub mod pipeline;
pub mod web;
