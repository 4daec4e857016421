//! Bias metrics for clinical trial data and a client for the registry
//! bias-analysis service.
//!
//! - `metrics`: pure demographic and attrition bias computations
//! - `registry`: search / bias-analysis contract, HTTP client and
//!   latest-request-wins session state
//! - `datasets`: immutable sample data used by the demo
//! - `api`, `cli`: the HTTP surface and command-line entry points

pub mod api;
pub mod cli;
pub mod config;
pub mod datasets;
pub mod logging;
pub mod metrics;
pub mod registry;
