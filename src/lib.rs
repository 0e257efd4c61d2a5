//! xrde2e - listMethods mock responder and E2E monitoring dashboard
//!
//! Two independent pieces share this crate:
//!
//! - [`mock`] answers `listMethods` RPC calls by echoing the envelope with the
//!   method name rewritten to `listMethodsResponse`.
//! - [`dashboard`] polls a monitoring API for request records and renders
//!   them, with on-demand history for a single security server.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod logging;
pub mod metrics;
pub mod mock;
pub mod monitor;
