//! Core filtering and rendering pipeline for the RoadWatch incident map.
//!
//! The modules mirror the browser dashboard's filter-panel flow while
//! providing canonical query serialization, stale-fetch rejection, and a
//! presenter that is testable without a live map widget.

pub mod controller;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod incident;
pub mod prelude;
pub mod presenter;
pub mod render;
pub mod telemetry;
