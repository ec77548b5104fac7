//! burnup-core library.
//!
//! Replays a board's action log into per-card state and aggregates it into
//! burnup chart series.
//!
//! ```text
//! BoardExport ──► Replay ──► reportable cards ──► BurnupReport
//!  (export)       (replay)                         (report)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums per concern, classified with
//!   [`error::Classify`]. `anyhow` stays in the binary.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod chart;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod model;
pub mod replay;
pub mod report;

pub use export::BoardExport;
pub use replay::Replay;
pub use report::BurnupReport;
