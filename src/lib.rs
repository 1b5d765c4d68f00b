//! Fundtrack - single-fund AUM tracker
//!
//! This library records buys, sells and AUM valuations for one fund and
//! derives its performance: percentage change over fixed look-back windows
//! and a cash-flow-neutral time-weighted return curve.

pub mod config;
pub mod db;
pub mod error;
pub mod reports;
pub mod utils;
