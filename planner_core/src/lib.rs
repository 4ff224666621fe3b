#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for the workout planner.
//!
//! This crate provides:
//! - Domain types (exercises, requests, typed bit-sets)
//! - Catalog management with snapshot replacement
//! - Hard-constraint filtering and multi-factor scoring
//! - Greedy time-budgeted scheduler
//! - Boundary records, export, and configuration

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod filter;
pub mod scoring;
pub mod timing;
pub mod recovery;
pub mod engine;
pub mod records;
pub mod api;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{Catalog, CatalogStore, LoadReport};
pub use config::Config;
pub use engine::{solve, Schedule, ScheduledEntry, StopReason};
pub use records::{ExerciseRecord, SolveRequestRecord, WeightsRecord};
pub use recovery::{RecoveryWindows, TrainingEntry};
