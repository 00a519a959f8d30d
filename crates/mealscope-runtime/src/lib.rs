//! Runtime orchestration layer for Mealscope.
//!
//! Keeps analytics computation off any blocking path: a TTL-cached report
//! manager over a shared meal log, and a tokio orchestrator that pushes
//! fresh insight snapshots to consumers through a channel.

pub mod orchestrator;
pub mod report_manager;

pub use mealscope_core as core;
pub use mealscope_log as log;
