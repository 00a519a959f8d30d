//! Meal collection layer for Mealscope.
//!
//! Owns the in-memory meal log and its validation rules, the draft type used
//! while a meal is being put together, and the report pipeline that turns a
//! log snapshot into a serialisable insights report for downstream consumers.

pub mod draft;
pub mod log;
pub mod report;
pub mod summary;

pub use mealscope_core as core;
