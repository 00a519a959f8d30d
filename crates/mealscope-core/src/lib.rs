//! Core domain model and analytics engine for Mealscope.
//!
//! Defines the meal data model, the stateless pattern-detection engine that
//! turns a snapshot of meal records into hour histograms, ratios, tag
//! frequencies and behavioural pattern flags, and the supporting time,
//! statistics and formatting helpers.

pub mod analytics;
pub mod error;
pub mod formatting;
pub mod models;
pub mod statistics;
pub mod time_utils;
