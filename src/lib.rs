//! Compliance-check result rendering for childcare groups
//!
//! This crate turns per-day GGD staffing check results (BKR ratio, VGC
//! familiar-face and three-hour rule outcomes per time slice) into
//! readable summaries, result tables and spreadsheet, CSV, JSON or PDF
//! exports, and serves them over a small HTTP API.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod report;
