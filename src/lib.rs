//! Order Desk Library
//!
//! This crate provides the core functionality for the Order Desk:
//! spreadsheet-based order intake, a validated order collection backed
//! by a JSON file, and shipping instructions over that collection.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod cli;
pub mod config;
pub mod entities;
pub mod errors;
pub mod ingest;
pub mod repositories;
pub mod services;

use serde::Serialize;

// Common response wrapper for list operations
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

pub mod prelude {
    pub use crate::entities::*;
    pub use crate::errors::*;
    pub use crate::repositories::*;
    pub use crate::services::*;
    pub use crate::PaginatedResponse;
}
