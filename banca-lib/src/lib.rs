//! Banca API client library
//!
//! An async client for the bank's REST API: customers, accounts, movements
//! and reports. Every failure is normalized into an [`error::ApiError`]
//! carrying one human-readable message; nothing is retried.

pub mod api;
pub mod error;
pub mod model;

mod client;

pub use client::*;
