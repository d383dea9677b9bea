//! Ostriv - storefront catalog client
//!
//! Loads categories and products from the Ostriv headless CMS, keeps them in
//! a single-flight TTL cache that falls back to the last known data during
//! outages, and drives the storefront's debounced product search.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod cms;
pub mod config;
pub mod error;
pub mod navigation;
pub mod search;
pub mod storefront;
pub mod ui;

pub use error::{OstrivError, OstrivResult};
