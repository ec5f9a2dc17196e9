//! forgeaudit-core: audit report builder library
//!
//! Holds the report data model, the two renderers (line-numbered HTML
//! preview and DOCX export), the AI text enhancement adapter with its
//! deterministic fallback, and the session-keyed report store.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod enhance;
pub mod error;
pub mod providers;
pub mod render;
pub mod report;

pub use error::{Error, Result};
