//! Report data model and storage

pub mod model;
pub mod store;

pub use model::{ActionItem, Finding, Report, RiskRating, Scope};
pub use store::{ReportStore, DEFAULT_SESSION};
