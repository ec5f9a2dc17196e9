//! Report data model
//!
//! The aggregate is `Report -> Finding -> ActionItem`. Finding and action
//! item numbering is always derived from position, never stored, so
//! removals renumber the remaining siblings automatically. Every field
//! has a defined display fallback; rendering is total over all values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Risk rating of a single finding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRating {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    #[serde(rename = "Not Set", alias = "Unset")]
    Unset,
}

impl RiskRating {
    /// Single-letter code used in the export table.
    ///
    /// Critical maps to "C"; an unset rating renders as "N/A".
    pub fn letter(&self) -> &'static str {
        match self {
            Self::Critical => "C",
            Self::High => "H",
            Self::Medium => "M",
            Self::Low => "L",
            Self::Unset => "N/A",
        }
    }
}

impl std::fmt::Display for RiskRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Unset => write!(f, "Not Set"),
        }
    }
}

/// One remediation task tied to a finding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionItem {
    pub name: String,
    pub description: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    pub due_date: String,
    pub owner: String,
    pub owner_senior_name: String,
    pub owner_team: String,
}

impl ActionItem {
    /// Display name, falling back to `Action Item {n}` (1-based).
    pub fn display_name(&self, ordinal: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Action Item {}", ordinal)
        } else {
            self.name.trim().to_string()
        }
    }

    /// Due date as `MM/DD/YY`, or the literal placeholder when the
    /// stored value is empty or not a valid ISO date.
    pub fn due_date_display(&self) -> String {
        format_due_date(&self.due_date)
    }

    pub fn owner_display(&self) -> String {
        non_blank_or(&self.owner, "Action Owner")
    }

    pub fn owner_senior_display(&self) -> String {
        non_blank_or(&self.owner_senior_name, "L8 name")
    }

    pub fn owner_team_display(&self) -> String {
        format!("({})", non_blank_or(&self.owner_team, "Team"))
    }
}

/// Format an ISO `YYYY-MM-DD` date as `MM/DD/YY`; anything else yields
/// the `MM/DD/YY` placeholder.
pub fn format_due_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%y").to_string(),
        Err(_) => "MM/DD/YY".to_string(),
    }
}

/// One audit observation with rating, description, and recommendations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Finding {
    pub short_name: String,
    pub rating: RiskRating,
    pub description: String,
    pub recommendations: String,
    pub action_items: Vec<ActionItem>,
}

impl Finding {
    /// Display name, falling back to `Finding {n}` (1-based).
    pub fn display_name(&self, ordinal: usize) -> String {
        if self.short_name.trim().is_empty() {
            format!("Finding {}", ordinal)
        } else {
            self.short_name.trim().to_string()
        }
    }

    pub fn description_display(&self) -> &str {
        non_blank_str_or(&self.description, "No description provided")
    }

    pub fn recommendations_display(&self) -> &str {
        non_blank_str_or(&self.recommendations, "No recommendations provided")
    }
}

/// Newline-delimited in-scope / out-of-scope lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope {
    pub included: String,
    pub excluded: String,
}

/// The report aggregate root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub audit_name: String,
    pub executive_summary: String,
    pub background: String,
    pub scope: Scope,
    pub findings: Vec<Finding>,
    pub appendix: String,
}

impl Report {
    /// Create a report with all-empty fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding; numbering is positional so no counter is kept.
    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Remove the finding at `index`; later findings renumber implicitly.
    /// Out-of-range indexes are ignored.
    pub fn remove_finding(&mut self, index: usize) {
        if index < self.findings.len() {
            self.findings.remove(index);
        }
    }

    /// Reset every field to its initial empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn audit_name_display(&self) -> &str {
        non_blank_str_or(&self.audit_name, "[AUDIT NAME]")
    }

    pub fn executive_summary_display(&self) -> &str {
        non_blank_str_or(&self.executive_summary, "No executive summary provided.")
    }

    pub fn background_display(&self) -> &str {
        non_blank_str_or(&self.background, "No background information provided.")
    }

    pub fn scope_included_display(&self) -> &str {
        non_blank_str_or(&self.scope.included, "No scope inclusions specified.")
    }

    pub fn scope_excluded_display(&self) -> &str {
        non_blank_str_or(&self.scope.excluded, "No scope exclusions specified.")
    }
}

/// Zero-padded finding number for a 0-based index: `01`, `02`, ... `10`.
pub fn finding_number(index: usize) -> String {
    format!("{:02}", index + 1)
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    non_blank_str_or(value, fallback).to_string()
}

fn non_blank_str_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
