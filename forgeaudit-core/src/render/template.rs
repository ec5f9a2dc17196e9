//! Fixed template text shared by the preview and the export
//!
//! The single source of truth for every literal the rendered report
//! contains. Both renderers read from here; nothing below depends on
//! report content.

pub const EXECUTIVE_SUMMARY_HEADER: &str = "EXECUTIVE SUMMARY";
pub const BACKGROUND_HEADER: &str = "BACKGROUND";
pub const SCOPE_HEADER: &str = "SCOPE";
pub const FINDINGS_HEADER: &str = "FINDINGS AND ACTION ITEMS";
pub const APPENDIX_HEADER: &str = "APPENDIX A -- RATING";

pub const EXECUTIVE_SUMMARY_COMMENT: &str =
    "// Include reason for audit, high level scope, high level findings //";
pub const BACKGROUND_COMMENT: &str =
    "// Include context and background of the teams, process, systems //";

pub const SCOPE_INTRO: &str = "The audit team gained an understanding of the processes, \
systems, and controls applicable to the review period. The scope included:";
pub const SCOPE_EXCLUDED_INTRO: &str =
    "For this inspection, the following areas were out of scope:";

pub const FINDINGS_INTRO: &str = "Findings and action items resulting from the inspection \
are detailed in the table below. All metrics reported in the findings are based on \
information related to the review period, unless otherwise noted. Action items will be \
tracked in AIM.";

/// Static placeholder; never sourced from stored data.
pub const BUSINESS_OWNER_RESPONSE: &str = "We agree with the finding.";

pub const FINDINGS_TABLE_HEADERS: [&str; 5] = [
    "Finding, Name,\nRating, Ref",
    "Finding, Recommendation(s) &\nBusiness Owner Response",
    "Action Item(s)",
    "Due Date",
    "Owner (L8+)\nTeam",
];

pub const NO_ACTION_ITEMS: &str = "No action items";
pub const DUE_DATE_PLACEHOLDER: &str = "MM/DD/YY";

pub const CONFIDENTIAL_FOOTER: &str = "Company Confidential";
