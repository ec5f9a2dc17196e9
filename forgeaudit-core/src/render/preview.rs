//! Line-numbered HTML preview renderer
//!
//! Pure function of the report value plus the fixed template text. Every
//! logical unit (header, comment, body line, numbered scope item, blank
//! spacer) consumes exactly one line number; the findings table and the
//! appendix follow the numbered stream. All user text is escaped before
//! it reaches the markup.

use crate::render::layout::{layout_findings, TableRowSpec};
use crate::render::template;
use crate::report::Report;

const PREVIEW_STYLE: &str = r#"<style>
.preview-report { font-family: 'Calibri', Arial, sans-serif; line-height: 1.2; color: #000; padding: 20px; background: white; }
.content-line { display: flex; margin: 0; padding: 1px 0; }
.line-num { width: 25px; font-size: 10px; color: #666; text-align: right; margin-right: 10px; flex-shrink: 0; }
.line-content { flex: 1; font-size: 11px; }
.header-line .line-content { font-weight: bold; text-transform: uppercase; color: #90EE90; font-size: 14px; }
.header-line.audit-name .line-content { color: #FF8C00; font-size: 18px; }
.comment-line .line-content { font-style: italic; color: #666; font-size: 10px; }
.rating { color: #FF0000; font-weight: bold; }
</style>"#;

/// Escape text for embedding in HTML markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text and convert embedded newlines to explicit line breaks
fn escape_multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// Monotonically line-numbered content stream
struct LineWriter {
    html: String,
    line: usize,
}

impl LineWriter {
    fn new() -> Self {
        Self {
            html: String::new(),
            line: 1,
        }
    }

    /// Emit one content line; `content` must already be escaped.
    fn push(&mut self, content: &str, class: &str) {
        let line_class = if class.is_empty() {
            "content-line".to_string()
        } else {
            format!("content-line {}", class)
        };
        self.html.push_str(&format!(
            "<div class=\"{}\"><span class=\"line-num\">{}</span><span class=\"line-content\">{}</span></div>",
            line_class, self.line, content
        ));
        self.line += 1;
    }

    fn header(&mut self, text: &str) {
        self.push(&escape_html(text), "header-line");
    }

    fn comment(&mut self, text: &str) {
        self.push(&escape_html(text), "comment-line");
    }

    fn blank(&mut self) {
        self.push("&nbsp;", "");
    }

    /// One line per newline-split segment; blank segments become a
    /// non-breaking blank line.
    fn body(&mut self, text: &str) {
        for segment in text.split('\n') {
            if segment.trim().is_empty() {
                self.push("&nbsp;", "");
            } else {
                self.push(&escape_html(segment), "");
            }
        }
    }

    /// Numbered list over the non-blank lines of `text`; blank lines are
    /// skipped and do not consume a number.
    fn numbered(&mut self, text: &str) {
        let mut counter = 0;
        for line in text.split('\n') {
            if line.trim().is_empty() {
                continue;
            }
            counter += 1;
            self.push(&format!("{}. {}", counter, escape_html(line)), "");
        }
    }
}

/// Render the report as a self-contained HTML fragment.
///
/// Total over all well-formed reports; missing fields fall back to their
/// defined placeholder text and rendering never fails.
pub fn render_preview(report: &Report) -> String {
    let mut w = LineWriter::new();

    w.push(
        &escape_html(report.audit_name_display()),
        "header-line audit-name",
    );
    w.blank();

    w.header(template::EXECUTIVE_SUMMARY_HEADER);
    w.comment(template::EXECUTIVE_SUMMARY_COMMENT);
    w.body(report.executive_summary_display());
    w.blank();

    w.header(template::BACKGROUND_HEADER);
    w.comment(template::BACKGROUND_COMMENT);
    w.body(report.background_display());
    w.blank();

    w.header(template::SCOPE_HEADER);
    w.push(&escape_html(template::SCOPE_INTRO), "");
    w.numbered(report.scope_included_display());
    w.blank();
    w.push(&escape_html(template::SCOPE_EXCLUDED_INTRO), "");
    w.numbered(report.scope_excluded_display());
    w.blank();

    w.header(template::FINDINGS_HEADER);
    w.push(&escape_html(template::FINDINGS_INTRO), "");

    let mut html = String::new();
    html.push_str(PREVIEW_STYLE);
    html.push_str("<div class=\"preview-report\">");
    html.push_str(&w.html);
    html.push_str(&render_findings_table(report));

    if !report.appendix.trim().is_empty() {
        html.push_str(&format!(
            "<div style=\"margin-top: 30px;\"><h2 style=\"color: #FF8C00; font-size: 14px; \
             font-weight: bold; text-transform: uppercase; margin: 10px 0;\">{}</h2>\
             <p style=\"font-size: 11px; margin: 0;\">{}</p></div>",
            escape_html(template::APPENDIX_HEADER),
            escape_multiline(&report.appendix)
        ));
    }

    html.push_str("</div>");
    html
}

fn render_findings_table(report: &Report) -> String {
    let mut html = String::from(
        "<table style=\"width: 100%; border-collapse: collapse; margin: 10px 0; \
         font-size: 10px; border: 1px solid #000;\"><thead><tr style=\"background-color: #f0f0f0;\">",
    );
    for header in template::FINDINGS_TABLE_HEADERS {
        html.push_str(&format!(
            "<th style=\"border: 1px solid #000; padding: 6px; text-align: center; \
             font-weight: bold;\">{}</th>",
            escape_html(&header.replace('\n', " "))
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for row in layout_findings(&report.findings) {
        html.push_str(&render_table_row(&row));
    }

    html.push_str("</tbody></table>");
    html
}

fn render_table_row(row: &TableRowSpec) -> String {
    const CELL: &str = "border: 1px solid #000; padding: 6px; vertical-align: top;";

    let mut html = String::from("<tr>");

    // HTML's native merge primitive is rowspan, so covered rows simply
    // omit the finding-level cells.
    if let (Some(finding), Some(narrative)) = (&row.finding, &row.narrative) {
        html.push_str(&format!(
            "<td rowspan=\"{}\" style=\"{} width: 15%; text-align: center; font-weight: bold;\">\
             {}<br>{}<br><br><span class=\"rating\">{}</span></td>",
            finding.span_rows,
            CELL,
            escape_html(&finding.number),
            escape_html(&finding.name),
            escape_html(&finding.rating.to_string()),
        ));
        html.push_str(&format!(
            "<td rowspan=\"{}\" style=\"{} width: 50%;\">\
             <strong>Finding Description:</strong><br>{}<br><br>\
             <strong>Recommendations:</strong><br>{}<br><br>\
             <strong>Business Owner Response:</strong><br>{}</td>",
            narrative.span_rows,
            CELL,
            escape_multiline(&narrative.description),
            escape_multiline(&narrative.recommendations),
            escape_html(template::BUSINESS_OWNER_RESPONSE),
        ));
    }

    let action = if row.action.description.is_empty() {
        format!(
            "<div style=\"font-weight: bold;\">{}</div>",
            escape_html(&row.action.label)
        )
    } else {
        format!(
            "<div style=\"font-weight: bold;\">{}</div><div style=\"margin-top: 4px;\">{}</div>",
            escape_html(&row.action.label),
            escape_multiline(&row.action.description)
        )
    };
    html.push_str(&format!("<td style=\"{} width: 20%;\">{}</td>", CELL, action));
    html.push_str(&format!(
        "<td style=\"{} width: 10%; text-align: center;\">{}</td>",
        CELL,
        escape_html(&row.due_date)
    ));
    html.push_str(&format!(
        "<td style=\"{} width: 15%; text-align: center;\">{}<br>{}<br>{}</td>",
        CELL,
        escape_html(&row.owner.owner),
        escape_html(&row.owner.senior),
        escape_html(&row.owner.team)
    ));

    html.push_str("</tr>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ActionItem, Finding, RiskRating};

    fn sample_report() -> Report {
        Report {
            audit_name: "Critical Vendor Review".to_string(),
            executive_summary: "line1\nline2".to_string(),
            background: "Context.".to_string(),
            scope: crate::report::Scope {
                included: "a\n\nb".to_string(),
                excluded: "c".to_string(),
            },
            findings: vec![Finding {
                short_name: "Late payments".to_string(),
                rating: RiskRating::Medium,
                description: "Payments late.\nRepeatedly.".to_string(),
                recommendations: "Pay on time.".to_string(),
                action_items: vec![
                    ActionItem {
                        name: "Fix schedule".to_string(),
                        due_date: "2025-03-05".to_string(),
                        ..Default::default()
                    },
                    ActionItem::default(),
                ],
            }],
            appendix: "Rating definitions.".to_string(),
        }
    }

    #[test]
    fn test_line_numbers_increment_from_one() {
        let html = render_preview(&Report::default());
        assert!(html.contains("<span class=\"line-num\">1</span>"));
        assert!(html.contains("<span class=\"line-num\">2</span>"));
        // Line numbering never repeats.
        assert_eq!(html.matches("<span class=\"line-num\">1</span>").count(), 1);
    }

    #[test]
    fn test_section_order_and_headers() {
        let html = render_preview(&sample_report());
        let exec = html.find("EXECUTIVE SUMMARY").unwrap();
        let background = html.find("BACKGROUND").unwrap();
        let scope = html.find(">SCOPE<").unwrap();
        let findings = html.find("FINDINGS AND ACTION ITEMS").unwrap();
        let appendix = html.find("APPENDIX A -- RATING").unwrap();
        assert!(exec < background && background < scope);
        assert!(scope < findings && findings < appendix);
    }

    #[test]
    fn test_newlines_become_separate_lines() {
        let html = render_preview(&sample_report());
        assert!(html.contains(">line1</span>"));
        assert!(html.contains(">line2</span>"));
        assert!(!html.contains("line1\\nline2"));
    }

    #[test]
    fn test_scope_numbering_skips_blank_lines() {
        let html = render_preview(&sample_report());
        assert!(html.contains(">1. a</span>"));
        assert!(html.contains(">2. b</span>"));
        assert!(!html.contains(">3. b</span>"));
    }

    #[test]
    fn test_rowspan_and_row_count() {
        let html = render_preview(&sample_report());
        assert_eq!(html.matches("rowspan=\"2\"").count(), 2);
        // Header row plus two action item rows.
        assert_eq!(html.matches("<tr").count(), 3);
        assert!(html.contains("1.1. Fix schedule"));
        assert!(html.contains("1.2. Action Item 2"));
        assert!(html.contains("03/05/25"));
        assert!(html.contains("MM/DD/YY"));
    }

    #[test]
    fn test_empty_report_renders_fallbacks() {
        let html = render_preview(&Report::default());
        assert!(html.contains("[AUDIT NAME]"));
        assert!(html.contains("No executive summary provided."));
        assert!(html.contains("No background information provided."));
        // Header row only.
        assert_eq!(html.matches("<tr").count(), 1);
        // Blank appendix is omitted entirely.
        assert!(!html.contains("APPENDIX"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut report = Report::default();
        report.audit_name = "<script>alert(1)</script>".to_string();
        report.executive_summary = "a & b < c".to_string();
        let html = render_preview(&report);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b &lt; c"));
    }

    #[test]
    fn test_boilerplate_response_present() {
        let html = render_preview(&sample_report());
        assert!(html.contains("We agree with the finding."));
    }
}
