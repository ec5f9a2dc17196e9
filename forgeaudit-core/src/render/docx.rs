//! DOCX export renderer
//!
//! Encodes the same section ordering, fallbacks, and table layout as the
//! preview into a paginated document: US-Letter geometry from the report
//! template, Calibri 11pt body, a footer with the confidential marking
//! and a live page number field, and the findings table with vertical
//! merges translated from the shared layout's span annotations.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, PageMargin, PageNum, Paragraph, Run, RunFonts,
    Shading, Table, TableCell, TableCellBorderPosition, TableLayoutType, TableRow, VAlignType,
    VMergeType, WidthType,
};

use crate::render::layout::{layout_findings, TableRowSpec};
use crate::render::template;
use crate::report::Report;
use crate::{Error, Result};

// Page geometry in twips (US Letter, template margins).
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const MARGIN_TOP: i32 = 720;
const MARGIN_RIGHT: i32 = 907;
const MARGIN_BOTTOM: i32 = 963;
const MARGIN_LEFT: i32 = 775;
const HEADER_DISTANCE: i32 = 547;
const FOOTER_DISTANCE: i32 = 259;

// Half-point font sizes.
const SIZE_AUDIT_NAME: usize = 26;
const SIZE_HEADER: usize = 24;
const SIZE_FOOTER: usize = 20;
const SIZE_TABLE: usize = 18;

const COLOR_AUDIT_NAME: &str = "D2691E";
const COLOR_HEADER: &str = "556B2F";
const COLOR_APPENDIX: &str = "FF8C00";
const COLOR_RATING: &str = "FF0000";
const HEADER_SHADING: &str = "DCE6F1";

// Column widths in twips (2.5 / 8.75 / 3.5 / 2.06 / 2.28 cm).
const COLUMN_WIDTHS: [usize; 5] = [1418, 4961, 1985, 1168, 1293];
const TABLE_WIDTH: usize = 10714;

/// Export the report as DOCX bytes.
///
/// Fails only if document generation itself fails; no partial bytes are
/// returned.
pub fn export_docx(report: &Report) -> Result<Vec<u8>> {
    let docx = build_document(report);
    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Error::Export(format!("Failed to generate document: {}", e)))?;
    Ok(cursor.into_inner())
}

fn build_document(report: &Report) -> Docx {
    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_margin(
            PageMargin::new()
                .top(MARGIN_TOP)
                .right(MARGIN_RIGHT)
                .bottom(MARGIN_BOTTOM)
                .left(MARGIN_LEFT)
                .header(HEADER_DISTANCE)
                .footer(FOOTER_DISTANCE),
        )
        .default_fonts(RunFonts::new().ascii("Calibri"))
        .default_size(22)
        .footer(page_footer());

    // Audit name, styled apart from the section headers.
    docx = docx.add_paragraph(Paragraph::new().add_run(
        Run::new()
            .add_text(report.audit_name_display())
            .color(COLOR_AUDIT_NAME)
            .size(SIZE_AUDIT_NAME),
    ));
    docx = docx.add_paragraph(Paragraph::new());

    docx = docx.add_paragraph(section_header(template::EXECUTIVE_SUMMARY_HEADER));
    for p in body_paragraphs(report.executive_summary_display()) {
        docx = docx.add_paragraph(p);
    }
    docx = docx.add_paragraph(Paragraph::new());

    docx = docx.add_paragraph(section_header(template::BACKGROUND_HEADER));
    for p in body_paragraphs(report.background_display()) {
        docx = docx.add_paragraph(p);
    }
    docx = docx.add_paragraph(Paragraph::new());

    docx = docx.add_paragraph(section_header(template::SCOPE_HEADER));
    docx = docx.add_paragraph(body_paragraph(template::SCOPE_INTRO));
    for p in numbered_paragraphs(report.scope_included_display()) {
        docx = docx.add_paragraph(p);
    }
    docx = docx.add_paragraph(Paragraph::new());
    docx = docx.add_paragraph(body_paragraph(template::SCOPE_EXCLUDED_INTRO));
    for p in numbered_paragraphs(report.scope_excluded_display()) {
        docx = docx.add_paragraph(p);
    }
    docx = docx.add_paragraph(Paragraph::new());

    docx = docx.add_paragraph(section_header(template::FINDINGS_HEADER));
    docx = docx.add_paragraph(body_paragraph(template::FINDINGS_INTRO));
    docx = docx.add_table(findings_table(report));
    docx = docx.add_paragraph(Paragraph::new());

    if !report.appendix.trim().is_empty() {
        docx = docx.add_paragraph(Paragraph::new().add_run(
            Run::new()
                .add_text(template::APPENDIX_HEADER)
                .bold()
                .color(COLOR_APPENDIX)
                .size(SIZE_HEADER),
        ));
        for p in body_paragraphs(&report.appendix) {
            docx = docx.add_paragraph(p);
        }
    }

    docx
}

/// Footer shown on every page: confidential marking plus a live page
/// number field evaluated by the viewer.
fn page_footer() -> Footer {
    Footer::new()
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(
                    Run::new()
                        .add_text(template::CONFIDENTIAL_FOOTER)
                        .size(SIZE_FOOTER),
                ),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Right)
                .add_page_num(PageNum::new()),
        )
}

fn section_header(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).color(COLOR_HEADER).size(SIZE_HEADER))
}

fn body_paragraph(text: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Both)
        .add_run(Run::new().add_text(text))
}

/// One paragraph per newline-split segment; blank segments become empty
/// paragraphs so vertical spacing matches the preview.
fn body_paragraphs(text: &str) -> Vec<Paragraph> {
    text.split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                Paragraph::new()
            } else {
                body_paragraph(line)
            }
        })
        .collect()
}

/// Numbered list over non-blank lines; blanks are skipped, not numbered.
fn numbered_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut counter = 0;
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            counter += 1;
            body_paragraph(&format!("{}. {}", counter, line.trim()))
        })
        .collect()
}

fn findings_table(report: &Report) -> Table {
    let mut rows = vec![header_row()];
    for spec in layout_findings(&report.findings) {
        rows.push(body_row(&spec));
    }

    Table::new(rows)
        .set_grid(COLUMN_WIDTHS.to_vec())
        .layout(TableLayoutType::Fixed)
        .width(TABLE_WIDTH, WidthType::Dxa)
}

fn header_row() -> TableRow {
    let cells = template::FINDINGS_TABLE_HEADERS
        .iter()
        .map(|label| {
            let mut cell = TableCell::new()
                .vertical_align(VAlignType::Top)
                .shading(Shading::new().fill(HEADER_SHADING));
            for line in label.split('\n') {
                cell = cell.add_paragraph(
                    Paragraph::new().align(AlignmentType::Center).add_run(
                        Run::new().add_text(line).bold().size(SIZE_TABLE),
                    ),
                );
            }
            cell
        })
        .collect();
    TableRow::new(cells)
}

fn body_row(spec: &TableRowSpec) -> TableRow {
    let mut cells = Vec::with_capacity(5);

    match (&spec.finding, &spec.narrative) {
        (Some(finding), Some(narrative)) => {
            let mut finding_cell = TableCell::new()
                .vertical_align(VAlignType::Top)
                .add_paragraph(centered_text(&finding.number))
                .add_paragraph(centered_text(&finding.name))
                .add_paragraph(
                    Paragraph::new().align(AlignmentType::Center).add_run(
                        Run::new()
                            .add_text(finding.rating.letter())
                            .bold()
                            .color(COLOR_RATING)
                            .size(SIZE_TABLE),
                    ),
                );
            let mut narrative_cell = narrative_contents(narrative);

            if finding.span_rows > 1 {
                // Merge start; the bottom border belongs to the last
                // covered row.
                finding_cell = finding_cell
                    .vertical_merge(VMergeType::Restart)
                    .clear_border(TableCellBorderPosition::Bottom);
                narrative_cell = narrative_cell
                    .vertical_merge(VMergeType::Restart)
                    .clear_border(TableCellBorderPosition::Bottom);
            }
            cells.push(finding_cell);
            cells.push(narrative_cell);
        }
        _ => {
            for _ in 0..2 {
                let mut covered = TableCell::new()
                    .vertical_merge(VMergeType::Continue)
                    .add_paragraph(Paragraph::new());
                if !spec.bottom_border {
                    covered = covered.clear_border(TableCellBorderPosition::Bottom);
                }
                cells.push(covered);
            }
        }
    }

    let mut action_cell = TableCell::new().vertical_align(VAlignType::Top).add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text(&spec.action.label)
                .bold()
                .size(SIZE_TABLE),
        ),
    );
    if !spec.action.description.is_empty() {
        action_cell = action_cell.add_paragraph(multiline_text(&spec.action.description));
    }
    cells.push(action_cell);

    cells.push(
        TableCell::new()
            .vertical_align(VAlignType::Top)
            .add_paragraph(centered_text(&spec.due_date)),
    );

    cells.push(
        TableCell::new()
            .vertical_align(VAlignType::Top)
            .add_paragraph(centered_text(&spec.owner.owner))
            .add_paragraph(Paragraph::new())
            .add_paragraph(centered_text(&spec.owner.senior))
            .add_paragraph(centered_text(&spec.owner.team)),
    );

    TableRow::new(cells)
}

fn narrative_contents(narrative: &crate::render::layout::NarrativeCell) -> TableCell {
    TableCell::new()
        .vertical_align(VAlignType::Top)
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Finding Description: ").bold().size(SIZE_TABLE))
                .add_run(table_run(&narrative.description)),
        )
        .add_paragraph(Paragraph::new())
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Recommendations: ").bold().size(SIZE_TABLE))
                .add_run(table_run(&narrative.recommendations)),
        )
        .add_paragraph(Paragraph::new())
        .add_paragraph(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text("Business Owner Response: ")
                        .bold()
                        .size(SIZE_TABLE),
                )
                .add_run(table_run(template::BUSINESS_OWNER_RESPONSE)),
        )
}

fn centered_text(text: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_text(text).size(SIZE_TABLE))
}

fn multiline_text(text: &str) -> Paragraph {
    Paragraph::new().add_run(table_run(text))
}

/// 9pt run with embedded newlines converted to explicit line breaks.
fn table_run(text: &str) -> Run {
    let mut run = Run::new().size(SIZE_TABLE);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ActionItem, Finding, RiskRating};

    fn report_with_findings() -> Report {
        Report {
            audit_name: "Vendor Review".to_string(),
            executive_summary: "Summary line.".to_string(),
            appendix: "Rating scale.".to_string(),
            findings: vec![
                Finding {
                    short_name: "Stale access".to_string(),
                    rating: RiskRating::High,
                    description: "Accounts not removed.".to_string(),
                    recommendations: "Remove on exit.".to_string(),
                    action_items: vec![
                        ActionItem {
                            name: "Offboarding job".to_string(),
                            due_date: "2025-06-30".to_string(),
                            ..Default::default()
                        },
                        ActionItem::default(),
                    ],
                },
                Finding::default(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_produces_zip_container() {
        let bytes = export_docx(&report_with_findings()).unwrap();
        // A DOCX is a ZIP archive.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_export_empty_report_is_total() {
        let bytes = export_docx(&Report::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_document_xml_contains_sections_and_table() {
        let docx = build_document(&report_with_findings());
        let json = docx.json();
        assert!(json.contains("EXECUTIVE SUMMARY"));
        assert!(json.contains("FINDINGS AND ACTION ITEMS"));
        assert!(json.contains("Vendor Review"));
        assert!(json.contains("Offboarding job"));
        // Rating letter for a High finding.
        assert!(json.contains("\"H\""));
    }

    #[test]
    fn test_row_layout_spans_action_items() {
        let report = report_with_findings();
        let rows = layout_findings(&report.findings);
        // Two items on the first finding, one placeholder row for the
        // defaulted second finding.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].finding.as_ref().unwrap().span_rows, 2);
        assert!(rows[1].finding.is_none());
        assert!(rows[2].bottom_border);
    }
}
