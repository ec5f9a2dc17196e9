//! Findings table layout
//!
//! Turns the findings sequence into physical table rows with explicit
//! row-span and border annotations. Each target format translates
//! `span_rows` into its native merge primitive (HTML `rowspan`, DOCX
//! vertical merge); the layout never mutates previously emitted rows.

use crate::render::template;
use crate::report::model::finding_number;
use crate::report::{Finding, RiskRating};

/// First-column cell, present only on a finding's first physical row
#[derive(Debug, Clone, PartialEq)]
pub struct FindingCell {
    /// Zero-padded display number (`01`, `02`, ...)
    pub number: String,
    pub name: String,
    pub rating: RiskRating,
    /// Physical rows this cell covers (>= 1)
    pub span_rows: usize,
}

/// Second-column cell: description, recommendations, and the static
/// business owner response boilerplate
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeCell {
    pub description: String,
    pub recommendations: String,
    pub span_rows: usize,
}

/// Third-column cell: one action item (or the no-items placeholder)
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCell {
    /// `"{finding}.{item}. {name}"`, or the placeholder text
    pub label: String,
    pub description: String,
}

/// Fifth-column cell: the three accountability fields
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerCell {
    pub owner: String,
    pub senior: String,
    pub team: String,
}

/// One physical row of the findings table body
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowSpec {
    /// Populated only on the finding's first row; covered rows carry None
    pub finding: Option<FindingCell>,
    pub narrative: Option<NarrativeCell>,
    pub action: ActionCell,
    pub due_date: String,
    pub owner: OwnerCell,
    /// True only on the finding's last physical row; earlier rows
    /// suppress the bottom border of the spanned columns
    pub bottom_border: bool,
}

/// Compute the physical rows for the findings table body.
///
/// A finding with zero action items yields exactly one row with
/// placeholder action/due/owner cells; a finding with N items yields N
/// rows, the first carrying the finding-level cells with `span_rows = N`.
pub fn layout_findings(findings: &[Finding]) -> Vec<TableRowSpec> {
    let mut rows = Vec::new();

    for (index, finding) in findings.iter().enumerate() {
        let ordinal = index + 1;
        let span = finding.action_items.len().max(1);

        let finding_cell = FindingCell {
            number: finding_number(index),
            name: finding.display_name(ordinal),
            rating: finding.rating,
            span_rows: span,
        };
        let narrative_cell = NarrativeCell {
            description: finding.description_display().to_string(),
            recommendations: finding.recommendations_display().to_string(),
            span_rows: span,
        };

        if finding.action_items.is_empty() {
            rows.push(TableRowSpec {
                finding: Some(finding_cell),
                narrative: Some(narrative_cell),
                action: ActionCell {
                    label: template::NO_ACTION_ITEMS.to_string(),
                    description: String::new(),
                },
                due_date: template::DUE_DATE_PLACEHOLDER.to_string(),
                owner: OwnerCell {
                    owner: "Action Owner".to_string(),
                    senior: "L8 name".to_string(),
                    team: "(Team)".to_string(),
                },
                bottom_border: true,
            });
            continue;
        }

        for (item_index, item) in finding.action_items.iter().enumerate() {
            let first = item_index == 0;
            let last = item_index == finding.action_items.len() - 1;

            rows.push(TableRowSpec {
                finding: first.then(|| finding_cell.clone()),
                narrative: first.then(|| narrative_cell.clone()),
                action: ActionCell {
                    label: format!(
                        "{}.{}. {}",
                        ordinal,
                        item_index + 1,
                        item.display_name(item_index + 1)
                    ),
                    description: item.description.trim().to_string(),
                },
                due_date: item.due_date_display(),
                owner: OwnerCell {
                    owner: item.owner_display(),
                    senior: item.owner_senior_display(),
                    team: item.owner_team_display(),
                },
                bottom_border: last,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ActionItem;

    fn finding_with_items(count: usize) -> Finding {
        Finding {
            short_name: "Unreconciled payments".to_string(),
            rating: RiskRating::High,
            description: "Payments were not reconciled.".to_string(),
            recommendations: "Reconcile monthly.".to_string(),
            action_items: (0..count)
                .map(|i| ActionItem {
                    name: format!("Task {}", i + 1),
                    due_date: "2025-03-05".to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_zero_action_items_yields_one_placeholder_row() {
        let rows = layout_findings(&[finding_with_items(0)]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.finding.as_ref().unwrap().span_rows, 1);
        assert_eq!(row.action.label, "No action items");
        assert_eq!(row.due_date, "MM/DD/YY");
        assert_eq!(row.owner.owner, "Action Owner");
        assert!(row.bottom_border);
    }

    #[test]
    fn test_n_action_items_yield_n_rows_with_span_on_first() {
        let rows = layout_findings(&[finding_with_items(3)]);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].finding.as_ref().unwrap().span_rows, 3);
        assert!(rows[1].finding.is_none());
        assert!(rows[2].finding.is_none());

        assert!(!rows[0].bottom_border);
        assert!(!rows[1].bottom_border);
        assert!(rows[2].bottom_border);

        assert_eq!(rows[0].action.label, "1.1. Task 1");
        assert_eq!(rows[2].action.label, "1.3. Task 3");
        assert_eq!(rows[0].due_date, "03/05/25");
    }

    #[test]
    fn test_finding_numbering_is_positional() {
        let mut findings = vec![
            finding_with_items(1),
            finding_with_items(2),
            finding_with_items(1),
        ];
        let rows = layout_findings(&findings);
        assert_eq!(rows[0].finding.as_ref().unwrap().number, "01");
        assert_eq!(rows[1].finding.as_ref().unwrap().number, "02");
        assert_eq!(rows[3].finding.as_ref().unwrap().number, "03");

        // Removing the middle finding renumbers the one after it.
        findings.remove(1);
        let rows = layout_findings(&findings);
        let numbers: Vec<_> = rows
            .iter()
            .filter_map(|r| r.finding.as_ref().map(|f| f.number.clone()))
            .collect();
        assert_eq!(numbers, vec!["01", "02"]);
        assert_eq!(rows[1].action.label, "2.1. Task 1");
    }

    #[test]
    fn test_empty_findings_produce_no_rows() {
        assert!(layout_findings(&[]).is_empty());
    }

    #[test]
    fn test_fallback_names_flow_into_labels() {
        let finding = Finding {
            action_items: vec![ActionItem::default()],
            ..Default::default()
        };
        let rows = layout_findings(&[finding]);
        assert_eq!(rows[0].finding.as_ref().unwrap().name, "Finding 1");
        assert_eq!(rows[0].action.label, "1.1. Action Item 1");
    }
}
