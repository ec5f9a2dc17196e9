//! Deterministic enhancement fallback
//!
//! Pure text transform used when no provider is configured or the
//! provider call fails. Same inputs always produce byte-identical
//! output, and the transform itself can never fail.

/// Enhance `current` for `section` using boilerplate templates plus
/// keyword-triggered augmentations from `prompt`.
pub fn enhance(section: &str, prompt: &str, current: &str) -> String {
    let mut enhanced = section_template(section, current);
    let prompt_lower = prompt.to_lowercase();

    if prompt_lower.contains("professional") || prompt_lower.contains("formal") {
        enhanced = title_case(&enhanced);
    }

    if prompt_lower.contains("detailed") || prompt_lower.contains("comprehensive") {
        enhanced.push_str(
            "\n\nAdditional detailed analysis and supporting evidence have been incorporated \
             to provide comprehensive insights and actionable recommendations.",
        );
    }

    if prompt_lower.contains("executive") || prompt_lower.contains("summary") {
        enhanced = format!("Executive Overview: {}", enhanced);
    }

    if prompt_lower.contains("improve") || prompt_lower.contains("enhance") {
        enhanced.push_str(
            "\n\nThis enhancement focuses on clarity, professional presentation, and \
             strategic value for stakeholder review.",
        );
    }

    enhanced
}

/// Per-section boilerplate, splicing in `current` when present
fn section_template(section: &str, current: &str) -> String {
    let has_content = !current.trim().is_empty();

    match section {
        "Executive Summary" => {
            if has_content {
                format!(
                    "{}\n\nThis comprehensive executive summary provides strategic insights \
                     into the audit findings and recommendations for organizational improvement.",
                    current
                )
            } else {
                "This comprehensive audit review identifies key operational areas requiring \
                 attention and provides strategic recommendations for enhanced efficiency and \
                 risk mitigation."
                    .to_string()
            }
        }
        "Background" => {
            if has_content {
                format!(
                    "{}\n\nAdditional context: This background section establishes the \
                     foundation for understanding the audit scope, methodology, and strategic \
                     importance of the reviewed processes.",
                    current
                )
            } else {
                "This audit was conducted to evaluate critical business processes, internal \
                 controls, and compliance measures to ensure operational excellence and risk \
                 management."
                    .to_string()
            }
        }
        "Audit Name" => {
            if has_content {
                format!("{} - Comprehensive Process Review", current)
            } else {
                "Comprehensive Business Process Audit Review".to_string()
            }
        }
        "Finding Short Name" => {
            if has_content {
                format!("{} - Critical Assessment", current)
            } else {
                "Process Control Assessment".to_string()
            }
        }
        "Finding Description" => {
            if has_content {
                format!(
                    "Detailed Analysis: {}\n\nThis finding represents a significant \
                     operational area requiring immediate attention to ensure regulatory \
                     compliance and process effectiveness.",
                    current
                )
            } else {
                "This finding requires immediate attention to ensure operational compliance \
                 and process integrity."
                    .to_string()
            }
        }
        "Action Item Short Name" => {
            if has_content {
                format!("{} - Implementation Strategy", current)
            } else {
                "Process Improvement Implementation".to_string()
            }
        }
        "Action Item Description" => {
            if has_content {
                format!(
                    "Implementation Plan: {}\n\nThis action item should be prioritized with \
                     clear timelines, responsible parties, and success metrics to address \
                     identified risks and improve operational controls.",
                    current
                )
            } else {
                "This action item addresses critical process improvements and risk mitigation \
                 measures with defined implementation timelines."
                    .to_string()
            }
        }
        "Recommendations" => {
            if has_content {
                format!(
                    "Enhanced Recommendations: {}\n\nAdditional strategic considerations \
                     include process automation, regular monitoring protocols, comprehensive \
                     staff training, and continuous improvement initiatives.",
                    current
                )
            } else {
                "Implement comprehensive process improvements including enhanced monitoring, \
                 staff training, and regular compliance assessments."
                    .to_string()
            }
        }
        "Scope" => {
            if has_content {
                format!(
                    "{}\n\nThis comprehensive scope encompasses detailed analysis of business \
                     processes, internal control evaluation, compliance assessment, and risk \
                     management review within the defined audit parameters.",
                    current
                )
            } else {
                "Comprehensive audit scope including process analysis, control evaluation, \
                 compliance assessment, and strategic risk management review."
                    .to_string()
            }
        }
        "Appendix" => {
            if has_content {
                format!(
                    "{}\n\nThis appendix provides detailed supporting documentation, audit \
                     methodology references, and additional technical specifications for \
                     comprehensive review.",
                    current
                )
            } else {
                "Detailed supporting documentation including audit methodology, compliance \
                 frameworks, and technical specifications."
                    .to_string()
            }
        }
        _ => {
            // Unknown sections get the generic template.
            let section_lower = section.to_lowercase();
            if has_content {
                format!(
                    "{}\n\nThis {} has been enhanced for professional presentation and \
                     executive review.",
                    current, section_lower
                )
            } else {
                format!(
                    "Professional {} content developed for strategic decision-making and \
                     executive presentation.",
                    section_lower
                )
            }
        }
    }
}

/// Title-case every word: first alphanumeric of a word uppercased, the
/// rest lowercased; non-word characters pass through unchanged.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
                in_word = true;
            }
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_across_calls() {
        let a = enhance("Executive Summary", "make it detailed", "We reviewed payments.");
        let b = enhance("Executive Summary", "make it detailed", "We reviewed payments.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_known_section_splices_current_content() {
        let out = enhance("Background", "", "The team processes invoices.");
        assert!(out.starts_with("The team processes invoices."));
        assert!(out.contains("Additional context:"));
    }

    #[test]
    fn test_unknown_section_uses_generic_template() {
        let out = enhance("Glossary", "", "");
        assert!(out.contains("Professional glossary content"));
    }

    #[test]
    fn test_professional_trigger_title_cases() {
        let out = enhance("Audit Name", "make it professional", "vendor payment audit");
        assert!(out.starts_with("Vendor Payment Audit"));
    }

    #[test]
    fn test_detailed_trigger_appends_elaboration() {
        let out = enhance("Scope", "comprehensive please", "");
        assert!(out.ends_with("actionable recommendations."));
    }

    #[test]
    fn test_executive_trigger_prepends_overview() {
        let out = enhance("Background", "summary", "context");
        assert!(out.starts_with("Executive Overview: "));
    }

    #[test]
    fn test_improve_trigger_appends_closing() {
        let out = enhance("Appendix", "improve this", "");
        assert!(out.ends_with("stakeholder review."));
    }

    #[test]
    fn test_title_case_preserves_punctuation() {
        assert_eq!(title_case("hello, WORLD-wide"), "Hello, World-Wide");
    }
}
