//! Prompt templates for the review flow
//!
//! Every backend call instructs the model to answer in strict JSON; the
//! response module rejects anything that does not conform.

use crate::analyzer::AnalyzerSpec;
use crate::conflict::Conflict;
use crate::document::DocumentSnapshot;

/// Cap on document text embedded into a single prompt
const DOCUMENT_EXCERPT_CHARS: usize = 12_000;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for one analyzer's assessment
    pub fn analysis_system(analyzer: &AnalyzerSpec) -> String {
        format!(
            r#"You are the "{}" expert on a document review council.
Your expertise: {}.
Assess only your expertise area. Report concrete issues with evidence from the document.
Do not speculate about areas outside your expertise."#,
            analyzer.name(),
            analyzer.focus()
        )
    }

    /// User prompt for one analyzer's assessment
    pub fn analysis_prompt(document: &DocumentSnapshot, context: &str) -> String {
        format!(
            r#"Review guidelines:
{context}

Document: {name} ({mime})
--- document text ---
{text}
--- end document ---

Assess the document within your expertise area. Respond with JSON only:

{{
  "score": <0-100 overall quality in your area>,
  "findings": [
    {{
      "category": "<expertise area>",
      "description": "<what you observed>",
      "severity": "low" | "medium" | "high" | "critical",
      "confidence": <0.0-1.0>,
      "evidence": "<supporting detail from the document>",
      "recommendation": "<suggested fix>",
      "impact": "<why it matters>"
    }}
  ]
}}"#,
            context = context,
            name = document.name(),
            mime = document.mime(),
            text = document.excerpt(DOCUMENT_EXCERPT_CHARS),
        )
    }

    /// System prompt for the debate arbiter
    pub fn debate_system() -> &'static str {
        r#"You are the senior arbiter on a document review council.
Two experts disagree on the severity of what appears to be the same issue.
Weigh their evidence and confidence, decide the correct severity, and write
one consolidated description. Be decisive; do not split the difference."#
    }

    /// User prompt presenting one conflict for arbitration
    pub fn debate_prompt(conflict: &Conflict, document: &DocumentSnapshot, context: &str) -> String {
        let first = &conflict.first;
        let second = &conflict.second;

        format!(
            r#"Review guidelines:
{context}

Document: {name}

Two experts report what looks like the same issue with different severities.

--- Position 1: {a_name} ---
Description: {a_desc}
Severity: {a_sev}
Confidence: {a_conf}
Evidence: {a_ev}

--- Position 2: {b_name} ---
Description: {b_desc}
Severity: {b_sev}
Confidence: {b_conf}
Evidence: {b_ev}

Decide the issue. Respond with JSON only:

{{
  "severity": "low" | "medium" | "high" | "critical",
  "description": "<one consolidated description of the issue>",
  "confidence": <0.0-1.0>,
  "rationale": "<why you decided this way>"
}}"#,
            context = context,
            name = document.name(),
            a_name = first.analyzer,
            a_desc = first.description,
            a_sev = first.severity,
            a_conf = first.confidence,
            a_ev = first.evidence,
            b_name = second.analyzer,
            b_desc = second.description,
            b_sev = second.severity,
            b_conf = second.confidence,
            b_ev = second.evidence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::core::severity::Severity;
    use crate::finding::Finding;

    fn doc() -> DocumentSnapshot {
        DocumentSnapshot::new("brief.pdf", "application/pdf", "Partnership brief body text")
    }

    #[test]
    fn test_analysis_system_names_expertise() {
        let analyzer = AnalyzerSpec::new("brand-compliance", Model::default())
            .with_expertise(["colors", "typography"]);
        let prompt = PromptTemplate::analysis_system(&analyzer);

        assert!(prompt.contains("brand-compliance"));
        assert!(prompt.contains("colors, typography"));
    }

    #[test]
    fn test_analysis_prompt_embeds_document_and_context() {
        let prompt = PromptTemplate::analysis_prompt(&doc(), "Use the 2024 palette");

        assert!(prompt.contains("Partnership brief body text"));
        assert!(prompt.contains("Use the 2024 palette"));
        assert!(prompt.contains("\"severity\""));
    }

    #[test]
    fn test_debate_prompt_presents_both_positions() {
        let first = Finding::new("x", "layout", "logo too small on cover", Severity::Medium, 0.7)
            .unwrap()
            .with_evidence("Logo measures 9mm");
        let second =
            Finding::new("y", "brand", "logo size too small cover page", Severity::High, 0.8).unwrap();
        let conflict = Conflict::new(first, second, vec!["logo".into(), "small".into()]);

        let prompt = PromptTemplate::debate_prompt(&conflict, &doc(), "guidelines");

        assert!(prompt.contains("Position 1: x"));
        assert!(prompt.contains("Position 2: y"));
        assert!(prompt.contains("Logo measures 9mm"));
        assert!(prompt.contains("medium"));
        assert!(prompt.contains("high"));
    }
}
