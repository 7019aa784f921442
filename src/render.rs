//! Plain-text result renderer.
//!
//! Consumes an [`AnalysisResult`] only — it is never told which engine
//! produced it. Used by the CLI one-shot mode.

use std::fmt::Write;

use crate::analyzer::AnalysisResult;

/// Format an analysis as a terminal-friendly report.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("Possible conditions (educational only):\n");
    for (i, condition) in result.conditions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}  [confidence {:.2}, urgency {}]",
            i + 1,
            condition.condition_name,
            condition.confidence,
            condition.urgency,
        );
    }

    if !result.next_steps.is_empty() {
        out.push_str("\nRecommended next steps:\n");
        for step in &result.next_steps {
            let _ = writeln!(out, "  - {step}");
        }
    }

    let _ = write!(out, "\n{}", result.disclaimer);
    out
}
