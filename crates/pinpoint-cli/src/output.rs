//! Output formatting for synthesis results

use console::style;
use pinpoint::{DialectRendering, LocatorCandidate, LocatorSet, Reliability};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::CliResult;

/// Output format for `synth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Everything `synth` reports for one element
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthReport {
    /// How the element was selected (`#id`, `path 0.1`, `[attr]`)
    pub target: String,
    /// Abstract locator set
    pub locators: LocatorSet,
    /// Per-dialect renderings, in request order
    pub renderings: Vec<DialectRendering>,
    /// Requested dialect names that have no emitter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<String>,
}

impl SynthReport {
    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Text => Ok(render_text(self)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

fn reliability_label(reliability: Reliability) -> String {
    match reliability {
        Reliability::High => style(reliability).green().to_string(),
        Reliability::Medium => style(reliability).yellow().to_string(),
        Reliability::Low => style(reliability).red().to_string(),
    }
}

fn candidate_line(out: &mut String, candidate: &LocatorCandidate) {
    let _ = writeln!(
        out,
        "  {} {:<12} {}",
        candidate.priority,
        candidate.strategy_type.name(),
        candidate.expression
    );
}

/// Human-readable report
#[must_use]
pub fn render_text(report: &SynthReport) -> String {
    let set = &report.locators;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", style("Element:").bold(), report.target);
    let _ = writeln!(
        out,
        "{} {} ({}, priority {})",
        style("Primary:").bold(),
        style(&set.primary.expression).cyan(),
        set.primary.strategy_type,
        set.primary.priority
    );
    let _ = writeln!(
        out,
        "{} {}  {} {}",
        style("Reliability:").bold(),
        reliability_label(set.reliability),
        style("Specificity:").bold(),
        set.specificity
    );
    if !set.css_path.is_empty() {
        let _ = writeln!(out, "{} {}", style("CSS path:").bold(), set.css_path);
        let _ = writeln!(out, "{} {}", style("XPath:").bold(), set.xpath);
    }

    let _ = writeln!(out, "\n{}", style("Candidates:").bold());
    for candidate in &set.alternatives {
        candidate_line(&mut out, candidate);
    }

    for rendering in &report.renderings {
        let _ = writeln!(out, "\n{}", style(rendering.dialect).bold().underlined());
        let _ = writeln!(out, "  recommended  {}", rendering.recommended);
        let _ = writeln!(out, "  click        {}", rendering.click);
        let _ = writeln!(out, "  wait         {}", rendering.wait);
        if let Some(xpath) = &rendering.xpath {
            let _ = writeln!(out, "  xpath        {xpath}");
        }
        for alternative in rendering.alternatives.iter().skip(1) {
            let _ = writeln!(
                out,
                "  {:<12} {}",
                alternative.strategy.name(),
                style(&alternative.expression).dim()
            );
        }
    }

    for name in &report.unsupported {
        let _ = writeln!(
            out,
            "\n{} no emitter for dialect '{name}'; use the candidates above",
            style("note:").yellow()
        );
    }

    out.trim_end().to_string()
}
