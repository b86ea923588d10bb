use crate::models::AnalysisReport;

pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    match &report.maximum {
        Some(max) => {
            out.push_str(&format!("Largest value: {}\n", max.display));
            out.push_str(&format!("  from: {}\n", max.provenance));
            if let Some(page) = max.page {
                out.push_str(&format!("  page: {page}\n"));
            }
        }
        None if report.all_overflowed() => {
            out.push_str(&format!(
                "No rankable numbers in {}: {} literal(s) exceeded the exponent limit\n",
                report.source, report.diagnostics.overflowed
            ));
        }
        None => out.push_str(&format!("No numbers found in {}\n", report.source)),
    }

    if !report.top.is_empty() {
        out.push_str(&format!("\nTop {}:\n", report.top.len()));
        let width = report
            .top
            .iter()
            .map(|v| v.display.chars().count())
            .max()
            .unwrap_or(0);
        for value in &report.top {
            out.push_str(&format!(
                "{:>3}. {:>width$}  {}\n",
                value.rank, value.display, value.provenance
            ));
        }
    }

    out.push('\n');
    out.push_str(&diagnostics_line(report));
    out
}

pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    md.push_str("# Magnitude report\n\n");
    md.push_str(&format!("- Source: `{}`\n", report.source));
    md.push_str(&format!("- Mode: `{}`\n", report.mode.as_str()));
    md.push_str(&format!(
        "- Pages: `{}` (extraction errors: `{}`)\n",
        report.pages, report.page_errors
    ));
    match &report.maximum {
        Some(max) => md.push_str(&format!("- Largest: `{}`\n\n", max.display)),
        None => md.push_str("- Largest: `n/a`\n\n"),
    }

    md.push_str("## Top values\n\n");
    md.push_str("| rank | value | literal | scale | multiplier | page |\n");
    md.push_str("|---:|---:|---|---|---:|---:|\n");
    for value in &report.top {
        md.push_str(&format!(
            "| `{}` | `{}` | `{}` | `{}` | `{}` | `{}` |\n",
            value.rank,
            value.display,
            escape_cell(&value.literal),
            escape_cell(value.matched.as_deref().unwrap_or(value.source.as_str())),
            value.multiplier,
            value.page.map_or("n/a".to_string(), |p| p.to_string()),
        ));
    }
    md.push('\n');

    let d = &report.diagnostics;
    md.push_str("## Diagnostics\n\n");
    md.push_str(&format!("- Literals seen: `{}`\n", d.literals_seen));
    md.push_str(&format!("- Ranked: `{}`\n", d.literals_ranked));
    md.push_str(&format!("- Overflowed: `{}`\n", d.overflowed));
    md.push_str(&format!("- Rejected candidates: `{}`\n", d.rejected_candidates));
    md.push_str(&format!("- Input truncated: `{}`\n", d.input_truncated));
    md
}

fn diagnostics_line(report: &AnalysisReport) -> String {
    let d = &report.diagnostics;
    let mut line = format!(
        "Literals: {} seen, {} ranked, {} overflowed, {} rejected",
        d.literals_seen, d.literals_ranked, d.overflowed, d.rejected_candidates
    );
    if d.input_truncated {
        line.push_str(" (input truncated)");
    }
    if report.page_errors > 0 {
        line.push_str(&format!(", {} page(s) unreadable", report.page_errors));
    }
    line
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnitude_document::ExtractedDocument;
    use magnitude_scale::{Analyzer, AnalyzerConfig};
    use std::path::Path;

    fn report_for(text: &str) -> AnalysisReport {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let document = ExtractedDocument {
            pages: vec![text.to_string()],
            page_errors: 0,
        };
        let result = analyzer.analyze_pages(&document.pages);
        AnalysisReport::new(
            Path::new("summary.txt"),
            analyzer.config(),
            &document,
            &result,
        )
    }

    #[test]
    fn text_report_lists_maximum_and_provenance() {
        let report = report_for("Revenue: $3.5 million. Population: 450,000. Budget in billions: 2.1");
        let text = render_text(&report);
        assert!(text.starts_with("Largest value: 2,100,000,000.00\n"));
        assert!(text.contains("from: 2.1 (scaled by billions: x1000000000)"));
        assert!(text.contains("Top 3:"));
        assert!(text.contains("  3. "));
        assert!(text.contains("Literals: 3 seen, 3 ranked, 0 overflowed, 0 rejected"));
    }

    #[test]
    fn text_report_without_numbers() {
        let text = render_text(&report_for("nothing to see"));
        assert!(text.starts_with("No numbers found in summary.txt"));
        assert!(!text.contains("Top"));
    }

    #[test]
    fn text_report_when_everything_overflowed() {
        let text = render_text(&report_for("value is 10^5000"));
        assert!(text.contains("1 literal(s) exceeded the exponent limit"));
    }

    #[test]
    fn markdown_report_renders_table() {
        let md = render_markdown(&report_for("150K users and 10^120 atoms"));
        assert!(md.starts_with("# Magnitude report\n"));
        assert!(md.contains("| rank | value | literal | scale | multiplier | page |"));
        assert!(md.contains("| `1` | `1.00e120` | `10^120` | `10^120` |"));
        assert!(md.contains("| `2` | `150,000.00` | `150K` | `K` | `1000` | `1` |"));
        assert!(md.contains("- Literals seen: `2`"));
    }

    #[test]
    fn escape_cell_escapes_pipes() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
