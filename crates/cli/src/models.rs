use magnitude_document::ExtractedDocument;
use magnitude_scale::{
    format, AnalysisMode, AnalyzerConfig, Diagnostics, RankedResult, ScaleSource, ScaledNumber,
};
use serde::Serialize;
use std::path::Path;

/// Decimal places shown in human-readable values
pub const DISPLAY_DECIMALS: u32 = 2;

/// Everything printed for one analyzed document
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub mode: AnalysisMode,
    pub pages: usize,
    pub page_errors: usize,
    pub maximum: Option<RankedValue>,
    pub top: Vec<RankedValue>,
    pub diagnostics: Diagnostics,
}

/// One ranked value; numbers are exact decimal strings
#[derive(Debug, Clone, Serialize)]
pub struct RankedValue {
    pub rank: usize,
    pub value: String,
    pub display: String,
    pub literal: String,
    pub source: ScaleSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    pub multiplier: String,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    pub provenance: String,
}

impl AnalysisReport {
    pub fn new(
        path: &Path,
        config: &AnalyzerConfig,
        document: &ExtractedDocument,
        result: &RankedResult,
    ) -> Self {
        let top: Vec<RankedValue> = result
            .top_n()
            .iter()
            .enumerate()
            .filter_map(|(i, n)| RankedValue::from_scaled(i + 1, n))
            .collect();

        Self {
            source: path.display().to_string(),
            mode: config.mode,
            pages: document.pages.len(),
            page_errors: document.page_errors,
            maximum: top.first().cloned(),
            top,
            diagnostics: *result.diagnostics(),
        }
    }

    /// Literals were found but every one overflowed the exponent guard
    pub fn all_overflowed(&self) -> bool {
        self.maximum.is_none() && self.diagnostics.literals_seen > 0
    }
}

impl RankedValue {
    fn from_scaled(rank: usize, number: &ScaledNumber) -> Option<Self> {
        let value = number.final_value.as_ref()?;
        Some(Self {
            rank,
            value: format::plain(value),
            display: format::grouped(value, DISPLAY_DECIMALS),
            literal: number.literal.raw_text.clone(),
            source: number.resolution.source,
            matched: number.resolution.matched_text.clone(),
            multiplier: format::plain(&number.resolution.multiplier),
            offset: number.literal.start_offset,
            page: number.page,
            provenance: number.provenance(),
        })
    }
}
