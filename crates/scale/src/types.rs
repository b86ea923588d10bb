use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A numeric literal found in source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Literal as written, including any attached suffix
    pub raw_text: String,

    /// Value before contextual scaling (suffix stripped, mantissa only)
    pub numeric_value: BigDecimal,

    /// Start position in characters
    pub start_offset: usize,

    /// End position in characters (exclusive)
    pub end_offset: usize,

    /// Byte span of the literal in the scanned text
    pub byte_range: Range<usize>,

    /// Shape the literal was written in
    pub notation: LiteralNotation,

    /// Attached abbreviation such as the `K` in `150K`
    pub attached_suffix: Option<AttachedSuffix>,
}

impl LiteralMatch {
    #[must_use]
    pub const fn has_attached_suffix(&self) -> bool {
        self.attached_suffix.is_some()
    }

    /// Multiplier implied by the attached suffix, if any
    #[must_use]
    pub fn attached_suffix_multiplier(&self) -> Option<BigDecimal> {
        self.attached_suffix.as_ref().map(|s| pow10(s.exponent))
    }

    /// Shift offsets so they address a larger enclosing text
    #[must_use]
    pub fn shifted(mut self, chars: usize) -> Self {
        self.start_offset += chars;
        self.end_offset += chars;
        self
    }
}

/// Written shape of a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralNotation {
    /// `450,000`, `3.5`
    Plain,
    /// `1.5e10`; the mantissa is the literal's numeric value
    Scientific { exponent: i64 },
    /// `10^120`; the numeric value is the implicit coefficient `1`
    Power { base: BigDecimal, exponent: i64 },
}

/// Abbreviation written directly after a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedSuffix {
    pub text: String,
    pub exponent: i64,
}

/// Where a multiplier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleSource {
    AttachedSuffix,
    Word,
    Abbreviation,
    MetricPrefix,
    Scientific,
    Power,
    None,
    /// Exponent exceeded the configured guard; value is not computed
    Overflow,
}

impl ScaleSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScaleSource::AttachedSuffix => "attached_suffix",
            ScaleSource::Word => "word",
            ScaleSource::Abbreviation => "abbreviation",
            ScaleSource::MetricPrefix => "metric_prefix",
            ScaleSource::Scientific => "scientific",
            ScaleSource::Power => "power",
            ScaleSource::None => "none",
            ScaleSource::Overflow => "overflow",
        }
    }
}

/// Outcome of scale resolution for one literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleResolution {
    pub multiplier: BigDecimal,
    pub source: ScaleSource,
    pub matched_text: Option<String>,
}

impl ScaleResolution {
    /// Resolution that leaves the literal unchanged
    #[must_use]
    pub fn none() -> Self {
        Self {
            multiplier: BigDecimal::from(1),
            source: ScaleSource::None,
            matched_text: None,
        }
    }

    /// Resolution for an exponent past the guard
    #[must_use]
    pub fn overflow(matched_text: impl Into<String>) -> Self {
        Self {
            multiplier: BigDecimal::from(1),
            source: ScaleSource::Overflow,
            matched_text: Some(matched_text.into()),
        }
    }

    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(self.source, ScaleSource::Overflow)
    }
}

/// A literal paired with its resolved scale and final value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledNumber {
    pub literal: LiteralMatch,
    pub resolution: ScaleResolution,

    /// `numeric_value × multiplier`; absent when the overflow guard fired
    pub final_value: Option<BigDecimal>,

    /// 1-based page the literal was found on, for per-page analysis
    pub page: Option<usize>,
}

impl ScaledNumber {
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.final_value.is_none()
    }

    /// Human-readable provenance, e.g. `3.5 (scaled by million: x1000000)`
    #[must_use]
    pub fn provenance(&self) -> String {
        match (&self.resolution.source, &self.resolution.matched_text) {
            (ScaleSource::None, _) => self.literal.raw_text.clone(),
            (ScaleSource::Overflow, _) => format!("{} (exponent overflow)", self.literal.raw_text),
            (source, matched) => format!(
                "{} (scaled by {}: x{})",
                self.literal.raw_text,
                matched.as_deref().unwrap_or(source.as_str()),
                crate::format::plain(&self.resolution.multiplier)
            ),
        }
    }
}

/// Counters that account for every candidate seen during analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Literals produced by the tokenizer
    pub literals_seen: usize,

    /// Literals offered to the ranking
    pub literals_ranked: usize,

    /// Literals excluded by the exponent guard
    pub overflowed: usize,

    /// Numeric-looking tokens rejected at a boundary or parse check
    pub rejected_candidates: usize,

    /// Input exceeded `max_input_chars` and was cut
    pub input_truncated: bool,
}

impl Diagnostics {
    pub fn absorb(&mut self, other: &Diagnostics) {
        self.literals_seen += other.literals_seen;
        self.literals_ranked += other.literals_ranked;
        self.overflowed += other.overflowed;
        self.rejected_candidates += other.rejected_candidates;
        self.input_truncated |= other.input_truncated;
    }
}

/// Exact `10^exponent`
#[must_use]
pub fn pow10(exponent: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn literal(raw: &str, value: &str) -> LiteralMatch {
        LiteralMatch {
            raw_text: raw.to_string(),
            numeric_value: BigDecimal::from_str(value).unwrap(),
            start_offset: 0,
            end_offset: raw.chars().count(),
            byte_range: 0..raw.len(),
            notation: LiteralNotation::Plain,
            attached_suffix: None,
        }
    }

    #[test]
    fn pow10_is_exact() {
        assert_eq!(pow10(3), BigDecimal::from(1000));
        assert_eq!(pow10(-2), BigDecimal::from_str("0.01").unwrap());
        assert_eq!(pow10(0), BigDecimal::from(1));
    }

    #[test]
    fn suffix_multiplier_comes_from_exponent() {
        let mut lit = literal("150K", "150");
        assert!(!lit.has_attached_suffix());
        lit.attached_suffix = Some(AttachedSuffix {
            text: "K".to_string(),
            exponent: 3,
        });
        assert!(lit.has_attached_suffix());
        assert_eq!(lit.attached_suffix_multiplier(), Some(BigDecimal::from(1000)));
    }

    #[test]
    fn provenance_mentions_scale() {
        let scaled = ScaledNumber {
            literal: literal("3.5", "3.5"),
            resolution: ScaleResolution {
                multiplier: pow10(6),
                source: ScaleSource::Word,
                matched_text: Some("million".to_string()),
            },
            final_value: Some(BigDecimal::from(3_500_000)),
            page: None,
        };
        assert_eq!(scaled.provenance(), "3.5 (scaled by million: x1000000)");

        let plain = ScaledNumber {
            literal: literal("42", "42"),
            resolution: ScaleResolution::none(),
            final_value: Some(BigDecimal::from(42)),
            page: None,
        };
        assert_eq!(plain.provenance(), "42");
    }

    #[test]
    fn diagnostics_absorb_sums_counts() {
        let mut total = Diagnostics {
            literals_seen: 2,
            literals_ranked: 2,
            ..Default::default()
        };
        total.absorb(&Diagnostics {
            literals_seen: 3,
            literals_ranked: 2,
            overflowed: 1,
            rejected_candidates: 4,
            input_truncated: true,
        });
        assert_eq!(total.literals_seen, 5);
        assert_eq!(total.literals_ranked, 4);
        assert_eq!(total.overflowed, 1);
        assert_eq!(total.rejected_candidates, 4);
        assert!(total.input_truncated);
    }
}
