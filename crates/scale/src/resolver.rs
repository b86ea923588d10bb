//! Scale cue resolution.
//!
//! Precedence, first applicable wins:
//!
//! 1. attached suffix (`150K`)
//! 2. power notation (`10^120`)
//! 3. scientific notation (`3.5e10`)
//! 4. window cues, tier by tier: words, metric prefixes, abbreviations;
//!    the nearest cue inside a tier wins
//! 5. no scale
//!
//! Window cues are scoped to the clause containing the literal, and a cue
//! separated from the literal by another number belongs to that number.

use crate::dictionary::ScaleDictionary;
use crate::error::Result;
use crate::types::{pow10, LiteralMatch, LiteralNotation, ScaleResolution, ScaleSource};
use crate::window::ContextWindow;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static CLAUSE_BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn clause_boundary() -> &'static Regex {
    CLAUSE_BOUNDARY.get_or_init(|| {
        Regex::new(r"[.!?](?:\s|$)|;|\n[ \t\r]*\n").expect("clause boundary pattern is valid")
    })
}

/// Units a metric prefix may be joined to
const METRIC_UNITS: &str = "grams?|grammes?|meters?|metres?|watts?|bytes?|bits?|hertz|tons?|tonnes?|joules?|volts?|amps?|liters?|litres?|calories?|pascals?|ohms?|flops?|barrels?|years?";

/// Compiled cue patterns for one dictionary
#[derive(Debug, Clone)]
pub struct ScaleResolver {
    tiers: Vec<CueTier>,
    max_exponent: u32,
}

#[derive(Debug, Clone)]
struct CueTier {
    source: ScaleSource,
    pattern: Regex,
    exponents: BTreeMap<String, i64>,
}

/// A cue occurrence and how far it sits from the literal
#[derive(Debug, PartialEq, Eq)]
struct Cue<'w> {
    text: &'w str,
    key: String,
    distance: usize,
}

impl ScaleResolver {
    pub fn new(dictionary: &ScaleDictionary, max_exponent: u32) -> Result<Self> {
        let specs = [
            (ScaleSource::Word, &dictionary.words, CueShape::Word),
            (
                ScaleSource::MetricPrefix,
                &dictionary.metric_prefixes,
                CueShape::Prefix,
            ),
            (
                ScaleSource::Abbreviation,
                &dictionary.abbreviations,
                CueShape::Standalone,
            ),
        ];

        let mut tiers = Vec::new();
        for (source, entries, shape) in specs {
            if entries.is_empty() {
                continue;
            }
            tiers.push(CueTier {
                source,
                pattern: Regex::new(&shape.pattern(entries.keys()))?,
                exponents: entries.clone(),
            });
        }

        Ok(Self {
            tiers,
            max_exponent,
        })
    }

    /// Resolve the scale that applies to `literal`
    pub fn resolve(&self, literal: &LiteralMatch, window: &ContextWindow<'_>) -> ScaleResolution {
        if let Some(suffix) = &literal.attached_suffix {
            return ScaleResolution {
                multiplier: pow10(suffix.exponent),
                source: ScaleSource::AttachedSuffix,
                matched_text: Some(suffix.text.clone()),
            };
        }

        match &literal.notation {
            LiteralNotation::Power { base, exponent } => {
                return match self.guarded(*exponent) {
                    Some(exponent) if self.power_fits(base, exponent) => ScaleResolution {
                        multiplier: power(base, exponent.unsigned_abs()),
                        source: ScaleSource::Power,
                        matched_text: Some(literal.raw_text.clone()),
                    },
                    _ => ScaleResolution::overflow(literal.raw_text.clone()),
                };
            }
            LiteralNotation::Scientific { exponent } => {
                let fits = self.guarded(*exponent).is_some_and(|exponent| {
                    decimal_order(&literal.numeric_value)
                        .map_or(true, |order| self.within_guard(order.saturating_add(exponent)))
                });
                return if fits {
                    ScaleResolution {
                        multiplier: pow10(*exponent),
                        source: ScaleSource::Scientific,
                        matched_text: Some(literal.raw_text.clone()),
                    }
                } else {
                    ScaleResolution::overflow(literal.raw_text.clone())
                };
            }
            LiteralNotation::Plain => {}
        }

        let before = clause_before(window.before);
        let after = clause_after(window.after);
        for tier in &self.tiers {
            if let Some(cue) = tier.nearest(before, after) {
                if let Some(exponent) = tier.exponents.get(&cue.key) {
                    return ScaleResolution {
                        multiplier: pow10(*exponent),
                        source: tier.source,
                        matched_text: Some(cue.text.to_string()),
                    };
                }
            }
        }

        ScaleResolution::none()
    }

    fn guarded(&self, exponent: i64) -> Option<i64> {
        self.within_guard(exponent).then_some(exponent)
    }

    fn within_guard(&self, order: i64) -> bool {
        order.unsigned_abs() <= u64::from(self.max_exponent)
    }

    /// `base^exponent` stays inside the guard, estimated before any arithmetic
    fn power_fits(&self, base: &BigDecimal, exponent: i64) -> bool {
        let Some(log) = decimal_log10(base) else {
            // zero base
            return true;
        };
        let order = (log * exponent as f64).floor();
        order.abs() <= f64::from(self.max_exponent)
    }
}

impl CueTier {
    fn nearest<'w>(&self, before: &'w str, after: &'w str) -> Option<Cue<'w>> {
        let left = self.pattern.captures_iter(before).last().and_then(|caps| {
            let whole = caps.get(0)?;
            let gap = &before[whole.end()..];
            if gap.chars().any(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(Cue {
                text: whole.as_str(),
                key: caps.name("cue")?.as_str().to_ascii_lowercase(),
                distance: gap.chars().count(),
            })
        });

        let right = self.pattern.captures(after).and_then(|caps| {
            let whole = caps.get(0)?;
            let gap = &after[..whole.start()];
            if gap.chars().any(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(Cue {
                text: whole.as_str(),
                key: caps.name("cue")?.as_str().to_ascii_lowercase(),
                distance: gap.chars().count(),
            })
        });

        match (left, right) {
            (Some(l), Some(r)) if l.distance < r.distance => Some(l),
            (_, Some(r)) => Some(r),
            (l, None) => l,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CueShape {
    /// Whole word, optional plural `s`
    Word,
    /// Whole word, or joined to a known unit (`kilogram`, `gigawatts`)
    Prefix,
    /// Whole word, exact
    Standalone,
}

impl CueShape {
    fn pattern<'a>(self, keys: impl Iterator<Item = &'a String>) -> String {
        let mut keys: Vec<&String> = keys.collect();
        // Longest first so `mil` never shadows `mln` style overlaps
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        match self {
            CueShape::Word => format!(r"(?i)\b(?P<cue>{alternation})s?\b"),
            CueShape::Prefix => format!(r"(?i)\b(?P<cue>{alternation})(?:{METRIC_UNITS})?\b"),
            CueShape::Standalone => format!(r"(?i)\b(?P<cue>{alternation})\b"),
        }
    }
}

/// Text after the last clause boundary
fn clause_before(before: &str) -> &str {
    clause_boundary()
        .find_iter(before)
        .last()
        .map_or(before, |m| &before[m.end()..])
}

/// Text up to the first clause boundary
fn clause_after(after: &str) -> &str {
    clause_boundary()
        .find(after)
        .map_or(after, |m| &after[..m.start()])
}

/// Exact `floor(log10 |value|)`, or `None` for zero
fn decimal_order(value: &BigDecimal) -> Option<i64> {
    let (digits, scale) = value.as_bigint_and_exponent();
    if digits.is_zero() {
        return None;
    }
    let len = digits.magnitude().to_string().len() as i64;
    Some(len - 1 - scale)
}

/// Approximate `log10 |value|` from its leading digits, or `None` for zero
fn decimal_log10(value: &BigDecimal) -> Option<f64> {
    let (digits, scale) = value.as_bigint_and_exponent();
    if digits.is_zero() {
        return None;
    }
    let text = digits.magnitude().to_string();
    let lead_len = text.len().min(15);
    let lead: f64 = text[..lead_len].parse().ok()?;
    Some(lead.log10() + (text.len() - lead_len) as f64 - scale as f64)
}

/// Exact `base^exponent` by repeated squaring
fn power(base: &BigDecimal, exponent: u64) -> BigDecimal {
    if *base == BigDecimal::from(10) {
        return pow10(exponent as i64);
    }
    let mut result = BigDecimal::from(1);
    let mut square = base.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = &square * &square;
        }
    }
    result
}
