use crate::types::{LiteralMatch, ScaleResolution, ScaledNumber};

/// Apply a resolution to its literal
///
/// Overflow resolutions produce a record with no final value; the ranking
/// counts it but never orders it.
#[must_use]
pub fn scale(
    literal: LiteralMatch,
    resolution: ScaleResolution,
    page: Option<usize>,
) -> ScaledNumber {
    let final_value = if resolution.is_overflow() {
        log::debug!(
            "Skipping {} at offset {}: exponent past guard",
            literal.raw_text,
            literal.start_offset
        );
        None
    } else {
        Some((&literal.numeric_value * &resolution.multiplier).normalized())
    };

    ScaledNumber {
        literal,
        resolution,
        final_value,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{pow10, LiteralNotation, ScaleSource};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn literal(raw: &str, value: &str) -> LiteralMatch {
        LiteralMatch {
            raw_text: raw.to_string(),
            numeric_value: BigDecimal::from_str(value).unwrap(),
            start_offset: 4,
            end_offset: 4 + raw.len(),
            byte_range: 4..4 + raw.len(),
            notation: LiteralNotation::Plain,
            attached_suffix: None,
        }
    }

    #[test]
    fn multiplies_exactly() {
        let scaled = scale(
            literal("1.1", "1.1"),
            ScaleResolution {
                multiplier: pow10(12),
                source: ScaleSource::Word,
                matched_text: Some("trillion".to_string()),
            },
            Some(2),
        );
        assert!(!scaled.overflowed());
        assert_eq!(
            scaled.final_value,
            Some(BigDecimal::from(1_100_000_000_000_i64))
        );
        assert_eq!(scaled.page, Some(2));
    }

    #[test]
    fn unit_resolution_keeps_literal_value() {
        let scaled = scale(literal("450,000", "450000"), ScaleResolution::none(), None);
        assert_eq!(scaled.final_value, Some(BigDecimal::from(450_000)));
    }

    #[test]
    fn overflow_has_no_value() {
        let scaled = scale(
            literal("10^5000", "1"),
            ScaleResolution::overflow("10^5000"),
            None,
        );
        assert!(scaled.overflowed());
        assert_eq!(scaled.final_value, None);
    }
}
