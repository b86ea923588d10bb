use bigdecimal::BigDecimal;
use magnitude_scale::{analyze, Analyzer, AnalyzerConfig, ScaleSource};
use proptest::prelude::*;

const CUES: &[&str] = &["", " million", "K", " apples", "e3", " bn", "^2"];

fn cued_text(items: &[(u32, usize)]) -> String {
    items
        .iter()
        .map(|(value, cue)| format!("{value}{}", CUES[*cue]))
        .collect::<Vec<_>>()
        .join("; ")
}

proptest! {
    #[test]
    fn proptest_analysis_is_idempotent(text in "\\PC{0,160}") {
        prop_assert_eq!(analyze(&text), analyze(&text));
    }

    #[test]
    fn proptest_uncued_literals_keep_their_value(
        values in prop::collection::vec(0u32..1_000_000, 1..20),
    ) {
        let text = values
            .iter()
            .map(|v| format!("{v} apples"))
            .collect::<Vec<_>>()
            .join(", ");
        let config = AnalyzerConfig { top_n: values.len(), ..Default::default() };
        let result = Analyzer::new(config).unwrap().analyze(&text);

        prop_assert_eq!(result.top_n().len(), values.len());
        for number in result.top_n() {
            prop_assert_eq!(number.resolution.source, ScaleSource::None);
            prop_assert_eq!(number.final_value.as_ref(), Some(&number.literal.numeric_value));
        }
        let max = values.iter().max().copied().unwrap_or_default();
        let best = result.maximum().and_then(|n| n.final_value.clone());
        prop_assert_eq!(best, Some(BigDecimal::from(max)));
    }

    #[test]
    fn proptest_ranking_invariants_hold(
        items in prop::collection::vec((0u32..100_000, 0..CUES.len()), 0..30),
        top_n in 1usize..6,
    ) {
        let text = cued_text(&items);
        let config = AnalyzerConfig { top_n, ..Default::default() };
        let result = Analyzer::new(config).unwrap().analyze(&text);
        let diagnostics = result.diagnostics();

        prop_assert_eq!(diagnostics.literals_seen, items.len());
        prop_assert_eq!(
            diagnostics.literals_seen,
            diagnostics.literals_ranked + diagnostics.overflowed
        );
        prop_assert_eq!(result.top_n().len(), top_n.min(diagnostics.literals_ranked));
        prop_assert_eq!(result.maximum(), result.top_n().first());

        for pair in result.top_n().windows(2) {
            prop_assert!(pair[0].final_value >= pair[1].final_value);
        }
    }
}
