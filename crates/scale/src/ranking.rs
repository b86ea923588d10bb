use crate::types::{Diagnostics, ScaledNumber};
use bigdecimal::BigDecimal;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Bounded top-k of scaled values, descending, earliest offset first on ties
#[derive(Debug, Clone)]
pub struct RankingAggregator {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    diagnostics: Diagnostics,
}

impl RankingAggregator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            heap: BinaryHeap::with_capacity(capacity.max(1) + 1),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Count `number` and keep it if it ranks in the top-k
    pub fn offer(&mut self, number: ScaledNumber) {
        self.diagnostics.literals_seen += 1;
        match Ranked::new(number) {
            Some(ranked) => {
                self.diagnostics.literals_ranked += 1;
                self.insert(ranked);
            }
            None => self.diagnostics.overflowed += 1,
        }
    }

    pub fn note_rejected(&mut self, count: usize) {
        self.diagnostics.rejected_candidates += count;
    }

    pub fn note_truncated(&mut self) {
        self.diagnostics.input_truncated = true;
    }

    /// Fold another aggregate into this one; order of merging does not
    /// change the result
    pub fn merge(&mut self, other: RankingAggregator) {
        self.diagnostics.absorb(&other.diagnostics);
        for Reverse(ranked) in other.heap {
            self.insert(ranked);
        }
    }

    /// Current best value
    #[must_use]
    pub fn maximum(&self) -> Option<&ScaledNumber> {
        self.heap.iter().max_by(|a, b| a.0.cmp(&b.0)).map(|r| &r.0.number)
    }

    /// Ordered copy of the current top-k
    #[must_use]
    pub fn top_n(&self) -> Vec<ScaledNumber> {
        let mut ranked: Vec<&Ranked> = self.heap.iter().map(|r| &r.0).collect();
        ranked.sort_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|r| r.number.clone()).collect()
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn finish(self) -> RankedResult {
        let top = self
            .heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(r)| r.number)
            .collect();
        RankedResult {
            top,
            diagnostics: self.diagnostics,
        }
    }

    fn insert(&mut self, ranked: Ranked) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(ranked));
            return;
        }
        let beats_worst = self
            .heap
            .peek()
            .is_some_and(|Reverse(worst)| ranked > *worst);
        if beats_worst {
            self.heap.pop();
            self.heap.push(Reverse(ranked));
        }
    }
}

/// Final ranking for one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    top: Vec<ScaledNumber>,
    diagnostics: Diagnostics,
}

impl RankedResult {
    /// Largest value found, or `None` when nothing was rankable
    #[must_use]
    pub fn maximum(&self) -> Option<&ScaledNumber> {
        self.top.first()
    }

    /// Ranked values, largest first
    #[must_use]
    pub fn top_n(&self) -> &[ScaledNumber] {
        &self.top
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// True when no literal was found at all (as opposed to all overflowing)
    #[must_use]
    pub const fn found_nothing(&self) -> bool {
        self.diagnostics.literals_seen == 0
    }
}

#[derive(Debug, Clone)]
struct Ranked {
    value: BigDecimal,
    number: ScaledNumber,
}

impl Ranked {
    fn new(number: ScaledNumber) -> Option<Self> {
        let value = number.final_value.clone()?;
        Some(Self { value, number })
    }

    fn offset(&self) -> usize {
        self.number.literal.start_offset
    }
}

impl Ord for Ranked {
    // Greater ranks higher: larger value, then earlier offset
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| other.offset().cmp(&self.offset()))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::scale;
    use crate::types::{LiteralMatch, LiteralNotation, ScaleResolution};
    use std::str::FromStr;

    fn number(value: &str, offset: usize) -> ScaledNumber {
        let literal = LiteralMatch {
            raw_text: value.to_string(),
            numeric_value: BigDecimal::from_str(value).unwrap(),
            start_offset: offset,
            end_offset: offset + value.len(),
            byte_range: offset..offset + value.len(),
            notation: LiteralNotation::Plain,
            attached_suffix: None,
        };
        scale(literal, ScaleResolution::none(), None)
    }

    fn overflowed(offset: usize) -> ScaledNumber {
        let mut n = number("1", offset);
        n.resolution = ScaleResolution::overflow("10^5000");
        n.final_value = None;
        n
    }

    fn values(numbers: &[ScaledNumber]) -> Vec<String> {
        numbers.iter().map(|n| n.literal.raw_text.clone()).collect()
    }

    #[test]
    fn keeps_top_k_descending() {
        let mut agg = RankingAggregator::new(3);
        for (i, v) in ["5", "50", "1", "500", "7", "49"].iter().enumerate() {
            agg.offer(number(v, i * 10));
        }
        assert_eq!(values(&agg.top_n()), vec!["500", "50", "49"]);
        assert_eq!(
            agg.maximum().map(|n| n.literal.raw_text.as_str()),
            Some("500")
        );
        let result = agg.finish();
        assert_eq!(values(result.top_n()), vec!["500", "50", "49"]);
        assert_eq!(result.diagnostics().literals_seen, 6);
        assert_eq!(result.diagnostics().literals_ranked, 6);
    }

    #[test]
    fn ties_prefer_earliest_offset() {
        let mut agg = RankingAggregator::new(2);
        agg.offer(number("7", 30));
        agg.offer(number("7.0", 10));
        agg.offer(number("7.00", 20));
        let result = agg.finish();
        let offsets: Vec<_> = result
            .top_n()
            .iter()
            .map(|n| n.literal.start_offset)
            .collect();
        assert_eq!(offsets, vec![10, 20]);
    }

    #[test]
    fn overflow_is_counted_not_ranked() {
        let mut agg = RankingAggregator::new(10);
        agg.offer(overflowed(0));
        let result = agg.finish();
        assert!(result.maximum().is_none());
        assert!(result.top_n().is_empty());
        assert!(!result.found_nothing());
        assert_eq!(result.diagnostics().overflowed, 1);
        assert_eq!(result.diagnostics().literals_ranked, 0);
    }

    #[test]
    fn merge_is_order_independent() {
        let build = |items: &[(&str, usize)]| {
            let mut agg = RankingAggregator::new(3);
            for (v, o) in items {
                agg.offer(number(v, *o));
            }
            agg
        };
        let a = [("9", 0), ("300", 5), ("12", 9)];
        let b = [("300", 40), ("4000", 50), ("1", 60)];

        let mut ab = build(&a);
        ab.merge(build(&b));
        let mut ba = build(&b);
        ba.merge(build(&a));

        let ab = ab.finish();
        let ba = ba.finish();
        assert_eq!(ab, ba);
        assert_eq!(values(ab.top_n()), vec!["4000", "300", "300"]);
        assert_eq!(ab.top_n()[1].literal.start_offset, 5);
        assert_eq!(ab.diagnostics().literals_seen, 6);
    }

    #[test]
    fn empty_aggregate() {
        let result = RankingAggregator::new(10).finish();
        assert!(result.maximum().is_none());
        assert!(result.found_nothing());
    }
}
