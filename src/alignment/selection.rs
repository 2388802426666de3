//! Candidate selection: province gate plus weighted ranking

use tracing::trace;

use crate::address::ScoreVector;
use crate::config::{ComparerConfig, SelectionRule, TieBreak};

/// A selected candidate: its position in evaluation order and its scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub index: usize,
    pub value: f64,
    pub scores: ScoreVector,
}

/// Running-maximum selector over candidates in evaluation order.
///
/// The maximum starts at zero, so a candidate must rank strictly above zero
/// (or reach it under [`TieBreak::LastFound`](crate::TieBreak::LastFound))
/// to be selected at all.
#[derive(Debug)]
pub struct Selector<'a> {
    config: &'a ComparerConfig,
    best: Option<Selected>,
    max_value: f64,
    evaluated: usize,
    gated: usize,
}

impl<'a> Selector<'a> {
    #[must_use]
    pub fn new(config: &'a ComparerConfig) -> Self {
        Self {
            config,
            best: None,
            max_value: 0.0,
            evaluated: 0,
            gated: 0,
        }
    }

    /// Ranking value of `scores`, or `None` if the province gate rejects it.
    #[must_use]
    pub fn rank(&self, scores: &ScoreVector) -> Option<f64> {
        match self.config.selection {
            SelectionRule::WeightedGated => {
                if scores.province <= self.config.province_gate {
                    None
                } else {
                    Some(scores.weighted_sum(&self.config.weights))
                }
            }
            SelectionRule::Unweighted => Some(scores.sum()),
        }
    }

    /// Tie policy in effect; the unweighted rule always keeps the last maximum.
    fn tie_break(&self) -> TieBreak {
        match self.config.selection {
            SelectionRule::WeightedGated => self.config.tie_break,
            SelectionRule::Unweighted => TieBreak::LastFound,
        }
    }

    /// Offer the next candidate in evaluation order.
    pub fn offer(&mut self, scores: ScoreVector) {
        let index = self.evaluated;
        self.evaluated += 1;

        let Some(value) = self.rank(&scores) else {
            self.gated += 1;
            return;
        };
        if self.tie_break().prefers(value, self.max_value) {
            trace!(index, value, "new best alignment candidate");
            self.max_value = value;
            self.best = Some(Selected { index, value, scores });
        }
    }

    /// Number of candidates discarded by the province gate.
    #[must_use]
    pub fn gated(&self) -> usize {
        self.gated
    }

    /// Number of candidates offered.
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// The winning candidate, if any survived.
    #[must_use]
    pub fn finish(self) -> Option<Selected> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(street: f64, ward: f64, district: f64, province: f64) -> ScoreVector {
        ScoreVector {
            street,
            ward,
            district,
            province,
        }
    }

    #[test]
    fn test_gate_discards_low_province() {
        let config = ComparerConfig::default();
        let mut selector = Selector::new(&config);
        selector.offer(scores(100.0, 100.0, 100.0, 13.0));
        selector.offer(scores(100.0, 100.0, 100.0, 0.01));
        assert_eq!(selector.gated(), 2);
        assert!(selector.finish().is_none());
    }

    #[test]
    fn test_gate_boundary_is_inclusive() {
        let config = ComparerConfig::default();
        let selector = Selector::new(&config);
        assert_eq!(selector.rank(&scores(0.0, 0.0, 0.0, 13.0)), None);
        assert!(selector.rank(&scores(0.0, 0.0, 0.0, 14.0)).is_some());
    }

    #[test]
    fn test_weighted_ranking() {
        let config = ComparerConfig::default();
        let mut selector = Selector::new(&config);
        // province-heavy beats street-heavy
        selector.offer(scores(100.0, 0.0, 0.0, 20.0));
        selector.offer(scores(0.0, 0.0, 0.0, 50.0));
        let best = selector.finish().unwrap();
        assert_eq!(best.index, 1);
        assert!((best.value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_found_wins_ties() {
        let config = ComparerConfig::default();
        let mut selector = Selector::new(&config);
        for _ in 0..3 {
            selector.offer(scores(50.0, 50.0, 50.0, 50.0));
        }
        assert_eq!(selector.evaluated(), 3);
        assert_eq!(selector.finish().map(|s| s.index), Some(0));
    }

    #[test]
    fn test_last_found_wins_ties() {
        let config = ComparerConfig {
            tie_break: TieBreak::LastFound,
            ..Default::default()
        };
        let mut selector = Selector::new(&config);
        for _ in 0..3 {
            selector.offer(scores(50.0, 50.0, 50.0, 50.0));
        }
        assert_eq!(selector.finish().map(|s| s.index), Some(2));
    }

    #[test]
    fn test_unweighted_ignores_gate() {
        let config = ComparerConfig {
            selection: SelectionRule::Unweighted,
            ..Default::default()
        };
        let mut selector = Selector::new(&config);
        selector.offer(scores(100.0, 100.0, 100.0, 0.0));
        selector.offer(scores(10.0, 10.0, 10.0, 90.0));
        let best = selector.finish().unwrap();
        assert_eq!(best.index, 0);
        assert!((best.value - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_unweighted_keeps_last_of_ties() {
        let config = ComparerConfig {
            selection: SelectionRule::Unweighted,
            tie_break: TieBreak::FirstFound,
            ..Default::default()
        };
        let mut selector = Selector::new(&config);
        selector.offer(scores(10.0, 10.0, 10.0, 10.0));
        selector.offer(scores(40.0, 0.0, 0.0, 0.0));
        selector.offer(scores(0.0, 0.0, 0.0, 5.0));
        assert_eq!(selector.finish().map(|s| s.index), Some(1));
    }
}
