//! Label tallies over news items
//!
//! `aggregate` is a pure function: callers choose which label and score to
//! read from each item, which lets the live feed compute the consensus and
//! per-model summaries over one identical filtered list.

use serde::Serialize;

use crate::api::SentimentLabel;

/// Counts and mean score for a set of labeled items
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    /// Residual bucket: `total - positive - negative`
    pub neutral: usize,
    /// Mean score over every item, polarized or not
    pub avg_score: f64,
}

impl SentimentSummary {
    pub fn positive_pct(&self) -> f64 {
        pct(self.positive, self.total)
    }

    pub fn negative_pct(&self) -> f64 {
        pct(self.negative, self.total)
    }

    pub fn neutral_pct(&self) -> f64 {
        pct(self.neutral, self.total)
    }
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Tally `items` using the given extractors.
///
/// Any label other than the two polarity values, including an explicit
/// `neutral` or an unknown label, lands in the neutral bucket. An empty
/// input yields an all-zero summary.
pub fn aggregate<T, L, S>(items: &[T], label_of: L, score_of: S) -> SentimentSummary
where
    L: Fn(&T) -> &SentimentLabel,
    S: Fn(&T) -> f64,
{
    let total = items.len();
    if total == 0 {
        return SentimentSummary::default();
    }

    let mut positive = 0;
    let mut negative = 0;
    let mut score_sum = 0.0;
    for item in items {
        let label = label_of(item);
        if label.is_positive() {
            positive += 1;
        } else if label.is_negative() {
            negative += 1;
        }
        score_sum += score_of(item);
    }

    SentimentSummary {
        total,
        positive,
        negative,
        neutral: total - positive - negative,
        avg_score: score_sum / total as f64,
    }
}
