//! Wire types for the sentiment analysis service
//!
//! These mirror the JSON payloads of the service endpoints and carry the
//! small amount of derived logic (residual neutral bucket, percentages,
//! lenient date parsing) every view relies on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Sentiment labels
// =============================================================================

/// Label attached to a news item by a scoring model.
///
/// Only `positive` and `negative` are polarity values. Everything else,
/// including an explicit `neutral` and any label the service may add later,
/// is counted in the residual neutral bucket. Unknown labels are kept
/// verbatim in `Other` rather than being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
    Other(String),
}

impl SentimentLabel {
    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLabel::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, SentimentLabel::Negative)
    }

    /// True for every label outside the two polarity values
    pub fn is_residual(&self) -> bool {
        !self.is_positive() && !self.is_negative()
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Other(raw) => raw,
        }
    }
}

impl From<&str> for SentimentLabel {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Other(raw.to_string()),
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        SentimentLabel::from(raw.as_str())
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Scoring models
// =============================================================================

/// The two independent scoring engines behind the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// Fast lexicon-based engine, scores in -1.0..=1.0
    #[default]
    Vader,
    /// Slower transformer-based engine, confidence in 0.0..=1.0
    Finbert,
}

impl Model {
    /// Human-facing name, also the persisted preference value
    pub fn display_name(&self) -> &'static str {
        match self {
            Model::Vader => "VADER (Fast)",
            Model::Finbert => "FinBERT (Accurate)",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        match name {
            "VADER (Fast)" => Some(Model::Vader),
            "FinBERT (Accurate)" => Some(Model::Finbert),
            _ => None,
        }
    }

    /// Map a raw score onto 0..=100 for display
    pub fn score_pct(&self, score: f64) -> f64 {
        match self {
            Model::Vader => (score + 1.0) / 2.0 * 100.0,
            Model::Finbert => score * 100.0,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Vader => write!(f, "vader"),
            Model::Finbert => write!(f, "finbert"),
        }
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Aggregate label counts for one query scope.
///
/// `neutral` is never read from the wire; it is always `total - positive -
/// negative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
}

impl Stats {
    pub fn new(total: u64, positive: u64, negative: u64) -> Self {
        Self { total, positive, negative }
    }

    /// Zero-valued record used as the degraded substitute
    pub fn zero() -> Self {
        Self::default()
    }

    /// Residual count; zero when the polarity counts exceed `total`
    #[inline]
    pub fn neutral(&self) -> u64 {
        self.total
            .saturating_sub(self.positive.saturating_add(self.negative))
    }

    pub fn positive_ratio(&self) -> f64 {
        ratio(self.positive, self.total)
    }

    pub fn negative_ratio(&self) -> f64 {
        ratio(self.negative, self.total)
    }

    pub fn positive_pct(&self) -> f64 {
        self.positive_ratio() * 100.0
    }

    pub fn negative_pct(&self) -> f64 {
        self.negative_ratio() * 100.0
    }

    pub fn neutral_pct(&self) -> f64 {
        ratio(self.neutral(), self.total) * 100.0
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

// =============================================================================
// News items
// =============================================================================

/// One labeled article from the paged news endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Raw timestamp string as stored by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_label: SentimentLabel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_score: f64,
}

impl NewsItem {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_date)
    }
}

/// Label and score produced by one engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelVerdict {
    pub label: SentimentLabel,
    pub score: f64,
}

/// One item of the live feed, scored by both engines plus a consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveNewsItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Raw timestamp string as stored by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_label: SentimentLabel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vader_label: SentimentLabel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vader_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finbert_label: SentimentLabel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finbert_score: f64,
}

impl LiveNewsItem {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    pub fn consensus(&self) -> ModelVerdict {
        ModelVerdict {
            label: self.sentiment_label.clone(),
            score: self.sentiment_score,
        }
    }

    pub fn verdict(&self, model: Model) -> ModelVerdict {
        match model {
            Model::Vader => ModelVerdict {
                label: self.vader_label.clone(),
                score: self.vader_score,
            },
            Model::Finbert => ModelVerdict {
                label: self.finbert_label.clone(),
                score: self.finbert_score,
            },
        }
    }
}

// =============================================================================
// Single-text analysis
// =============================================================================

/// Body of `POST /api/analyze_text`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub model: Model,
}

/// Verdict for ad hoc text; `error` carries a model-side warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: SentimentLabel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the timestamp shapes the service emits.
///
/// Accepts RFC 3339, naive date-times (assumed UTC, `T` or space separated)
/// and bare dates (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
