//! Ad hoc analysis of user-supplied text
//!
//! Uses the preferred model from the injected settings unless the caller
//! picks one explicitly. Blank input is rejected before any request.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{AnalysisResult, ApiError, ApiResult, Model, SentimentApi};
use crate::config::SharedSettings;

/// Message shown when there is nothing to analyze
pub const EMPTY_TEXT_MESSAGE: &str = "Please enter some text to analyze.";

/// A verdict together with the model that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub model: Model,
    pub result: AnalysisResult,
}

impl Analysis {
    /// Score mapped onto 0..=100 for the producing model
    pub fn confidence_pct(&self) -> f64 {
        self.model.score_pct(self.result.score)
    }
}

pub struct TextAnalyzer {
    api: Arc<dyn SentimentApi>,
    settings: SharedSettings,
}

impl TextAnalyzer {
    pub fn new(api: Arc<dyn SentimentApi>, settings: SharedSettings) -> Self {
        Self { api, settings }
    }

    /// Analyze with the preferred model
    pub async fn analyze(&self, text: &str) -> ApiResult<Analysis> {
        let model = self.settings.read().await.model();
        self.analyze_with(text, model).await
    }

    pub async fn analyze_with(&self, text: &str, model: Model) -> ApiResult<Analysis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
        }

        let result = self.api.analyze_text(text, model).await?;
        if let Some(reason) = &result.error {
            warn!(model = %model, error = %reason, "Model reported a problem");
        }
        info!(model = %model, label = %result.label, score = result.score, "Text analyzed");
        Ok(Analysis { model, result })
    }
}
