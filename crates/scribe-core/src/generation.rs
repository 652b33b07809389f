//! Text generation boundary.
//!
//! The language-model exchange is opaque to the core: structured input in,
//! draft text out. Failures are surfaced to the caller and never retried
//! here; prompt wording lives entirely on the other side of this trait.

use crate::error::Result;
use crate::session::activity::ActivityDetails;
use crate::session::model::BasicInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured input handed to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationInput {
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub activity_details: Option<ActivityDetails>,
    #[serde(default)]
    pub emphasis_keywords: Vec<String>,
}

/// One generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDraft {
    pub text: String,
    #[serde(default)]
    pub quality_score: Option<f32>,
    #[serde(default)]
    pub recommended_keywords: Vec<String>,
}

/// An abstract text-generation service.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Drafts a formal activity record from the structured input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScribeError::Generation`] when the exchange
    /// fails; the caller decides whether to retry.
    async fn generate(&self, input: &GenerationInput) -> Result<GeneratedDraft>;
}
