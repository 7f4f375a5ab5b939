//! Mock analysis adapter for running the client without the service.
//!
//! Returns canned responses shaped like the real service output.

use crate::domain::{AnalysisResult, DomainError, Language, ReadabilityScore, SelectedFile};
use crate::ports::AnalysisPort;
use std::time::Duration;
use tracing::info;

/// Mock analysis service.
///
/// Simulates request latency with a configurable delay.
pub struct MockAnalysisAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAnalysisAdapter {
    /// Create a new mock adapter with default delay (300ms).
    pub fn new() -> Self {
        Self { delay_ms: 300 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAnalysisAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnalysisPort for MockAnalysisAdapter {
    async fn summarize(
        &self,
        file: &SelectedFile,
        language: Language,
    ) -> Result<AnalysisResult, DomainError> {
        info!(
            file = %file.name,
            bytes = file.len(),
            language = language.code(),
            "[MOCK] Simulating summarization"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let summary = format!(
            "[MOCK] {} ({} bytes) sets out a <b>lease</b> between the parties under \
             Section 12. Rent is due monthly.",
            file.name,
            file.len()
        );
        Ok(AnalysisResult {
            summary_html: format!("<p>{} [{}]</p>", summary, language.code()),
            bullets: "• [MOCK] The document sets out a lease.\n• Rent is due monthly."
                .to_string(),
            faq: "Q: What is this document about?\nA: [MOCK] A lease agreement.".to_string(),
            keywords: vec!["lease".to_string(), "Section 12".to_string()],
            citations: vec!["Section 12".to_string()],
            readability_score: ReadabilityScore::Number(serde_json::Number::from(0u64)),
        })
    }

    async fn ask(&self, file: &SelectedFile, question: &str) -> Result<String, DomainError> {
        info!(
            file = %file.name,
            question_len = question.len(),
            "[MOCK] Simulating question answering"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(format!("[MOCK] No answer to '{}' without the analysis service.", question))
    }
}
