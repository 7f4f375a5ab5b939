//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AnalysisResult, DomainError, Language, SelectedFile};

/// Document Analysis Service. Summarization and question answering over an uploaded document.
#[async_trait::async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Upload the document and get its summary, translated into `language`.
    async fn summarize(
        &self,
        file: &SelectedFile,
        language: Language,
    ) -> Result<AnalysisResult, DomainError>;

    /// Upload the document with a question about it. Returns the answer text.
    async fn ask(&self, file: &SelectedFile, question: &str) -> Result<String, DomainError>;
}

/// User-facing alerts. Each call is one blocking notice the user must acknowledge.
pub trait AlertPort: Send + Sync {
    fn alert(&self, message: &str);
}
