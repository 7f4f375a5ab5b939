//! HTTP adapter for the Document Analysis Service.
//!
//! Implements `AnalysisPort` with multipart uploads to `/summarize/` and `/ask/`.

use crate::domain::{AnalysisResult, DomainError, Language, ReadabilityScore, SelectedFile};
use crate::ports::AnalysisPort;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

/// Default service address when no configuration overrides it.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Analysis service client.
///
/// Every call re-uploads the selected document; the service keeps no session.
pub struct HttpAnalysisAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisAdapter {
    /// Create an adapter for the service at `base_url` (e.g. "http://127.0.0.1:8000").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), operation)
    }

    /// Build the `file` part, keeping the filename: the service picks its text extractor by
    /// extension.
    fn file_part(file: &SelectedFile) -> Result<Part, DomainError> {
        Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(content_type_for(&file.name))
            .map_err(|e| DomainError::Request(format!("Invalid content type: {}", e)))
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        form: Form,
    ) -> Result<T, DomainError> {
        let url = self.endpoint(operation);
        debug!(url = %url, "posting multipart form");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "analysis service returned error");
            return Err(DomainError::Request(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Request(format!("Failed to parse API response: {}", e)))
    }
}

/// Content type for the upload, guessed from the file extension.
fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// `/summarize/` response body.
#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
    #[serde(default)]
    bullets: String,
    #[serde(default)]
    faq: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    citations: Vec<String>,
    #[serde(default)]
    readability_score: ReadabilityScore,
}

impl From<SummarizeResponse> for AnalysisResult {
    fn from(r: SummarizeResponse) -> Self {
        AnalysisResult {
            summary_html: r.summary,
            bullets: r.bullets,
            faq: r.faq,
            keywords: r.keywords,
            citations: r.citations,
            readability_score: r.readability_score,
        }
    }
}

/// `/ask/` response body. The echoed `question` field is ignored.
#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[async_trait::async_trait]
impl AnalysisPort for HttpAnalysisAdapter {
    async fn summarize(
        &self,
        file: &SelectedFile,
        language: Language,
    ) -> Result<AnalysisResult, DomainError> {
        let form = Form::new()
            .part("file", Self::file_part(file)?)
            .text("language", language.code());

        let response: SummarizeResponse = self.post_form("summarize", form).await?;
        debug!(
            summary_len = response.summary.len(),
            keywords = response.keywords.len(),
            "summarize response decoded"
        );
        Ok(response.into())
    }

    async fn ask(&self, file: &SelectedFile, question: &str) -> Result<String, DomainError> {
        let form = Form::new()
            .part("file", Self::file_part(file)?)
            .text("question", question.to_string());

        let response: AskResponse = self.post_form("ask", form).await?;
        debug!(answer_len = response.answer.len(), "ask response decoded");
        Ok(response.answer)
    }
}
