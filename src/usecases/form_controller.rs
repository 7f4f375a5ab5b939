//! Form controller use case. Owns the form state and issues summarize / ask requests.
//!
//! State lives in a `watch` channel: every mutation goes through here and is published as a
//! fresh `FormState` snapshot. The borrow is never held across an `.await`.

use crate::domain::{DomainError, FormState, Language, SelectedFile};
use crate::ports::{AlertPort, AnalysisPort};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

pub const MISSING_FILE: &str = "Please upload a file.";
pub const MISSING_FILE_OR_QUESTION: &str = "Please upload a file and enter a question.";
pub const UPLOAD_FAILED: &str = "Error processing file.";
pub const QUESTION_FAILED: &str = "Error processing question.";

/// Single form controller. One user action produces at most one request attempt.
pub struct FormController {
    analysis: Arc<dyn AnalysisPort>,
    alerts: Arc<dyn AlertPort>,
    state: watch::Sender<FormState>,
}

/// Clears the loading flag when the summarize call settles, whichever way it settles.
struct LoadingGuard<'a>(&'a watch::Sender<FormState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.loading = false);
    }
}

impl FormController {
    pub fn new(analysis: Arc<dyn AnalysisPort>, alerts: Arc<dyn AlertPort>) -> Self {
        Self::with_language(analysis, alerts, Language::default())
    }

    pub fn with_language(
        analysis: Arc<dyn AnalysisPort>,
        alerts: Arc<dyn AlertPort>,
        language: Language,
    ) -> Self {
        let (state, _) = watch::channel(FormState {
            language,
            ..FormState::default()
        });
        Self {
            analysis,
            alerts,
            state,
        }
    }

    /// Snapshot of the current form state.
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Replace the selected document. No validation beyond presence.
    pub fn select_file(&self, file: SelectedFile) {
        info!(file = %file.name, bytes = file.len(), "file selected");
        self.state.send_modify(|s| s.file = Some(file));
    }

    pub fn select_language(&self, language: Language) {
        debug!(language = language.code(), "language selected");
        self.state.send_modify(|s| s.language = language);
    }

    /// Select by wire code (`en`, `hi`, `fr`, `es`). Unknown codes leave the state untouched.
    pub fn select_language_code(&self, code: &str) -> Result<(), DomainError> {
        let language = code.parse::<Language>()?;
        self.select_language(language);
        Ok(())
    }

    /// Store the question text. The previous answer stays visible.
    pub fn set_question(&self, question: impl Into<String>) {
        let question = question.into();
        self.state.send_modify(|s| s.question = question);
    }

    /// Upload the selected file for summarization.
    ///
    /// On success the analysis result is replaced as a whole. On failure the previous result is
    /// kept, the error is logged and one alert is raised. The loading flag is set for exactly the
    /// duration of the request. Returns `Busy` without a request while an upload is in flight.
    pub async fn submit_upload(&self) -> Result<(), DomainError> {
        let mut begun = Err(DomainError::Busy);
        self.state.send_if_modified(|s| {
            begun = begin_upload(s);
            begun.is_ok()
        });

        let (file, language) = match begun {
            Ok(request) => request,
            Err(DomainError::Busy) => {
                debug!("upload ignored: request already in flight");
                return Err(DomainError::Busy);
            }
            Err(e) => {
                self.alerts.alert(&e.to_string());
                return Err(e);
            }
        };

        let guard = LoadingGuard(&self.state);
        info!(
            file = %file.name,
            bytes = file.len(),
            language = language.code(),
            "submitting document for summarization"
        );

        match self.analysis.summarize(&file, language).await {
            Ok(result) => {
                info!(
                    keywords = result.keywords.len(),
                    citations = result.citations.len(),
                    "summary received"
                );
                self.state.send_modify(|s| s.result = result);
                drop(guard);
                Ok(())
            }
            Err(e) => {
                drop(guard);
                error!(file = %file.name, error = %e, "error uploading file");
                self.alerts.alert(UPLOAD_FAILED);
                Err(e)
            }
        }
    }

    /// Ask a question about the selected file. Not gated by the loading flag.
    ///
    /// On success the answer is replaced; on failure it is left as it was.
    pub async fn submit_question(&self) -> Result<(), DomainError> {
        let prepared = {
            let s = self.state.borrow();
            match &s.file {
                Some(file) if !s.question.is_empty() => {
                    Ok((file.clone(), s.question.clone()))
                }
                _ => Err(DomainError::Validation(MISSING_FILE_OR_QUESTION.to_string())),
            }
        };

        let (file, question) = match prepared {
            Ok(request) => request,
            Err(e) => {
                self.alerts.alert(&e.to_string());
                return Err(e);
            }
        };

        info!(file = %file.name, question_len = question.len(), "asking question");

        match self.analysis.ask(&file, &question).await {
            Ok(answer) => {
                debug!(answer_len = answer.len(), "answer received");
                self.state.send_modify(|s| s.answer = answer);
                Ok(())
            }
            Err(e) => {
                error!(file = %file.name, error = %e, "error asking question");
                self.alerts.alert(QUESTION_FAILED);
                Err(e)
            }
        }
    }
}

/// Check the upload preconditions and raise the loading flag if they hold.
fn begin_upload(s: &mut FormState) -> Result<(SelectedFile, Language), DomainError> {
    if s.loading {
        return Err(DomainError::Busy);
    }
    let file = s
        .file
        .clone()
        .ok_or_else(|| DomainError::Validation(MISSING_FILE.to_string()))?;
    s.loading = true;
    Ok((file, s.language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisResult, ReadabilityScore};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingAlerts {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingAlerts {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl AlertPort for RecordingAlerts {
        fn alert(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// Analysis port that replays scripted responses and records what it saw.
    #[derive(Default)]
    struct ScriptedAnalysis {
        summaries: Mutex<VecDeque<Result<AnalysisResult, DomainError>>>,
        answers: Mutex<VecDeque<Result<String, DomainError>>>,
        summarize_calls: AtomicUsize,
        ask_calls: AtomicUsize,
        observer: Mutex<Option<watch::Receiver<FormState>>>,
        loading_seen: Mutex<Vec<bool>>,
        uploads: Mutex<Vec<(String, Language)>>,
        questions: Mutex<Vec<String>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedAnalysis {
        fn push_summary(&self, r: Result<AnalysisResult, DomainError>) {
            self.summaries.lock().unwrap().push_back(r);
        }

        fn push_answer(&self, r: Result<String, DomainError>) {
            self.answers.lock().unwrap().push_back(r);
        }

        fn observe(&self, rx: watch::Receiver<FormState>) {
            *self.observer.lock().unwrap() = Some(rx);
        }
    }

    #[async_trait::async_trait]
    impl AnalysisPort for ScriptedAnalysis {
        async fn summarize(
            &self,
            file: &SelectedFile,
            language: Language,
        ) -> Result<AnalysisResult, DomainError> {
            self.summarize_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(rx) = self.observer.lock().unwrap().as_ref() {
                self.loading_seen.lock().unwrap().push(rx.borrow().loading);
            }
            self.uploads
                .lock()
                .unwrap()
                .push((file.name.clone(), language));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.summaries
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DomainError::Request("no scripted response".into())))
        }

        async fn ask(&self, _file: &SelectedFile, question: &str) -> Result<String, DomainError> {
            self.ask_calls.fetch_add(1, Ordering::SeqCst);
            self.questions.lock().unwrap().push(question.to_string());
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DomainError::Request("no scripted response".into())))
        }
    }

    fn setup(
        analysis: ScriptedAnalysis,
    ) -> (FormController, Arc<ScriptedAnalysis>, Arc<RecordingAlerts>) {
        let analysis = Arc::new(analysis);
        let alerts = Arc::new(RecordingAlerts::default());
        let controller = FormController::new(
            Arc::clone(&analysis) as Arc<dyn AnalysisPort>,
            Arc::clone(&alerts) as Arc<dyn AlertPort>,
        );
        analysis.observe(controller.subscribe());
        (controller, analysis, alerts)
    }

    fn contract() -> SelectedFile {
        SelectedFile::new("contract.pdf", b"%PDF-1.4 lease".to_vec())
    }

    fn full_result() -> AnalysisResult {
        AnalysisResult {
            summary_html: "<p>ok</p>".to_string(),
            bullets: "- a".to_string(),
            faq: "Q:..".to_string(),
            keywords: vec!["lease".to_string()],
            citations: vec!["Art.5".to_string()],
            readability_score: ReadabilityScore::Number(serde_json::Number::from(72u64)),
        }
    }

    #[tokio::test]
    async fn test_upload_without_file_sends_nothing() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());

        let err = controller.submit_upload().await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(analysis.summarize_calls.load(Ordering::SeqCst), 0);
        assert_eq!(alerts.messages(), vec![MISSING_FILE.to_string()]);
        assert!(!controller.state().loading);
    }

    #[tokio::test]
    async fn test_question_requires_file_and_text() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());

        controller.set_question("Who is the landlord?");
        assert!(controller.submit_question().await.is_err());

        controller.select_file(contract());
        controller.set_question("");
        assert!(controller.submit_question().await.is_err());

        assert_eq!(analysis.ask_calls.load(Ordering::SeqCst), 0);
        assert_eq!(alerts.messages().len(), 2);
        assert!(alerts.messages().iter().all(|m| m == MISSING_FILE_OR_QUESTION));
    }

    #[tokio::test]
    async fn test_whitespace_question_is_sent_as_typed() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());
        analysis.push_answer(Ok("Please ask a question.".to_string()));

        controller.select_file(contract());
        controller.set_question("   ");
        controller.submit_question().await.unwrap();

        assert_eq!(analysis.ask_calls.load(Ordering::SeqCst), 1);
        assert_eq!(analysis.questions.lock().unwrap().clone(), vec!["   ".to_string()]);
        assert!(alerts.messages().is_empty());
        assert_eq!(controller.state().answer, "Please ask a question.");
    }

    #[tokio::test]
    async fn test_upload_sends_selected_language() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());
        analysis.push_summary(Ok(full_result()));

        controller.select_file(contract());
        controller.select_language_code("fr").unwrap();
        controller.submit_upload().await.unwrap();

        assert_eq!(
            analysis.uploads.lock().unwrap().clone(),
            vec![("contract.pdf".to_string(), Language::Fr)]
        );
        assert_eq!(controller.state().result, full_result());
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_language_code_is_rejected() {
        let (controller, _analysis, _alerts) = setup(ScriptedAnalysis::default());
        controller.select_language(Language::Es);

        assert!(controller.select_language_code("de").is_err());
        assert_eq!(controller.state().language, Language::Es);
    }

    #[tokio::test]
    async fn test_new_summary_replaces_every_field() {
        let (controller, analysis, _alerts) = setup(ScriptedAnalysis::default());
        let second = AnalysisResult {
            summary_html: "<p>second</p>".to_string(),
            bullets: String::new(),
            faq: "Q: again".to_string(),
            keywords: Vec::new(),
            citations: vec!["Section 9".to_string()],
            readability_score: ReadabilityScore::Text("n/a".to_string()),
        };
        analysis.push_summary(Ok(full_result()));
        analysis.push_summary(Ok(second.clone()));

        controller.select_file(contract());
        controller.submit_upload().await.unwrap();
        controller.submit_upload().await.unwrap();

        assert_eq!(controller.state().result, second);
    }

    #[tokio::test]
    async fn test_loading_flag_spans_request_only() {
        let (controller, analysis, _alerts) = setup(ScriptedAnalysis::default());
        analysis.push_summary(Ok(full_result()));
        analysis.push_summary(Err(DomainError::Request("connection refused".into())));
        controller.select_file(contract());

        assert!(!controller.state().loading);
        controller.submit_upload().await.unwrap();
        assert!(!controller.state().loading);
        assert!(controller.submit_upload().await.is_err());
        assert!(!controller.state().loading);

        assert_eq!(analysis.loading_seen.lock().unwrap().clone(), vec![true, true]);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_result() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());
        analysis.push_summary(Ok(full_result()));
        analysis.push_summary(Err(DomainError::Request("API error 500".into())));
        controller.select_file(contract());

        controller.submit_upload().await.unwrap();
        let err = controller.submit_upload().await.unwrap_err();

        assert!(matches!(err, DomainError::Request(_)));
        assert_eq!(controller.state().result, full_result());
        assert_eq!(alerts.messages(), vec![UPLOAD_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_ask_sets_answer_only() {
        let (controller, analysis, alerts) = setup(ScriptedAnalysis::default());
        analysis.push_summary(Ok(full_result()));
        analysis.push_answer(Ok("The tenant".to_string()));
        analysis.push_answer(Err(DomainError::Request("timeout".into())));

        controller.select_file(contract());
        controller.submit_upload().await.unwrap();
        controller.set_question("Who pays rent?");
        controller.submit_question().await.unwrap();

        let state = controller.state();
        assert_eq!(state.answer, "The tenant");
        assert_eq!(state.result, full_result());

        controller.set_question("Who pays tax?");
        assert_eq!(controller.state().answer, "The tenant");
        assert!(controller.submit_question().await.is_err());

        let state = controller.state();
        assert_eq!(state.answer, "The tenant");
        assert_eq!(state.question, "Who pays tax?");
        assert_eq!(alerts.messages(), vec![QUESTION_FAILED.to_string()]);
        assert_eq!(
            analysis.questions.lock().unwrap().clone(),
            vec!["Who pays rent?".to_string(), "Who pays tax?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_upload_disabled_while_in_flight_but_ask_is_not() {
        let gate = Arc::new(Notify::new());
        let (controller, analysis, alerts) = setup(ScriptedAnalysis {
            gate: Some(Arc::clone(&gate)),
            ..Default::default()
        });
        analysis.push_summary(Ok(full_result()));
        analysis.push_answer(Ok("Article 5".to_string()));
        let controller = Arc::new(controller);
        controller.select_file(contract());

        let mut rx = controller.subscribe();
        let in_flight = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit_upload().await })
        };
        rx.wait_for(|s| s.loading).await.unwrap();

        assert!(matches!(
            controller.submit_upload().await,
            Err(DomainError::Busy)
        ));
        controller.set_question("Which article applies?");
        controller.submit_question().await.unwrap();
        assert_eq!(controller.state().answer, "Article 5");

        gate.notify_one();
        in_flight.await.unwrap().unwrap();

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.result, full_result());
        assert_eq!(analysis.summarize_calls.load(Ordering::SeqCst), 1);
        assert!(alerts.messages().is_empty());
    }
}
