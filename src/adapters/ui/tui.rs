//! Implements InputPort. Inquire-based interactive form.
//!
//! Menu loop over the form controller: choose file, choose language, upload & summarize,
//! view results, ask a question.

use crate::adapters::files::read_selected_file;
use crate::adapters::ui::alert::QueuedAlerts;
use crate::adapters::ui::render::{render_answer, render_result};
use crate::domain::{DomainError, FormState, Language};
use crate::ports::{AlertPort, InputPort};
use crate::usecases::FormController;
use async_trait::async_trait;
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Theme for all inquire prompts. Call once at startup.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightYellow))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightBlue));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ChooseFile,
    ChooseLanguage,
    Upload,
    ViewResults,
    Ask,
    Quit,
}

struct MenuItem {
    action: MenuAction,
    label: String,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Menu entries for the current state. Results and the question box appear only once a
/// summary exists.
fn menu_items(state: &FormState) -> Vec<MenuItem> {
    let file_label = match &state.file {
        Some(file) => format!("Choose file (current: {})", file.name),
        None => "Choose file".to_string(),
    };
    let upload_label = if state.loading {
        "Processing..."
    } else {
        "Upload & Summarize"
    };

    let mut items = vec![
        MenuItem {
            action: MenuAction::ChooseFile,
            label: file_label,
        },
        MenuItem {
            action: MenuAction::ChooseLanguage,
            label: format!("Choose language ({})", state.language),
        },
        MenuItem {
            action: MenuAction::Upload,
            label: upload_label.to_string(),
        },
    ];
    if state.result.is_displayable() {
        items.push(MenuItem {
            action: MenuAction::ViewResults,
            label: "View results".to_string(),
        });
        items.push(MenuItem {
            action: MenuAction::Ask,
            label: "Ask a question".to_string(),
        });
    }
    items.push(MenuItem {
        action: MenuAction::Quit,
        label: "Quit".to_string(),
    });
    items
}

/// Esc on a sub-prompt returns to the menu instead of failing.
fn prompt_or_cancel<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// TUI adapter. Inquire prompts.
pub struct TuiFormPort {
    controller: Arc<FormController>,
    alerts: Arc<QueuedAlerts>,
}

impl TuiFormPort {
    pub fn new(controller: Arc<FormController>, alerts: Arc<QueuedAlerts>) -> Self {
        Self { controller, alerts }
    }

    async fn choose_file(&self) -> Result<(), DomainError> {
        let Some(path) = prompt_or_cancel(
            Text::new("Document path:")
                .with_placeholder("contract.pdf")
                .prompt(),
        )?
        else {
            return Ok(());
        };

        match read_selected_file(&PathBuf::from(path.trim())).await {
            Ok(file) => self.controller.select_file(file),
            Err(e) => {
                warn!(error = %e, "could not read document");
                self.alerts.alert(&e.to_string());
            }
        }
        Ok(())
    }

    fn choose_language(&self) -> Result<(), DomainError> {
        let current = self.controller.state().language;
        let cursor = Language::ALL
            .iter()
            .position(|&l| l == current)
            .unwrap_or_default();
        if let Some(language) = prompt_or_cancel(
            Select::new("Choose language:", Language::ALL.to_vec())
                .with_starting_cursor(cursor)
                .prompt(),
        )? {
            self.controller.select_language(language);
        }
        Ok(())
    }

    async fn upload(&self) {
        let pb = spinner("Processing...");
        let outcome = self.controller.submit_upload().await;
        pb.finish_and_clear();
        if outcome.is_ok() {
            print_results(&self.controller.state());
        }
    }

    async fn ask(&self) -> Result<(), DomainError> {
        let current = self.controller.state().question;
        let Some(question) = prompt_or_cancel(
            Text::new("Ask a question:")
                .with_placeholder("Ask a legal question...")
                .with_initial_value(&current)
                .prompt(),
        )?
        else {
            return Ok(());
        };
        self.controller.set_question(question);

        if self.controller.submit_question().await.is_ok() {
            if let Some(answer) = render_answer(&self.controller.state().answer) {
                println!("\n{}\n", answer);
            }
        }
        Ok(())
    }
}

fn print_results(state: &FormState) {
    match render_result(&state.result, std::io::stdout().is_tty()) {
        Some(text) => {
            println!("\n{}\n", text);
            if let Some(answer) = render_answer(&state.answer) {
                println!("{}\n", answer);
            }
        }
        None => println!("No summary yet. Upload a document first."),
    }
}

#[async_trait]
impl InputPort for TuiFormPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let items = menu_items(&self.controller.state());
            let action = match Select::new("What would you like to do?", items).prompt() {
                Ok(item) => item.action,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            match action {
                MenuAction::ChooseFile => self.choose_file().await?,
                MenuAction::ChooseLanguage => self.choose_language()?,
                MenuAction::Upload => self.upload().await,
                MenuAction::ViewResults => print_results(&self.controller.state()),
                MenuAction::Ask => self.ask().await?,
                MenuAction::Quit => break,
            }

            self.alerts.show_pending();
        }

        info!("form closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisResult, SelectedFile};

    fn actions(state: &FormState) -> Vec<MenuAction> {
        menu_items(state).into_iter().map(|i| i.action).collect()
    }

    #[test]
    fn test_menu_hides_results_and_question_until_summary() {
        let mut state = FormState::default();
        assert_eq!(
            actions(&state),
            vec![
                MenuAction::ChooseFile,
                MenuAction::ChooseLanguage,
                MenuAction::Upload,
                MenuAction::Quit
            ]
        );

        state.result = AnalysisResult {
            summary_html: "<p>ok</p>".to_string(),
            ..Default::default()
        };
        assert!(actions(&state).contains(&MenuAction::Ask));
        assert!(actions(&state).contains(&MenuAction::ViewResults));
    }

    #[test]
    fn test_menu_labels_reflect_state() {
        let state = FormState {
            file: Some(SelectedFile::new("contract.pdf", Vec::<u8>::new())),
            language: Language::Fr,
            loading: true,
            ..Default::default()
        };
        let labels: Vec<String> = menu_items(&state).iter().map(|i| i.to_string()).collect();

        assert_eq!(labels[0], "Choose file (current: contract.pdf)");
        assert_eq!(labels[1], "Choose language (French)");
        assert_eq!(labels[2], "Processing...");
    }
}
