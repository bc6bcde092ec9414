//! Core engine for the churn form: form state, focus, and submission.
//!
//! This crate contains the [`App`] state machine without TUI dependencies.
//! The terminal layer reads state from `App` and forwards key intents back to
//! it; no rendering logic lives here.
//!
//! A submission is fully synchronous: commit any pending edit, snapshot the
//! inputs, [`encode`] them, and score the record with the injected
//! [`Classifier`]. Nothing from one submission is reused by the next.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use churn_config::{Settings, ThemePreset, ThemeSettings};
use churn_model::Classifier;
use churn_types::{
    ClassProbabilities, FeatureRecord, FieldId, FieldValue, RawInputs, StepSize, encode,
};

mod focus;
mod form;

pub use focus::Focus;
pub use form::{Form, NumberDraft};

/// Text shown before the formatted percentage.
pub const RESULT_PREFIX: &str = "The customer is likely to churn with a probability of: ";

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
}

/// Where theme toggles are saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThemeStore {
    /// `~/.churn/config.toml`.
    #[default]
    ConfigFile,
    File(PathBuf),
    /// Keep the toggle for this session only.
    Memory,
}

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub ui: UiOptions,
    pub theme: ThemeSettings,
    pub theme_store: ThemeStore,
}

impl AppOptions {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            ui: UiOptions {
                ascii_only: settings.ascii_only,
            },
            theme: settings.theme,
            theme_store: ThemeStore::ConfigFile,
        }
    }
}

/// A scored submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    inputs: RawInputs,
    record: FeatureRecord,
    probabilities: ClassProbabilities,
}

impl Prediction {
    #[must_use]
    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    #[must_use]
    pub fn record(&self) -> &FeatureRecord {
        &self.record
    }

    #[must_use]
    pub fn probabilities(&self) -> ClassProbabilities {
        self.probabilities
    }

    /// `The customer is likely to churn with a probability of: NN.NN%`
    #[must_use]
    pub fn message(&self) -> String {
        format!("{RESULT_PREFIX}{}", self.probabilities.churn().percent())
    }
}

/// Result of the most recent submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Scored(Prediction),
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message for the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    form: Form,
    focus: Focus,
    classifier: Arc<dyn Classifier>,
    outcome: Option<Outcome>,
    field_error: Option<(FieldId, String)>,
    status: Option<StatusMessage>,
    ui_options: UiOptions,
    theme: ThemeSettings,
    theme_store: ThemeStore,
    should_quit: bool,
}

impl App {
    pub fn new(classifier: Arc<dyn Classifier>, options: AppOptions) -> Self {
        tracing::info!(model = %classifier.summary(), "Form ready");
        Self {
            form: Form::new(),
            focus: Focus::default(),
            classifier,
            outcome: None,
            field_error: None,
            status: None,
            ui_options: options.ui,
            theme: options.theme,
            theme_store: options.theme_store,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    pub fn theme(&self) -> ThemeSettings {
        self.theme
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn value(&self, field: FieldId) -> FieldValue {
        self.form.value(field)
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// True when a prediction is shown but the form has changed since.
    pub fn is_outcome_stale(&self) -> bool {
        match &self.outcome {
            Some(Outcome::Scored(prediction)) => prediction.inputs != self.form.raw_inputs(),
            _ => false,
        }
    }

    /// Inline error for `field`, if its last edit was rejected.
    pub fn field_error(&self, field: FieldId) -> Option<&str> {
        self.field_error
            .as_ref()
            .filter(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn model_summary(&self) -> String {
        self.classifier.summary()
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    /// Leaving a field commits its edit buffer.
    pub fn focus_next(&mut self) {
        self.commit_edit();
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.commit_edit();
        self.focus = self.focus.prev();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if focus != self.focus {
            self.commit_edit();
            self.focus = focus;
        }
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Step the focused field up or down. Selects cycle through their options.
    pub fn adjust(&mut self, up: bool, size: StepSize) {
        let Some(field) = self.focus.field() else {
            return;
        };
        self.commit_edit();
        if up {
            self.form.increment(field, size);
        } else {
            self.form.decrement(field, size);
        }
        self.clear_field_error(field);
    }

    /// Type into the focused numeric field. Returns whether the key was consumed.
    pub fn type_char(&mut self, ch: char) -> bool {
        let Some(field) = self.focus.field() else {
            return false;
        };
        let accepted = self.form.push_char(field, ch);
        if accepted {
            self.clear_field_error(field);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus.field() {
            self.form.backspace(field);
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        if self.form.draft().is_some() {
            self.form.cancel_draft();
            return true;
        }
        false
    }

    /// Commit the pending edit buffer, recording an inline error if it doesn't parse.
    pub fn commit_edit(&mut self) {
        let Some(field) = self.form.draft().map(NumberDraft::field) else {
            return;
        };
        match self.form.commit_draft() {
            Ok(Some(value)) => {
                tracing::debug!(field = %field, value = %value, "Committed edit");
                self.clear_field_error(field);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(field = %field, "Rejected edit: {err}");
                self.field_error = Some((field, err.to_string()));
            }
        }
    }

    fn clear_field_error(&mut self, field: FieldId) {
        if self.field_error.as_ref().is_some_and(|(f, _)| *f == field) {
            self.field_error = None;
        }
    }

    /// Restore defaults and clear the result.
    pub fn reset(&mut self) {
        self.form.reset();
        self.outcome = None;
        self.field_error = None;
        self.status = Some(StatusMessage::info("Form reset to defaults"));
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Encode the current inputs and score them.
    ///
    /// Scoring errors are shown in place of the result; the session continues.
    pub fn submit(&mut self) -> &Outcome {
        self.commit_edit();

        let inputs = self.form.raw_inputs();
        let record = encode(&inputs);
        tracing::debug!(record = %record, "Encoded feature record");

        let outcome = match self.classifier.predict_proba(&record) {
            Ok(probabilities) => {
                tracing::info!(
                    probability = %probabilities.churn(),
                    "Scored submission"
                );
                Outcome::Scored(Prediction {
                    inputs,
                    record,
                    probabilities,
                })
            }
            Err(err) => {
                tracing::warn!("Scoring failed: {err}");
                Outcome::Failed {
                    message: format!("Prediction failed: {err}"),
                }
            }
        };
        self.status = None;
        self.outcome.insert(outcome)
    }

    // ------------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------------

    /// Switch between the light and dark presets and save the choice.
    ///
    /// The switch applies even when saving fails; the failure is reported in
    /// the status line.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let preset = self.theme.preset;
        match self.persist_theme(preset) {
            Ok(()) => {
                self.status = Some(StatusMessage::info(format!("Theme: {preset}")));
            }
            Err(err) => {
                tracing::warn!("Failed to persist theme preset: {err}");
                self.status = Some(StatusMessage::error(format!(
                    "Theme: {preset} (not saved: {err})"
                )));
            }
        }
    }

    fn persist_theme(&self, preset: ThemePreset) -> io::Result<()> {
        match &self.theme_store {
            ThemeStore::ConfigFile => churn_config::persist_theme_preset(preset),
            ThemeStore::File(path) => churn_config::persist_theme_preset_at(path, preset),
            ThemeStore::Memory => Ok(()),
        }
    }
}
