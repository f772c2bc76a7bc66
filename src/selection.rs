//! Session-scoped selection state and its transitions.
//!
//! One explicit record instead of flags scattered across components:
//! active category, search text, the assistant dialog, and the single
//! in-flight classification guard. Never persisted.

use serde::Serialize;
use uuid::Uuid;

use crate::models::Category;
use crate::reconcile::{self, LabelVerdict};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Assistant dialog is not open")]
    AssistantClosed,
    #[error("A recommendation is already in progress")]
    Busy,
    #[error("Describe your symptoms first")]
    EmptySymptoms,
}

/// Proof that a classification was started for a specific dialog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTicket {
    pub dialog_id: Uuid,
    pub symptoms: String,
}

/// What happened to a classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    /// The result updated the active category.
    Applied {
        category: Category,
        verdict: LabelVerdict,
    },
    /// The dialog it belonged to was closed first; state untouched.
    Discarded { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub active_category: Category,
    pub search_text: String,
    pub assistant_open: bool,
    pub assistant_busy: bool,
    pub symptom_draft: String,
    /// Identity of the currently open dialog, if any.
    pub dialog_id: Option<Uuid>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            active_category: Category::All,
            search_text: String::new(),
            assistant_open: false,
            assistant_busy: false,
            symptom_draft: String::new(),
            dialog_id: None,
        }
    }

    pub fn select_category(&mut self, category: Category) {
        tracing::debug!(category = %category, "Category selected");
        self.active_category = category;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    /// Back to the broadest view: empty search, `All`.
    pub fn clear_filters(&mut self) {
        tracing::debug!("Filters cleared");
        self.search_text.clear();
        self.active_category = Category::All;
    }

    /// Open the dialog. Re-opening an open dialog keeps its identity.
    pub fn open_assistant(&mut self) -> Uuid {
        if let (true, Some(id)) = (self.assistant_open, self.dialog_id) {
            return id;
        }
        let id = Uuid::new_v4();
        self.assistant_open = true;
        self.dialog_id = Some(id);
        tracing::debug!(dialog = %id, "Assistant opened");
        id
    }

    /// Close the dialog. An outstanding result for it will be discarded;
    /// the busy flag stays until that call finishes.
    pub fn close_assistant(&mut self) {
        if let Some(id) = self.dialog_id.take() {
            tracing::debug!(dialog = %id, busy = self.assistant_busy, "Assistant closed");
        }
        self.assistant_open = false;
    }

    pub fn set_symptom_draft(&mut self, text: &str) {
        self.symptom_draft = text.to_string();
    }

    /// Whether the "find specialist" trigger is enabled.
    pub fn can_classify(&self) -> bool {
        self.assistant_open && !self.assistant_busy && !self.symptom_draft.trim().is_empty()
    }

    /// The open dialog's id, if it can accept a new classification.
    fn idle_dialog(&self) -> Result<Uuid, SelectionError> {
        let dialog_id = match (self.assistant_open, self.dialog_id) {
            (true, Some(id)) => id,
            _ => return Err(SelectionError::AssistantClosed),
        };
        if self.assistant_busy {
            return Err(SelectionError::Busy);
        }
        Ok(dialog_id)
    }

    /// Store `symptoms` as the draft and begin classifying it. A refused
    /// request leaves the existing draft untouched.
    pub fn submit_symptoms(&mut self, symptoms: &str) -> Result<ClassificationTicket, SelectionError> {
        self.idle_dialog()?;
        if symptoms.trim().is_empty() {
            return Err(SelectionError::EmptySymptoms);
        }
        self.set_symptom_draft(symptoms);
        self.begin_classification()
    }

    /// Mark a classification as in flight for the open dialog.
    pub fn begin_classification(&mut self) -> Result<ClassificationTicket, SelectionError> {
        let dialog_id = self.idle_dialog()?;
        if self.symptom_draft.trim().is_empty() {
            return Err(SelectionError::EmptySymptoms);
        }

        self.assistant_busy = true;
        Ok(ClassificationTicket {
            dialog_id,
            symptoms: self.symptom_draft.clone(),
        })
    }

    /// Finish an in-flight classification.
    ///
    /// Applies only when the ticket's dialog is still the open one:
    /// reconcile, close the dialog, clear the draft. Busy clears either way.
    pub fn complete_classification(
        &mut self,
        ticket: &ClassificationTicket,
        raw_label: &str,
    ) -> ClassificationOutcome {
        let current = self.assistant_open && self.dialog_id == Some(ticket.dialog_id);

        let outcome = if current {
            let verdict = reconcile::validate_label(raw_label);
            let category = reconcile::reconcile(self, raw_label);
            self.close_assistant();
            self.symptom_draft.clear();
            ClassificationOutcome::Applied { category, verdict }
        } else {
            tracing::info!(dialog = %ticket.dialog_id, "Dialog closed before result arrived, discarding");
            ClassificationOutcome::Discarded {
                label: raw_label.to_string(),
            }
        };

        self.assistant_busy = false;
        outcome
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
