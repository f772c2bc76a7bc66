//! Application state shared by every request handler.
//!
//! `CoreState` is wrapped in `Arc` at startup. The directory is read-only
//! and needs no lock; the selection lives behind a `Mutex` that is never
//! held across the classification call.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::classification::ClassificationGateway;
use crate::directory::Directory;
use crate::filter::{self, FilterSummary};
use crate::models::Category;
use crate::selection::{ClassificationOutcome, SelectionError, SelectionState};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Classification task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub struct CoreState {
    directory: Directory,
    selection: Arc<Mutex<SelectionState>>,
    gateway: ClassificationGateway,
}

impl CoreState {
    pub fn new(directory: Directory, gateway: ClassificationGateway) -> Self {
        Self {
            directory,
            selection: Arc::new(Mutex::new(SelectionState::new())),
            gateway,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn gateway(&self) -> &ClassificationGateway {
        &self.gateway
    }

    /// Acquire the selection for mutation.
    pub fn write_selection(&self) -> Result<MutexGuard<'_, SelectionState>, CoreError> {
        self.selection.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Owned copy of the current selection.
    pub fn selection(&self) -> Result<SelectionState, CoreError> {
        Ok(self.write_selection()?.clone())
    }

    /// Visible practitioners for the current selection.
    pub fn current_view(&self) -> Result<FilterSummary, CoreError> {
        let (category, search) = {
            let selection = self.write_selection()?;
            (selection.active_category, selection.search_text.clone())
        };
        Ok(self.view(category, &search))
    }

    /// Visible practitioners for an explicit category and search.
    pub fn view(&self, category: Category, search: &str) -> FilterSummary {
        filter::summarize(self.directory.records(), category, search)
    }

    /// Run the assistant for the open dialog.
    ///
    /// Stores the description as the dialog draft, marks the dialog busy,
    /// releases the lock for the network call, then applies or discards
    /// the result.
    ///
    /// The call and its completion run on a spawned task, so dropping the
    /// returned future (a disconnected client) still clears `assistant_busy`.
    pub async fn recommend(&self, symptoms: &str) -> Result<ClassificationOutcome, CoreError> {
        let ticket = self.write_selection()?.submit_symptoms(symptoms)?;
        tracing::info!(dialog = %ticket.dialog_id, "Recommendation requested");

        let selection = Arc::clone(&self.selection);
        let gateway = self.gateway.clone();
        let task = tokio::spawn(async move {
            let label = gateway.classify_async(ticket.symptoms.clone()).await;
            let mut selection = selection.lock().map_err(|_| CoreError::LockPoisoned)?;
            Ok::<_, CoreError>(selection.complete_classification(&ticket, &label))
        });

        task.await.map_err(|e| CoreError::Task(e.to_string()))?
    }
}
