//! Record form used by the create and update actions

use super::ModalOutcome;
use crate::api::{format_api_error, ApiClient};
use crate::model::{validate_name, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    /// Present in update mode
    id: Option<RecordId>,
    pub name: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RecordForm {
    /// Empty form that creates a new record
    pub fn create() -> Self {
        Self {
            id: None,
            name: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Form pre-filled from an existing record
    pub fn update(record: &Record) -> Self {
        Self {
            id: Some(record.id.clone()),
            name: record.name.clone(),
            submitting: false,
            error: None,
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_update(), self.submitting) {
            (true, false) => "Update",
            (false, false) => "Create",
            (_, true) => "Saving...",
        }
    }

    /// Input is locked while a submission is in flight
    pub fn push_char(&mut self, c: char) {
        if !self.submitting {
            self.name.push(c);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if !self.submitting {
            self.name.pop();
            self.error = None;
        }
    }

    /// Validate locally and mark the form busy. Returns false when there is
    /// nothing to send; `error` explains why.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        if let Err(message) = validate_name(Some(self.name.as_str())) {
            self.error = Some(message);
            return false;
        }
        self.submitting = true;
        self.error = None;
        true
    }

    /// Send a form marked busy by [`begin_submit`](Self::begin_submit).
    /// `None` means the form stays open with `error` set.
    pub async fn finish_submit(&mut self, client: &ApiClient) -> Option<ModalOutcome> {
        if !self.submitting {
            return None;
        }

        let result = match &self.id {
            Some(id) => client
                .update_record(id, &self.name)
                .await
                .map(ModalOutcome::Updated),
            None => client
                .create_record(&self.name)
                .await
                .map(ModalOutcome::Created),
        };

        self.submitting = false;
        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::warn!("Form submission failed: {}", e);
                self.error = Some(format_api_error(&e));
                None
            }
        }
    }
}
