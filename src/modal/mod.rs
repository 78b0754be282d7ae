//! Action Modal
//!
//! One modal serves all four record actions. It is either closed or showing
//! exactly one of:
//!
//! - [`RecordViewer`] for `view`, lazily fetching the record
//! - [`RecordForm`] for `create` and `update`
//! - [`DeleteConfirm`] for `delete`
//!
//! Actions that succeed close the modal and hand a [`ModalOutcome`] back to
//! the caller, which reports it and refetches the list. Failures keep the
//! modal open with the error shown inline. Closing discards any unsaved input.

mod form;
mod viewer;

pub use form::RecordForm;
pub use viewer::{RecordViewer, ViewState, LOAD_FAILED};

use crate::api::{format_api_error, ApiClient};
use crate::model::{Record, RecordId, ENTITY_NAME};

/// The four record actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Create,
    Update,
    Delete,
}

impl ActionKind {
    pub fn title(&self) -> String {
        let verb = match self {
            Self::View => "View",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        };
        format!("{} {}", verb, ENTITY_NAME)
    }

    /// Whether the action targets an existing record
    pub fn needs_record(&self) -> bool {
        !matches!(self, Self::Create)
    }
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Created(Record),
    Updated(Record),
    Deleted(RecordId),
}

impl ModalOutcome {
    pub fn success_message(&self) -> String {
        match self {
            Self::Created(_) => "Data inserted successfully".to_string(),
            Self::Updated(_) => "Data updated successfully".to_string(),
            Self::Deleted(_) => format!("{} deleted successfully", ENTITY_NAME),
        }
    }
}

/// Delete confirmation for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirm {
    id: RecordId,
    pub name: String,
    pub deleting: bool,
    pub error: Option<String>,
}

impl DeleteConfirm {
    pub fn new(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            deleting: false,
            error: None,
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete this {}?",
            ENTITY_NAME.to_lowercase()
        )
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.deleting {
            "Deleting..."
        } else {
            "Yes, Delete"
        }
    }

    /// Mark the confirmation busy. Returns false if a delete is in flight.
    pub fn begin_confirm(&mut self) -> bool {
        if self.deleting {
            return false;
        }
        self.deleting = true;
        self.error = None;
        true
    }

    pub async fn finish_confirm(&mut self, client: &ApiClient) -> Option<ModalOutcome> {
        if !self.deleting {
            return None;
        }

        let result = client.delete_record(&self.id).await;
        self.deleting = false;

        match result {
            Ok(()) => Some(ModalOutcome::Deleted(self.id.clone())),
            Err(e) => {
                tracing::warn!("Delete of {} failed: {}", self.id, e);
                self.error = Some(format!("Delete failed: {}", format_api_error(&e)));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionModal {
    #[default]
    Closed,
    View(RecordViewer),
    Create(RecordForm),
    Update(RecordForm),
    Delete(DeleteConfirm),
}

impl ActionModal {
    /// Open the modal for `kind`. Record actions without a record stay closed.
    pub fn open(kind: ActionKind, record: Option<&Record>) -> Self {
        match (kind, record) {
            (ActionKind::Create, _) => Self::Create(RecordForm::create()),
            (ActionKind::View, Some(r)) => Self::View(RecordViewer::new(r.id.clone())),
            (ActionKind::Update, Some(r)) => Self::Update(RecordForm::update(r)),
            (ActionKind::Delete, Some(r)) => Self::Delete(DeleteConfirm::new(r)),
            (_, None) => Self::Closed,
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::Closed => None,
            Self::View(_) => Some(ActionKind::View),
            Self::Create(_) => Some(ActionKind::Create),
            Self::Update(_) => Some(ActionKind::Update),
            Self::Delete(_) => Some(ActionKind::Delete),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match self {
            Self::Create(form) | Self::Update(form) => Some(form),
            _ => None,
        }
    }

    /// Run any pending lazy load
    pub async fn load(&mut self, client: &ApiClient) {
        if let Self::View(viewer) = self {
            viewer.load(client).await;
        }
    }

    /// Start submitting the form or confirming the delete. Returns true when
    /// a request is now pending for [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> bool {
        match self {
            Self::Create(form) | Self::Update(form) => form.begin_submit(),
            Self::Delete(confirm) => confirm.begin_confirm(),
            Self::View(_) | Self::Closed => false,
        }
    }

    /// Whether a submission is waiting to be sent
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Create(form) | Self::Update(form) => form.submitting,
            Self::Delete(confirm) => confirm.deleting,
            Self::View(_) | Self::Closed => false,
        }
    }

    /// Send the pending submission. Closes on success.
    pub async fn finish_submit(&mut self, client: &ApiClient) -> Option<ModalOutcome> {
        let outcome = match self {
            Self::Create(form) | Self::Update(form) => form.finish_submit(client).await,
            Self::Delete(confirm) => confirm.finish_confirm(client).await,
            Self::View(_) | Self::Closed => None,
        };
        if outcome.is_some() {
            self.close();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: RecordId::parse("1").unwrap(),
            name: "Alpha".to_string(),
        }
    }

    #[test]
    fn test_initially_closed() {
        let modal = ActionModal::default();
        assert!(!modal.is_open());
        assert_eq!(modal.kind(), None);
    }

    #[test]
    fn test_open_each_kind() {
        let r = record();
        for kind in [
            ActionKind::View,
            ActionKind::Create,
            ActionKind::Update,
            ActionKind::Delete,
        ] {
            let modal = ActionModal::open(kind, Some(&r));
            assert_eq!(modal.kind(), Some(kind));
        }
    }

    #[test]
    fn test_record_actions_need_a_record() {
        assert!(!ActionModal::open(ActionKind::Delete, None).is_open());
        assert!(!ActionModal::open(ActionKind::View, None).is_open());
        assert!(ActionModal::open(ActionKind::Create, None).is_open());
    }

    #[test]
    fn test_close_discards_input() {
        let mut modal = ActionModal::open(ActionKind::Create, None);
        if let Some(form) = modal.form_mut() {
            form.push_char('x');
        }
        modal.close();
        assert!(!modal.is_open());

        let mut reopened = ActionModal::open(ActionKind::Create, None);
        assert_eq!(reopened.form_mut().map(|f| f.name.clone()), Some(String::new()));
    }

    #[test]
    fn test_viewer_starts_loading() {
        match ActionModal::open(ActionKind::View, Some(&record())) {
            ActionModal::View(viewer) => {
                assert!(viewer.is_loading());
                assert_eq!(viewer, RecordViewer::new(RecordId::parse("1").unwrap()));
            }
            other => panic!("unexpected modal: {other:?}"),
        }
    }

    #[test]
    fn test_begin_submit_marks_busy() {
        let mut delete = ActionModal::open(ActionKind::Delete, Some(&record()));
        assert!(!delete.is_busy());
        assert!(delete.begin_submit());
        assert!(delete.is_busy());
        match &delete {
            ActionModal::Delete(confirm) => assert_eq!(confirm.confirm_label(), "Deleting..."),
            other => panic!("unexpected modal: {other:?}"),
        }
        assert!(!delete.begin_submit());

        let mut blank = ActionModal::open(ActionKind::Create, None);
        assert!(!blank.begin_submit());
        assert!(!blank.is_busy());

        let mut view = ActionModal::open(ActionKind::View, Some(&record()));
        assert!(!view.begin_submit());
    }

    #[test]
    fn test_titles_and_messages() {
        assert_eq!(ActionKind::Delete.title(), "Delete Test");
        let r = record();
        assert_eq!(
            ModalOutcome::Deleted(r.id.clone()).success_message(),
            "Test deleted successfully"
        );
        assert_eq!(
            ModalOutcome::Created(r.clone()).success_message(),
            "Data inserted successfully"
        );
        assert_eq!(
            ModalOutcome::Updated(r).success_message(),
            "Data updated successfully"
        );
        assert_eq!(
            DeleteConfirm::new(&record()).prompt(),
            "Are you sure you want to delete this test?"
        );
    }
}
