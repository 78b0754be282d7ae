//! Read-only record viewer
//!
//! The viewer is created in `Loading` and fetches its record the first time
//! [`RecordViewer::load`] runs, which the app does right after opening it.

use crate::api::ApiClient;
use crate::model::{Record, RecordId};

/// Shown in place of the record when the fetch fails
pub const LOAD_FAILED: &str = "Failed to load data.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded(Record),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordViewer {
    id: RecordId,
    pub state: ViewState,
}

impl RecordViewer {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            state: ViewState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    /// Fetch the record once; later calls are no-ops
    pub async fn load(&mut self, client: &ApiClient) {
        if !self.is_loading() {
            return;
        }
        self.state = match client.get_record(&self.id).await {
            Ok(record) => ViewState::Loaded(record),
            Err(e) => {
                tracing::warn!("Failed to load record {}: {}", self.id, e);
                ViewState::Failed(LOAD_FAILED.to_string())
            }
        };
    }
}
