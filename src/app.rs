//! Application State
//!
//! Central application state for the tadmin List Page: the authoritative
//! record list, its table view, the action modal and status toasts.

use crate::api::{format_api_error, ApiClient};
use crate::config::Config;
use crate::modal::{ActionKind, ActionModal, ModalOutcome};
use crate::model::Record;
use crate::notification::NotificationManager;
use crate::table::{Column, DataTable};

/// Application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal, // Viewing list
    Search, // / search input
    Modal,  // Action modal open
    Help,   // ? help popup
}

/// Columns of the record table. `action` has no record field and only
/// carries the key hints.
pub fn record_columns() -> Vec<Column> {
    vec![
        Column::new("Name", "name", 60),
        Column::new("Action", "action", 40),
    ]
}

/// Main application state
pub struct App {
    pub client: ApiClient,

    // Authoritative record list, replaced on every fetch
    pub records: Vec<Record>,

    pub table: DataTable,
    pub modal: ActionModal,
    pub mode: Mode,

    // UI state
    pub loading: bool,
    pub error_message: Option<String>,

    pub notification_manager: NotificationManager,

    // Persistent configuration
    pub config: Config,
}

impl App {
    pub fn new(client: ApiClient, config: Config, page_size: usize) -> Self {
        Self {
            client,
            records: Vec::new(),
            table: DataTable::new(record_columns()).with_page_size(page_size),
            modal: ActionModal::default(),
            mode: Mode::Normal,
            loading: false,
            error_message: None,
            notification_manager: NotificationManager::new(),
            config,
        }
    }

    // =========================================================================
    // Data Fetching
    // =========================================================================

    /// Fetch the full list. Failures leave an error for manual retry.
    pub async fn fetch_records(&mut self) {
        self.loading = true;
        self.error_message = None;

        match self.client.list_records().await {
            Ok(records) => {
                tracing::info!("Loaded {} records", records.len());
                self.records = records;
                self.table.sync(&self.records);
            }
            Err(e) => {
                tracing::error!("Failed to fetch records: {}", e);
                self.error_message = Some(format_api_error(&e));
            }
        }

        self.loading = false;
    }

    /// Retry is only meaningful after a failed fetch
    pub fn can_retry(&self) -> bool {
        self.error_message.is_some() && !self.loading
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn selected_record(&self) -> Option<&Record> {
        self.table.selected_item(&self.records)
    }

    pub fn next(&mut self) {
        self.table.select_next(&self.records);
    }

    pub fn previous(&mut self) {
        self.table.select_previous();
    }

    pub fn next_page(&mut self) {
        self.table.next_page(&self.records);
    }

    pub fn previous_page(&mut self) {
        self.table.previous_page();
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    pub fn enter_search_mode(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_mode(&mut self) {
        if self.mode == Mode::Modal {
            self.modal.close();
        }
        self.mode = Mode::Normal;
    }

    /// Open the modal for `kind` on the selected record, loading lazily
    /// populated content before returning.
    pub async fn open_modal(&mut self, kind: ActionKind) {
        let record = if kind.needs_record() {
            match self.selected_record() {
                Some(r) => Some(r.clone()),
                None => return,
            }
        } else {
            None
        };

        self.modal = ActionModal::open(kind, record.as_ref());
        if !self.modal.is_open() {
            return;
        }
        self.mode = Mode::Modal;
        self.modal.load(&self.client).await;
    }

    /// Mark the open form or confirmation busy so the next frame shows it.
    /// The request itself goes out in [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) {
        self.modal.begin_submit();
    }

    /// Whether a submission is waiting for `finish_submit`
    pub fn has_pending_submit(&self) -> bool {
        self.mode == Mode::Modal && self.modal.is_busy()
    }

    /// Send the pending submission; on success report and refetch
    pub async fn finish_submit(&mut self) {
        if let Some(outcome) = self.modal.finish_submit(&self.client).await {
            self.handle_outcome(outcome).await;
        }
    }

    async fn handle_outcome(&mut self, outcome: ModalOutcome) {
        let message = outcome.success_message();
        tracing::info!("{}", message);
        self.notification_manager.success(message);
        self.mode = Mode::Normal;
        self.fetch_records().await;
    }
}
