//! tadmin - admin service and terminal client for Test records
//!
//! The crate has two halves sharing one record model:
//!
//! - [`server`] and [`store`] - the `/api/tests` HTTP resource over a
//!   document collection
//! - [`api`], [`app`], [`table`], [`modal`] and [`ui`] - the terminal List
//!   Page that browses and edits records through that resource

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod modal;
pub mod model;
pub mod notification;
pub mod server;
pub mod store;
pub mod table;
pub mod ui;

/// Version injected at compile time via TADMIN_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("TADMIN_VERSION") {
    Some(v) => v,
    None => "dev",
};
