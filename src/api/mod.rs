//! Test record API client module
//!
//! - [`client`] - typed client for the record endpoints
//! - [`http`] - request plumbing, error type, display formatting
//!
//! # Example
//!
//! ```ignore
//! use tadmin::api::ApiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://127.0.0.1:8080", Duration::from_secs(10))?;
//!     let records = client.list_records().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::ApiClient;
pub use http::{format_api_error, ClientError};
