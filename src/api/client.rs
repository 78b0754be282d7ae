//! Test record API client
//!
//! Typed wrapper over [`HttpClient`] for the five record endpoints.

use super::http::{ClientError, HttpClient};
use crate::model::{NewRecord, Record, RecordId, RecordPatch};
use crate::server::RESOURCE_PATH;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// List bodies come either bare or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Wrapped { data: Vec<Record> },
    Bare(Vec<Record>),
}

impl ListPayload {
    fn into_records(self) -> Vec<Record> {
        match self {
            ListPayload::Wrapped { data } => data,
            ListPayload::Bare(records) => records,
        }
    }
}

/// Main API client
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base =
            Url::parse(server_url).map_err(|_| ClientError::InvalidUrl(server_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(server_url.to_string()));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: HttpClient::new(timeout)?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of the record collection
    pub fn collection_url(&self) -> String {
        self.join(RESOURCE_PATH.trim_start_matches('/'))
    }

    /// URL of a single record
    pub fn record_url(&self, id: &RecordId) -> String {
        self.join(&format!(
            "{}/{}",
            RESOURCE_PATH.trim_start_matches('/'),
            urlencoding::encode(id.as_str())
        ))
    }

    fn join(&self, path: &str) -> String {
        self.base
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.base, path))
    }

    pub async fn list_records(&self) -> Result<Vec<Record>, ClientError> {
        let payload: ListPayload = self
            .http
            .send::<(), _>(Method::GET, &self.collection_url(), None)
            .await?;
        Ok(payload.into_records())
    }

    pub async fn get_record(&self, id: &RecordId) -> Result<Record, ClientError> {
        self.http
            .send::<(), _>(Method::GET, &self.record_url(id), None)
            .await
    }

    pub async fn create_record(&self, name: &str) -> Result<Record, ClientError> {
        self.http
            .send(Method::POST, &self.collection_url(), Some(&NewRecord::named(name)))
            .await
    }

    pub async fn update_record(&self, id: &RecordId, name: &str) -> Result<Record, ClientError> {
        self.http
            .send(Method::PUT, &self.record_url(id), Some(&RecordPatch::name(name)))
            .await
    }

    pub async fn delete_record(&self, id: &RecordId) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .http
            .send::<(), _>(Method::DELETE, &self.record_url(id), None)
            .await?;
        Ok(())
    }
}
