//! Test record endpoint handlers.
//!
//! Each handler connects the store, performs one operation and converts
//! the outcome into a response. A miss is a 404. Every other failure,
//! including an unreadable body or a rejected name, surfaces as a fixed
//! per-operation message while the cause is logged by [`RouterError`]'s
//! response conversion.

use hyper::{body::Bytes, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::response::{json_response, ListBody, SuccessBody};
use super::router::{AppState, RouterError};
use crate::model::{NewRecord, RecordId, RecordPatch, ENTITY_NAME};
use crate::store::StoreError;

const LIST_FAILED: &str = "Failed to fetch tests";
const CREATE_FAILED: &str = "Failed to create test";
const FETCH_FAILED: &str = "Failed to fetch test";
const UPDATE_FAILED: &str = "Failed to update test";
const DELETE_FAILED: &str = "Failed to delete test";

fn not_found() -> RouterError {
    RouterError::NotFound(format!("{} not found", ENTITY_NAME))
}

fn store_error(message: &'static str) -> impl FnOnce(StoreError) -> RouterError {
    move |e: StoreError| RouterError::Internal {
        message,
        cause: e.to_string(),
    }
}

fn parse_id(raw: &str, message: &'static str) -> Result<RecordId, RouterError> {
    RecordId::parse(raw).ok_or_else(|| RouterError::Internal {
        message,
        cause: format!("malformed identifier '{}'", raw),
    })
}

fn parse_body<T: DeserializeOwned>(
    body: &[u8],
    message: &'static str,
) -> Result<T, RouterError> {
    serde_json::from_slice(body).map_err(|e| RouterError::Internal {
        message,
        cause: format!("invalid request body: {}", e),
    })
}

/// Lists every record.
///
/// # Endpoint
/// `GET /api/tests`
///
/// # Response
/// - **200 OK**: `{"data": [{"id": "...", "name": "..."}]}`
pub fn list_records(state: &AppState) -> Result<Response<Bytes>, RouterError> {
    state
        .store
        .ensure_connected()
        .map_err(store_error(LIST_FAILED))?;
    let records = state.store.list().map_err(store_error(LIST_FAILED))?;
    json_response(StatusCode::OK, &ListBody { data: records })
}

/// Creates a record.
///
/// # Endpoint
/// `POST /api/tests`
///
/// # Request Body
/// ```json
/// { "name": "Alpha" }
/// ```
///
/// # Response
/// - **201 Created**: the stored record, including its assigned id
///
/// # Errors
/// - **500 Internal Server Error**: unreadable body, missing/blank name or
///   storage fault
pub fn create_record(state: &AppState, body: &[u8]) -> Result<Response<Bytes>, RouterError> {
    let draft: NewRecord = parse_body(body, CREATE_FAILED)?;

    state
        .store
        .ensure_connected()
        .map_err(store_error(CREATE_FAILED))?;
    let record = state
        .store
        .create(draft)
        .map_err(store_error(CREATE_FAILED))?;

    tracing::info!("Created {} {}", ENTITY_NAME, record.id);
    json_response(StatusCode::CREATED, &record)
}

/// Reads one record.
///
/// # Endpoint
/// `GET /api/tests/{id}`
///
/// # Errors
/// - **404 Not Found**: `{"error": "Test not found"}`
/// - **500 Internal Server Error**: malformed id or storage fault
pub fn get_record(state: &AppState, id: &str) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(id, FETCH_FAILED)?;

    state
        .store
        .ensure_connected()
        .map_err(store_error(FETCH_FAILED))?;
    let record = state
        .store
        .get(&id)
        .map_err(store_error(FETCH_FAILED))?
        .ok_or_else(not_found)?;

    json_response(StatusCode::OK, &record)
}

/// Partially updates a record and returns the post-update state.
///
/// # Endpoint
/// `PUT /api/tests/{id}`
///
/// # Request Body
/// ```json
/// { "name": "Beta" }
/// ```
///
/// Fields missing from the body are left unchanged.
///
/// # Errors
/// - **404 Not Found**: unknown id
/// - **500 Internal Server Error**: malformed id, unreadable body, blank
///   name or storage fault
pub fn update_record(
    state: &AppState,
    id: &str,
    body: &[u8],
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(id, UPDATE_FAILED)?;
    let patch: RecordPatch = parse_body(body, UPDATE_FAILED)?;

    state
        .store
        .ensure_connected()
        .map_err(store_error(UPDATE_FAILED))?;
    let record = state
        .store
        .update(&id, patch)
        .map_err(store_error(UPDATE_FAILED))?
        .ok_or_else(not_found)?;

    tracing::info!("Updated {} {}", ENTITY_NAME, record.id);
    json_response(StatusCode::OK, &record)
}

/// Deletes a record.
///
/// # Endpoint
/// `DELETE /api/tests/{id}`
///
/// # Response
/// - **200 OK**: `{"success": true}`
///
/// # Errors
/// - **404 Not Found**: unknown id, including a repeated delete
/// - **500 Internal Server Error**: malformed id or storage fault
pub fn delete_record(state: &AppState, id: &str) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(id, DELETE_FAILED)?;

    state
        .store
        .ensure_connected()
        .map_err(store_error(DELETE_FAILED))?;
    state
        .store
        .delete(&id)
        .map_err(store_error(DELETE_FAILED))?
        .ok_or_else(not_found)?;

    tracing::info!("Deleted {} {}", ENTITY_NAME, id);
    json_response(StatusCode::OK, &SuccessBody { success: true })
}
