//! Matchit routing configuration.

use std::sync::Arc;

use http_body_util::{BodyExt, Limited};
use hyper::{body::Bytes, Method, Request, Response, StatusCode};
use matchit::{InsertError, Router as MatchitRouter};

use super::handlers;
use super::response::error_response;
use crate::store::RecordStore;

/// Base path of the Test resource
pub const RESOURCE_PATH: &str = "/api/tests";

/// Largest request body accepted, in bytes
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the Test resource routes.
    pub fn new(store: Arc<dyn RecordStore>) -> Result<Self, InsertError> {
        let mut router = MatchitRouter::new();
        router.insert(RESOURCE_PATH, RouteHandler::Collection)?;
        router.insert(format!("{RESOURCE_PATH}/{{id}}"), RouteHandler::Member)?;

        Ok(Self {
            inner: router,
            state: AppState { store },
        })
    }

    /// Routes an incoming request, reading its body first.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: hyper::body::Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();

        let body = match Limited::new(body, MAX_BODY_BYTES).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::warn!("Failed to read request body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
            }
        };

        self.dispatch(&parts.method, parts.uri.path(), &body)
    }

    /// Dispatches an already-read request to its handler.
    pub fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> Response<Bytes> {
        let response = match self.inner.at(path) {
            Ok(matched) => matched
                .value
                .handle(method, matched.params.get("id"), body, &self.state)
                .unwrap_or_else(Into::into),
            Err(_) => RouterError::NotFound("Not found".to_string()).into(),
        };

        tracing::debug!("{} {} -> {}", method, path, response.status().as_u16());
        response
    }
}

/// Route handler function.
enum RouteHandler {
    Collection,
    Member,
}

impl RouteHandler {
    fn handle(
        &self,
        method: &Method,
        id: Option<&str>,
        body: &[u8],
        state: &AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        match (self, id) {
            (RouteHandler::Collection, _) => match *method {
                Method::GET => handlers::list_records(state),
                Method::POST => handlers::create_record(state, body),
                _ => Err(RouterError::MethodNotAllowed),
            },
            (RouteHandler::Member, Some(id)) => match *method {
                Method::GET => handlers::get_record(state, id),
                Method::PUT => handlers::update_record(state, id, body),
                Method::DELETE => handlers::delete_record(state, id),
                _ => Err(RouterError::MethodNotAllowed),
            },
            (RouteHandler::Member, None) => Err(RouterError::NotFound("Not found".to_string())),
        }
    }
}

/// Router error type.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Unexpected fault; `message` goes to the caller, `cause` only to the log
    #[error("{message}: {cause}")]
    Internal {
        message: &'static str,
        cause: String,
    },
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        match &err {
            RouterError::MethodNotAllowed => {
                error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
            }
            RouterError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            RouterError::Internal { message, cause } => {
                tracing::error!("{}: {}", message, cause);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}
