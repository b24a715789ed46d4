use std::fmt::Display;

use async_trait::async_trait;
use gloo_net::http::{Method, Request};
use serde::Deserialize;
use thiserror::Error;
use web_sys::{FormData, HtmlFormElement};

use crate::config;

/// What came back from the form backend, reduced to what the controller reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request failed: {0}")]
pub struct TransportError(pub String);

#[async_trait(?Send)]
pub trait FormTransport {
    /// Posts the form's current fields to its configured endpoint.
    async fn submit(&self) -> Result<BackendResponse, TransportError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", .0.join(" "))]
    ServerRejection(Vec<String>),

    #[error("server rejected the signup with status {status}")]
    ServerRejectionOpaque { status: u16 },

    #[error("{0}")]
    Network(#[from] TransportError),
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Option<Vec<ErrorDetail>>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Classifies a backend response. `Ok(())` means the signup was accepted.
pub fn check_response(response: &BackendResponse) -> Result<(), SubmitError> {
    if response.ok() {
        return Ok(());
    }
    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(ErrorBody { errors: Some(details) }) if !details.is_empty() => Err(
            SubmitError::ServerRejection(details.into_iter().map(|d| d.message).collect()),
        ),
        _ => Err(SubmitError::ServerRejectionOpaque { status: response.status }),
    }
}

/// Sends the page's `<form>` with `fetch`, honoring its `action` and `method`.
pub struct FetchTransport {
    form: HtmlFormElement,
}

impl FetchTransport {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

fn form_method(method: &str) -> Method {
    match method.to_ascii_lowercase().as_str() {
        "get" => Method::GET,
        "put" => Method::PUT,
        "patch" => Method::PATCH,
        "delete" => Method::DELETE,
        _ => Method::POST,
    }
}

#[async_trait(?Send)]
impl FormTransport for FetchTransport {
    async fn submit(&self) -> Result<BackendResponse, TransportError> {
        let body = FormData::new_with_form(&self.form)
            .map_err(|e| TransportError(format!("{:?}", e)))?;
        let response = Request::new(&self.form.action())
            .method(form_method(&self.form.method()))
            .header("Accept", config::ACCEPT_JSON)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        if response.ok() {
            return Ok(BackendResponse { status, body: String::new() });
        }
        error_response(status, response.text().await)
    }
}

/// Wraps the body of a rejected request. A body that cannot be read counts as
/// a failed request, not as a rejection.
pub fn error_response<E: Display>(
    status: u16,
    body: Result<String, E>,
) -> Result<BackendResponse, TransportError> {
    let body = body.map_err(|e| TransportError(format!("reading {} response: {}", status, e)))?;
    Ok(BackendResponse { status, body })
}
