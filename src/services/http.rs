// ============================================================================
// HTTP TRANSPORT - Request/response types + gloo-net transport
// ============================================================================
// Transport only. No session logic: credentials and query params arrive
// already decided by the caller.
// ============================================================================

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::models::ApiEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// How the request proves who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    None,
    /// Browser-managed session cookie (admin).
    Cookie,
    /// `Authorization: Bearer <token>` (parent).
    Bearer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<MultipartPart>),
}

/// Transport-neutral description of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub credentials: Credentials,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            credentials: Credentials::None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, PortalError> {
        let value = serde_json::to_value(body)
            .map_err(|e| PortalError::Parse(format!("Serialization error: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn has_query(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Status plus raw body; decoding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, PortalError> {
        serde_json::from_str(&self.body).map_err(|e| PortalError::Parse(e.to_string()))
    }

    pub fn envelope<R: DeserializeOwned>(&self) -> Result<ApiEnvelope<R>, PortalError> {
        self.json()
    }

    /// `data` of a 2xx `{success: true}` envelope; anything else is an error.
    pub fn into_data<R: DeserializeOwned>(self) -> Result<R, PortalError> {
        let envelope = match self.envelope::<R>() {
            Ok(envelope) => envelope,
            Err(_) if !self.ok() => {
                return Err(PortalError::Http {
                    status: self.status,
                    message: self.body,
                })
            }
            Err(e) => return Err(e),
        };

        if !self.ok() || !envelope.success {
            return Err(PortalError::Http {
                status: self.status,
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| PortalError::Parse("Response without data".to_string()))
    }
}

/// Sends one request. `Err` means the request never produced an HTTP
/// response (offline, CORS, timeout); every status code is an `Ok`.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PortalError>;
}

/// Browser transport over `fetch` (gloo-net).
#[derive(Clone)]
pub struct GlooTransport {
    base_url: String,
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(config.backend_url(), config.network_timeout_ms())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn build(&self, request: &ApiRequest) -> Result<Request, PortalError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        builder = match &request.credentials {
            Credentials::None => builder,
            Credentials::Cookie => builder.credentials(RequestCredentials::Include),
            Credentials::Bearer(token) => {
                builder.header("Authorization", &format!("Bearer {}", token))
            }
        };

        let built = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        };

        built.map_err(|e| PortalError::Network(format!("Request build error: {}", e)))
    }
}

impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PortalError> {
        let http_request = self.build(&request)?;
        log::debug!("🌐 {:?} {}", request.method, request.path);

        let sent = if self.timeout_ms == 0 {
            http_request.send().await
        } else {
            let send = Box::pin(http_request.send());
            let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));
            match select(send, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => {
                    log::warn!("⏱️ {} timed out after {} ms", request.path, self.timeout_ms);
                    return Err(PortalError::Network(format!(
                        "Timeout after {} ms",
                        self.timeout_ms
                    )));
                }
            }
        };

        let response = sent.map_err(|e| PortalError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortalError::Network(format!("Body read error: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

fn form_data(parts: &[MultipartPart]) -> Result<FormData, PortalError> {
    let form = FormData::new()
        .map_err(|_| PortalError::Network("FormData unavailable".to_string()))?;

    for part in parts {
        let appended = match part {
            MultipartPart::Text { name, value } => form.append_with_str(name, value),
            MultipartPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let blob_parts = js_sys::Array::of1(&array);
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
                    .map_err(|_| PortalError::Network("Blob creation failed".to_string()))?;
                form.append_with_blob_and_filename(name, &blob, file_name)
            }
        };
        appended.map_err(|_| PortalError::Network("FormData append failed".to_string()))?;
    }

    Ok(form)
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use futures::channel::oneshot;

    use super::*;

    /// Scripted transport: answers in order and records every request.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: RefCell<VecDeque<Result<ApiResponse, PortalError>>>,
        requests: RefCell<Vec<ApiRequest>>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(&self, status: u16, body: serde_json::Value) {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub(crate) fn fail(&self, error: PortalError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        /// The next `send` waits until the returned sender fires.
        pub(crate) fn hold_next(&self) -> oneshot::Sender<()> {
            let (sender, receiver) = oneshot::channel();
            *self.gate.borrow_mut() = Some(receiver);
            sender
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PortalError> {
            self.requests.borrow_mut().push(request);

            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }

            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PortalError::Network("No scripted response".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder_tracks_query_and_body() {
        let request = ApiRequest::post("/api/fees")
            .query("medium", "Hindi")
            .json(&json!({"amount": 1200}))
            .unwrap()
            .with_credentials(Credentials::Cookie);

        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.has_query("medium"));
        assert!(!request.has_query("year"));
        assert_eq!(request.body, RequestBody::Json(json!({"amount": 1200})));
        assert_eq!(request.credentials, Credentials::Cookie);
    }

    #[test]
    fn into_data_unwraps_successful_envelope() {
        let response = ApiResponse {
            status: 200,
            body: json!({"success": true, "data": {"count": 3}}).to_string(),
        };
        let data: serde_json::Value = response.into_data().unwrap();
        assert_eq!(data["count"], 3);
    }

    #[test]
    fn into_data_reports_server_message() {
        let response = ApiResponse {
            status: 400,
            body: json!({"success": false, "message": "Student not found"}).to_string(),
        };
        let err = response.into_data::<serde_json::Value>().unwrap_err();
        assert_eq!(
            err,
            PortalError::Http {
                status: 400,
                message: "Student not found".to_string()
            }
        );
    }

    #[test]
    fn into_data_keeps_raw_body_when_not_json() {
        let response = ApiResponse {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        let err = response.into_data::<serde_json::Value>().unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn success_false_on_200_is_an_error() {
        let response = ApiResponse {
            status: 200,
            body: json!({"success": false}).to_string(),
        };
        assert!(matches!(
            response.into_data::<serde_json::Value>(),
            Err(PortalError::Http { status: 200, .. })
        ));
    }
}
