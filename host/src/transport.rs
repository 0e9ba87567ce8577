//! Executes core `HttpRequest`s over the network.

use users_core::{HttpMethod, HttpRequest, HttpResponse, TransportError};

/// Blocking executor for a single request. HTTP error statuses are
/// responses, not errors; only a missing response is a `TransportError`.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a ureq agent. No timeouts, no retries.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.path.as_str();
        let headers = &request.headers;
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(path), headers).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_headers(self.agent.delete(path).force_send_body(), headers).send(body.as_bytes())
            }
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(path), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(path), headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(path), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(path), headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(path), headers).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
