//! Executes core `HttpRequest` values over the network with ureq.
//!
//! Status codes are returned as data (`http_status_as_error(false)`) so the
//! core decides what a 4xx/5xx means; only failures to get any response at
//! all become `TransportFailure`.

use food_core::{ClientConfig, HttpMethod, HttpRequest, HttpResponse, TransportFailure};

pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "sending request");
        let result = match (req.method, req.body) {
            (HttpMethod::Post, Some(body)) => {
                let mut builder = self.agent.post(&req.url);
                for (key, value) in &req.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.agent.post(&req.url).send_empty(),
        };
        let mut response = result.map_err(|e| {
            tracing::debug!(error = %e, "transport failure");
            TransportFailure::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response_body(status, response.body_mut().read_to_string())?;
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, headers, body })
    }
}

/// A body that cannot be read loses a 2xx response, but a non-2xx response
/// keeps its status with an empty body so the core can report it.
fn response_body<E: std::fmt::Display>(status: u16, read: Result<String, E>) -> Result<String, TransportFailure> {
    match read {
        Ok(body) => Ok(body),
        Err(e) if (200..300).contains(&status) => Err(TransportFailure::new(e.to_string())),
        Err(e) => {
            tracing::debug!(status, error = %e, "unreadable error body");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_core::{AnalysisClient, RequestError};

    #[test]
    fn unreadable_success_body_is_a_transport_failure() {
        let err = response_body(200, Err("connection reset")).unwrap_err();
        assert_eq!(err, TransportFailure::new("connection reset"));
    }

    #[test]
    fn unreadable_error_body_keeps_the_status() {
        let body = response_body(503, Err("connection reset")).unwrap();
        assert_eq!(body, "");

        let response = HttpResponse {
            status: 503,
            headers: Vec::new(),
            body,
        };
        let err = AnalysisClient::new("http://localhost:3002")
            .parse_analyze(response)
            .unwrap_err();
        assert_eq!(
            RequestError::from(err).message,
            "Request failed with status code 503"
        );
    }

    #[test]
    fn readable_body_passes_through() {
        assert_eq!(response_body::<&str>(404, Ok("{}".to_string())).unwrap(), "{}");
    }
}
