//! Blocking HTTP(S) client adapter.
//!
//! Implements [`HttpPort`] for the two telemetry endpoints.  Every request
//! opens a fresh connection and drops it (response included) before
//! returning, so a failed upload never leaks a socket into the next cycle.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspHttpConnection` wrapped in the
//!   embedded-svc `Client`, TLS via the built-in certificate bundle.
//! - **all other targets**: an in-memory client that records requests and
//!   answers with a configurable status.

use crate::app::ports::HttpPort;
use crate::error::UploadError;

#[cfg(target_os = "espidf")]
pub use esp_impl::EspHttpAdapter;

#[cfg(not(target_os = "espidf"))]
pub use sim_impl::{RecordedRequest, SimHttpClient};

#[cfg(target_os = "espidf")]
mod esp_impl {
    use core::time::Duration;

    use embedded_svc::http::client::Client;
    use embedded_svc::http::Method;
    use embedded_svc::io::{Read, Write};
    use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
    use esp_idf_svc::io::EspIOError;
    use log::debug;

    use super::{HttpPort, UploadError};

    fn transport(e: EspIOError) -> UploadError {
        UploadError::Transport(e.0.code())
    }

    pub struct EspHttpAdapter {
        timeout: Duration,
    }

    impl EspHttpAdapter {
        pub fn new(timeout_ms: u32) -> Self {
            Self {
                timeout: Duration::from_millis(u64::from(timeout_ms)),
            }
        }

        fn send(&mut self, method: Method, url: &str, body: &str) -> Result<u16, UploadError> {
            let conf = Configuration {
                timeout: Some(self.timeout),
                crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
                ..Default::default()
            };
            let conn = EspHttpConnection::new(&conf).map_err(|e| UploadError::Transport(e.code()))?;
            let mut client = Client::wrap(conn);

            let content_length = body.len().to_string();
            let headers = [
                ("Content-Type", "application/json"),
                ("Content-Length", content_length.as_str()),
            ];

            let mut request = client.request(method, url, &headers).map_err(transport)?;
            request.write_all(body.as_bytes()).map_err(transport)?;
            request.flush().map_err(transport)?;

            let mut response = request.submit().map_err(transport)?;
            let status = response.status();

            // Drain so the connection closes cleanly; the body is not used.
            let mut buf = [0u8; 256];
            let mut drained = 0usize;
            loop {
                let n = response.read(&mut buf).map_err(transport)?;
                if n == 0 {
                    break;
                }
                drained += n;
            }
            debug!("http: {:?} {} -> {} ({} body bytes)", method, url, status, drained);

            Ok(status)
        }
    }

    impl HttpPort for EspHttpAdapter {
        fn post_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
            self.send(Method::Post, url, body)
        }

        fn put_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
            self.send(Method::Put, url, body)
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod sim_impl {
    use log::info;

    use super::{HttpPort, UploadError};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub body: String,
    }

    /// Host stand-in: logs and records every request.
    pub struct SimHttpClient {
        status: u16,
        requests: Vec<RecordedRequest>,
    }

    impl SimHttpClient {
        pub fn new() -> Self {
            Self { status: 200, requests: Vec::new() }
        }

        /// Status returned for every subsequent request.
        pub fn respond_with(&mut self, status: u16) {
            self.status = status;
        }

        pub fn requests(&self) -> &[RecordedRequest] {
            &self.requests
        }

        fn record(&mut self, method: &'static str, url: &str, body: &str) -> u16 {
            info!("http(sim): {} {} ({} bytes) -> {}", method, url, body.len(), self.status);
            self.requests.push(RecordedRequest {
                method,
                url: url.to_owned(),
                body: body.to_owned(),
            });
            self.status
        }
    }

    impl Default for SimHttpClient {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpPort for SimHttpClient {
        fn post_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
            Ok(self.record("POST", url, body))
        }

        fn put_json(&mut self, url: &str, body: &str) -> Result<u16, UploadError> {
            Ok(self.record("PUT", url, body))
        }
    }

}
