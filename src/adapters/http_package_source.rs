//! Package source implementation using reqwest.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use url::Url;

use crate::domain::AppError;
use crate::ports::{PackageSource, PackageStream};

const USER_AGENT: &str = concat!("launchpad/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_BODY_BYTES: u64 = 512;

/// HTTP transport for package archives.
///
/// One GET per call, no retries. The total request timeout is disabled so a
/// slow download is never cut off; only connection setup is bounded.
#[derive(Debug, Clone)]
pub struct HttpPackageSource {
    client: Client,
}

impl HttpPackageSource {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| {
                AppError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl PackageSource for HttpPackageSource {
    fn open(&self, url: &Url) -> Result<PackageStream, AppError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/octet-stream, */*"))
            .send()
            .map_err(|e| {
                AppError::download(url.as_str(), format!("HTTP request failed: {}", e), None)
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = String::new();
            let _ = response.take(MAX_ERROR_BODY_BYTES).read_to_string(&mut body);
            let detail = body.trim();
            let message = if detail.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, detail)
            };
            return Err(AppError::download(url.as_str(), message, Some(status.as_u16())));
        }

        Ok(Box::new(response))
    }
}
