//! The transport session: the only component that performs network I/O.
//!
//! A [`Session`] owns the connection pool, credentials, and retry policy.
//! Cloning is cheap and clones share the pool, so concurrent callers only
//! contend for actual connections.

use std::{fmt, sync::Arc, time::Duration};

use http::StatusCode;

use crate::{
  error::{ClientError, TransportError},
  request::RequestDescriptor,
  resolver::RawResponse,
};

pub const DEFAULT_TENANT: &str = "admin";
pub const DEFAULT_VERSION: &str = "18.2.6";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

const HEADER_TENANT: &str = "x-avi-tenant";
const HEADER_VERSION: &str = "x-avi-version";

/// How the session authenticates against the controller.
#[derive(Clone)]
pub enum Credentials {
  /// `Authorization: Bearer <token>`.
  Bearer(String),
  /// HTTP basic auth.
  Basic { username: String, password: String },
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bearer(_) => f.write_str("Credentials::Bearer(<redacted>)"),
      Self::Basic { username, .. } => f
        .debug_struct("Credentials::Basic")
        .field("username", username)
        .field("password", &"<redacted>")
        .finish(),
    }
  }
}

/// Connection and policy settings for a [`Session`].
#[derive(Debug, Clone, bon::Builder)]
pub struct SessionConfig {
  /// Controller hostname or IP address. A bare host gets an `https://`
  /// prefix; IPv6 addresses are bracketed. A full `http(s)://` URL is used
  /// as given.
  #[builder(into)]
  pub controller: String,

  pub credentials: Credentials,

  /// Tenant sent as `X-Avi-Tenant` on every request unless overridden per
  /// call.
  #[builder(into, default = DEFAULT_TENANT.to_string())]
  pub tenant: String,

  /// API version sent as `X-Avi-Version`.
  #[builder(into, default = DEFAULT_VERSION.to_string())]
  pub version: String,

  /// Time limit for a single request attempt.
  #[builder(default = DEFAULT_TIMEOUT)]
  pub timeout: Duration,

  /// Retries after the initial attempt, for retriable requests on
  /// transient failure.
  #[builder(default = DEFAULT_MAX_RETRIES)]
  pub max_retries: u32,

  /// Base backoff delay; doubles after each failed attempt.
  #[builder(default = DEFAULT_RETRY_BACKOFF)]
  pub retry_backoff: Duration,

  /// Skip TLS certificate verification. Controllers commonly run with
  /// self-signed certificates in lab deployments.
  #[builder(default)]
  pub insecure: bool,

  /// Extra headers attached to every request.
  #[builder(default)]
  pub user_headers: Vec<(String, String)>,
}

/// Per-call overrides for [`Session::execute_with`].
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
  /// Override the session tenant for this call.
  pub tenant: Option<String>,

  /// Permit retries for a non-idempotent request. The controller has no
  /// idempotency-key mechanism, so retrying a create may duplicate the
  /// object; the caller has to make that call.
  pub safe_to_retry: bool,

  /// Override the session timeout for this call.
  pub timeout: Option<Duration>,
}

#[derive(Debug)]
struct SessionInner {
  http: reqwest::Client,
  base: reqwest::Url,
  config: SessionConfig,
}

/// An authenticated handle to one controller.
#[derive(Debug, Clone)]
pub struct Session {
  inner: Arc<SessionInner>,
}

impl Session {
  pub fn new(config: SessionConfig) -> Result<Self, ClientError> {
    let base = reqwest::Url::parse(&base_url(&config.controller)).map_err(|err| ClientError::Config {
      detail: format!("controller `{}`: {err}", config.controller),
    })?;

    let http = reqwest::Client::builder()
      .timeout(config.timeout)
      .danger_accept_invalid_certs(config.insecure)
      .build()
      .map_err(|err| ClientError::Config {
        detail: err.to_string(),
      })?;

    Ok(Self {
      inner: Arc::new(SessionInner { http, base, config }),
    })
  }

  #[must_use]
  pub fn config(&self) -> &SessionConfig {
    &self.inner.config
  }

  /// Execute with the default options: session tenant, session timeout,
  /// retries only for idempotent requests.
  pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, ClientError> {
    self.execute_with(descriptor, &ExecuteOptions::default()).await
  }

  /// Execute a non-idempotent request the caller has decided is safe to
  /// retry anyway.
  pub async fn execute_retriable(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, ClientError> {
    let options = ExecuteOptions {
      safe_to_retry: true,
      ..ExecuteOptions::default()
    };
    self.execute_with(descriptor, &options).await
  }

  /// Execute with explicit options.
  ///
  /// Transient failures (timeout, connection failure, HTTP 419/5xx) are
  /// retried with exponential backoff up to `max_retries` extra attempts,
  /// but only when the request is idempotent or `safe_to_retry` is set.
  /// Authentication (401/403) and malformed-request (400) responses are
  /// never retried.
  pub async fn execute_with(
    &self,
    descriptor: &RequestDescriptor,
    options: &ExecuteOptions,
  ) -> Result<RawResponse, ClientError> {
    let max_retries = if descriptor.idempotent || options.safe_to_retry {
      self.inner.config.max_retries
    } else {
      0
    };

    let mut attempt = 0u32;
    loop {
      let outcome = self.attempt(descriptor, options).await;
      let transient = match &outcome {
        Ok(response) => is_transient_status(response.status),
        Err(ClientError::Transport(err)) => err.is_transient(),
        Err(_) => false,
      };

      if transient && attempt < max_retries {
        let delay = backoff_delay(self.inner.config.retry_backoff, attempt);
        tracing::warn!(
          method = %descriptor.method,
          path = %descriptor.path,
          attempt = attempt + 1,
          delay_ms = delay.as_millis() as u64,
          "transient failure, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
        continue;
      }
      if transient {
        tracing::warn!(
          method = %descriptor.method,
          path = %descriptor.path,
          attempts = attempt + 1,
          "giving up after transient failures"
        );
      }
      return outcome;
    }
  }

  /// Execute, abandoning the request when `cancel` resolves first. No
  /// partial decode is attempted for an abandoned request.
  pub async fn execute_cancellable<F>(
    &self,
    descriptor: &RequestDescriptor,
    cancel: F,
  ) -> Result<RawResponse, ClientError>
  where
    F: Future<Output = ()>,
  {
    tokio::select! {
      () = cancel => {
        tracing::debug!(method = %descriptor.method, path = %descriptor.path, "request cancelled by caller");
        Err(TransportError::Cancelled.into())
      }
      outcome = self.execute(descriptor) => outcome,
    }
  }

  async fn attempt(&self, descriptor: &RequestDescriptor, options: &ExecuteOptions) -> Result<RawResponse, ClientError> {
    let url = self
      .inner
      .base
      .join(&descriptor.render_path_and_query())
      .map_err(|err| ClientError::Config {
        detail: format!("request path `{}`: {err}", descriptor.path),
      })?;

    let mut request = self.inner.http.request(descriptor.method.clone(), url.clone());
    request = match &self.inner.config.credentials {
      Credentials::Bearer(token) => request.bearer_auth(token),
      Credentials::Basic { username, password } => request.basic_auth(username, Some(password)),
    };

    let tenant = options.tenant.as_deref().unwrap_or(&self.inner.config.tenant);
    request = request.header(HEADER_TENANT, tenant);
    request = request.header(HEADER_VERSION, self.inner.config.version.as_str());
    for (key, value) in &self.inner.config.user_headers {
      request = request.header(key.as_str(), value.as_str());
    }
    if let Some(body) = &descriptor.body {
      request = request
        .header(http::header::CONTENT_TYPE.as_str(), "application/json")
        .body(body.clone());
    }
    if let Some(timeout) = options.timeout {
      request = request.timeout(timeout);
    }

    tracing::debug!(method = %descriptor.method, url = %url, "executing request");
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

    Ok(RawResponse::new(status, body))
  }
}

fn base_url(controller: &str) -> String {
  if controller.contains("://") {
    if controller.ends_with('/') {
      return controller.to_string();
    }
    return format!("{controller}/");
  }
  match controller.parse::<std::net::IpAddr>() {
    Ok(std::net::IpAddr::V6(_)) => format!("https://[{controller}]/"),
    _ => format!("https://{controller}/"),
  }
}

fn is_transient_status(status: StatusCode) -> bool {
  status.as_u16() == 419 || status.is_server_error()
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
  base.saturating_mul(2u32.saturating_pow(attempt))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
  if err.is_timeout() {
    TransportError::Timeout.into()
  } else {
    TransportError::ConnectionFailed {
      detail: err.to_string(),
    }
    .into()
  }
}
