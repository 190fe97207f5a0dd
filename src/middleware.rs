//! Actix-Web middleware that forwards request records to the collector
//!
//! [`Logger`] owns the collector connection and hands out two middleware
//! variants: [`RequestLogger`] emits one record per request under the base
//! tag; [`PanicLogger`] emits one record under `<tag>.panic` for requests
//! that ended in a 500. Both are fronted by the same interception core and
//! differ only in their filter, attribute set, and tag.
//!
//! Neither variant ever changes what the caller sees: the downstream outcome
//! is returned unchanged whether or not the record made it out.

use std::time::Instant;

use actix_web::{
    body::{BodySize, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};

use crate::client::CollectorClient;
use crate::config::LoggerConfig;
use crate::error::RelayError;
use crate::record::Record;
use crate::utils::{capture_stacktrace, client_ip, user_agent};

/// Entry point: a connected handle to the collector.
///
/// ```rust,no_run
/// use actix_web::App;
/// use logrelay_actix::{Logger, LoggerConfig};
///
/// # async fn setup() -> Result<(), logrelay_actix::RelayError> {
/// let logger = Logger::new(LoggerConfig::new("127.0.0.1", 24224, "web")).await?;
///
/// let app = App::new()
///     .wrap(logger.request_logger())
///     .wrap(logger.panic_logger());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Logger {
    client: CollectorClient,
    tag: String,
}

impl Logger {
    /// Connect to the collector described by `config`.
    ///
    /// Fails with [`RelayError::Disabled`] before any transport setup when
    /// the configuration is disabled, or with [`RelayError::Connect`] when
    /// the collector is unreachable.
    pub async fn new(config: LoggerConfig) -> Result<Self, RelayError> {
        if !config.enabled {
            return Err(RelayError::Disabled);
        }

        let client = CollectorClient::connect(&config.host, config.port).await?;

        Ok(Self {
            client,
            tag: config.tag,
        })
    }

    /// Connect using [`LoggerConfig::from_env`].
    pub async fn from_env() -> Result<Self, RelayError> {
        Self::new(LoggerConfig::from_env()).await
    }

    /// Middleware that records every request under the base tag.
    pub fn request_logger(&self) -> RequestLogger {
        RequestLogger {
            inner: self.interceptor(Mode::EveryRequest),
        }
    }

    /// Middleware that records 500-status requests under `<tag>.panic`.
    pub fn panic_logger(&self) -> PanicLogger {
        PanicLogger {
            inner: self.interceptor(Mode::ServerErrorOnly),
        }
    }

    fn interceptor(&self, mode: Mode) -> Interceptor {
        Interceptor {
            client: self.client.clone(),
            tag: self.tag.clone(),
            mode,
        }
    }
}

/// What a wrapper observes and which record it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Full record for every request.
    EveryRequest,
    /// Reduced record, only when the status is 500.
    ServerErrorOnly,
}

/// The shared interception core: capture parts, run downstream, filter,
/// build the record, post, hand the outcome back untouched.
#[derive(Clone)]
struct Interceptor {
    client: CollectorClient,
    tag: String,
    mode: Mode,
}

impl Interceptor {
    async fn observe<B: MessageBody>(
        &self,
        parts: RequestParts,
        elapsed_ms: u64,
        outcome: &Result<ServiceResponse<B>, Error>,
    ) {
        let status = outcome_status(outcome);
        let error = outcome_error(outcome);

        let (tag, record) = match self.mode {
            Mode::EveryRequest => {
                let mut record = Record::new();
                record.set("method", parts.method);
                record.set("path", parts.path);
                record.set("status", status.as_u16());
                record.set("latency_ms", elapsed_ms);
                record.set("client_ip", parts.client_ip.unwrap_or_default());
                record.set("user_agent", parts.user_agent.unwrap_or_default());
                record.set("response_size", response_size(outcome));
                if let Some(desc) = &error {
                    record.set("error", desc.as_str());
                }
                (self.tag.clone(), record)
            }
            Mode::ServerErrorOnly => {
                if status != StatusCode::INTERNAL_SERVER_ERROR {
                    return;
                }
                let mut record = Record::new();
                record.set("method", parts.method);
                record.set("path", parts.path);
                record.set("client_ip", parts.client_ip.unwrap_or_default());
                record.set("user_agent", parts.user_agent.unwrap_or_default());
                // A stack trace goes out whenever an error value accompanies
                // the 500, handled or not.
                if let Some(desc) = &error {
                    record.set("error", desc.as_str());
                    record.set("stacktrace", capture_stacktrace());
                }
                (format!("{}.panic", self.tag), record)
            }
        };

        if let Err(err) = self.client.post(&tag, record).await {
            tracing::error!(tag = %tag, error = %err, "failed to forward record to collector");
        }
    }
}

/// Request attributes captured before the request is handed downstream.
struct RequestParts {
    method: String,
    path: String,
    client_ip: Option<String>,
    user_agent: Option<String>,
}

impl RequestParts {
    fn capture(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            client_ip: client_ip(req.headers(), req.peer_addr()),
            user_agent: user_agent(req.headers()),
        }
    }
}

/// Status of the outcome, whichever side of the `Result` it lives on.
fn outcome_status<B>(outcome: &Result<ServiceResponse<B>, Error>) -> StatusCode {
    match outcome {
        Ok(res) => res.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

/// Error description, if the downstream produced an error value.
///
/// Handler errors surface as `Ok` responses carrying the error (that is how
/// `Responder` renders a handler's `Err`); failures below the handler surface
/// as `Err`. Both count.
fn outcome_error<B>(outcome: &Result<ServiceResponse<B>, Error>) -> Option<String> {
    match outcome {
        Ok(res) => res.response().error().map(|err| err.to_string()),
        Err(err) => Some(err.to_string()),
    }
}

fn response_size<B: MessageBody>(outcome: &Result<ServiceResponse<B>, Error>) -> u64 {
    match outcome {
        Ok(res) => match res.response().body().size() {
            BodySize::Sized(n) => n,
            // Streaming bodies have no length until consumed; report zero
            // rather than buffering the stream.
            _ => 0,
        },
        Err(_) => 0,
    }
}

/// Middleware emitting one record per request under the base tag.
pub struct RequestLogger {
    inner: Interceptor,
}

/// Middleware emitting one record per 500-status request under `<tag>.panic`.
pub struct PanicLogger {
    inner: Interceptor,
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = InterceptorService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(InterceptorService {
            service,
            inner: self.inner.clone(),
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for PanicLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = InterceptorService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(InterceptorService {
            service,
            inner: self.inner.clone(),
        })
    }
}

/// The per-request service both wrappers compile down to.
pub struct InterceptorService<S> {
    service: S,
    inner: Interceptor,
}

impl<S, B> Service<ServiceRequest> for InterceptorService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let inner = self.inner.clone();
        let started = Instant::now();
        let parts = RequestParts::capture(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let outcome = fut.await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            // Transmission awaits inline; its failure is reported locally
            // inside observe and never reaches the caller.
            inner.observe(parts, elapsed_ms, &outcome).await;

            outcome
        })
    }
}
