//! Remote simplification adapter.
//!
//! Sends the prompt to a [`GenerativeBackend`], walking the candidate model
//! list until one model yields a valid result.
//!
//! # Deadline
//! One deadline is taken when a call starts and every candidate attempt runs
//! against it. A slow first candidate can therefore use up the whole budget
//! before a later candidate is tried.
//!
//! # Cancellation
//! At most one call is outstanding per adapter. Starting a call cancels the
//! previous one, which fails with [`RemoteErrorKind::Superseded`]; its result
//! is discarded even if the backend answers afterwards.

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};

use leiclara_core::{Mode, ResultShape};

use crate::config::RuntimeConfig;
use crate::extract::parse_result;
use crate::prompts::build_prompt;
use crate::providers::{select_model, usable_models, GenerativeBackend, ProviderError};

/// Failure class of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    Timeout,
    RateLimited,
    Unauthorized,
    Forbidden,
    NotFound,
    MalformedJson,
    Incomplete,
    /// A newer call started before this one finished
    Superseded,
    Unknown,
}

impl RemoteErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteErrorKind::Timeout => "timeout",
            RemoteErrorKind::RateLimited => "rate_limited",
            RemoteErrorKind::Unauthorized => "unauthorized",
            RemoteErrorKind::Forbidden => "forbidden",
            RemoteErrorKind::NotFound => "not_found",
            RemoteErrorKind::MalformedJson => "malformed_json",
            RemoteErrorKind::Incomplete => "incomplete",
            RemoteErrorKind::Superseded => "superseded",
            RemoteErrorKind::Unknown => "unknown",
        }
    }

    /// Failures that no other model would fix.
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            RemoteErrorKind::RateLimited | RemoteErrorKind::Unauthorized | RemoteErrorKind::Forbidden
        )
    }

    /// User-facing pt-BR message.
    pub fn default_message(&self) -> &'static str {
        match self {
            RemoteErrorKind::Timeout => "Tempo limite excedido. Tente novamente.",
            RemoteErrorKind::RateLimited => {
                "Limite de uso da API atingido. Aguarde alguns minutos e tente novamente."
            }
            RemoteErrorKind::Unauthorized => "Não autorizado. Verifique sua API Key.",
            RemoteErrorKind::Forbidden => {
                "Acesso negado. Adicione seu domínio (localhost ou a URL do deploy) em Allowed domains no Google AI Studio."
            }
            RemoteErrorKind::NotFound => "Modelo/endpoint não encontrado.",
            RemoteErrorKind::MalformedJson => "A resposta da IA não é um JSON válido.",
            RemoteErrorKind::Incomplete => "Resposta incompleta da IA. Tente novamente.",
            RemoteErrorKind::Superseded => "Solicitação substituída por uma mais recente.",
            RemoteErrorKind::Unknown => "Falha ao chamar a IA.",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error of `kind` with its default message.
    pub fn of(kind: RemoteErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    fn timeout(budget: Duration) -> Self {
        Self::new(
            RemoteErrorKind::Timeout,
            format!(
                "Tempo limite excedido ({}). Tente novamente.",
                humantime::format_duration(budget)
            ),
        )
    }

    /// Classify a backend failure.
    pub fn from_provider(err: &ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, message } => {
                let (kind, base) = match status {
                    404 => return Self::of(RemoteErrorKind::NotFound),
                    429 => (RemoteErrorKind::RateLimited, None),
                    401 => (RemoteErrorKind::Unauthorized, None),
                    403 => (RemoteErrorKind::Forbidden, None),
                    _ => (RemoteErrorKind::Unknown, Some("Erro na API do Gemini.")),
                };
                let base = base.unwrap_or_else(|| kind.default_message());

                match message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
                    Some(detail) => Self::new(kind, format!("{} {}", base, detail)),
                    None => Self::new(kind, base),
                }
            }
            ProviderError::ParseError(_) => Self::of(RemoteErrorKind::MalformedJson),
            ProviderError::HttpError(_) | ProviderError::NotConfigured(_) => {
                Self::of(RemoteErrorKind::Unknown)
            }
        }
    }
}

/// A valid result and the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteReply {
    pub result: ResultShape,
    pub model: String,
}

/// Cancellation handle of the outstanding call.
struct InFlight {
    generation: u64,
    cancel: watch::Sender<bool>,
}

/// Remote simplification adapter.
pub struct RemoteAdapter {
    backend: Arc<dyn GenerativeBackend>,
    config: RuntimeConfig,
    /// Last model that produced a valid result, or the configured one
    preferred: RwLock<String>,
    inflight: Mutex<Option<InFlight>>,
    generation: AtomicU64,
}

impl fmt::Debug for RemoteAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAdapter")
            .field("backend", &self.backend.name())
            .field("preferred", &*self.preferred.read())
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl RemoteAdapter {
    /// Create an adapter; the configured default model is preferred first.
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: RuntimeConfig) -> Self {
        let preferred = config.default_model.clone();
        Self {
            backend,
            config,
            preferred: RwLock::new(preferred),
            inflight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Prefer `model` for the next call. Blank names are ignored.
    pub fn with_preferred_model(self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            *self.preferred.write() = model.trim().to_string();
        }
        self
    }

    pub fn preferred_model(&self) -> String {
        self.preferred.read().clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Models tried by the next call, in order: the preferred model, then
    /// every fallback. A model listed twice is attempted twice.
    pub fn candidates(&self) -> Vec<String> {
        let preferred = self.preferred_model();

        std::iter::once(&preferred)
            .chain(self.config.fallback_models.iter())
            .map(|model| model.trim())
            .filter(|model| !model.is_empty())
            .map(String::from)
            .collect()
    }

    /// Simplify `text` remotely.
    pub async fn call(&self, text: &str, mode: Mode) -> Result<ResultShape, RemoteError> {
        self.generate(text, mode).await.map(|reply| reply.result)
    }

    /// Like [`call`](Self::call), also reporting which model answered.
    pub async fn generate(&self, text: &str, mode: Mode) -> Result<RemoteReply, RemoteError> {
        let (generation, mut cancel) = self.begin();
        let outcome = self.run(generation, &mut cancel, text, mode).await;
        self.finish(generation);
        outcome
    }

    async fn run(
        &self,
        generation: u64,
        cancel: &mut watch::Receiver<bool>,
        text: &str,
        mode: Mode,
    ) -> Result<RemoteReply, RemoteError> {
        let prompt = build_prompt(text, mode);
        let deadline = Instant::now() + self.config.timeout;
        let mut last_error: Option<RemoteError> = None;

        for model in self.candidates() {
            let attempt = tokio::select! {
                biased;
                _ = cancelled(cancel) => {
                    tracing::debug!(model = %model, "Call superseded");
                    return Err(RemoteError::of(RemoteErrorKind::Superseded));
                }
                reply = timeout_at(deadline, self.backend.generate(&model, &prompt)) => reply,
            };

            let raw = match attempt {
                Err(_) => {
                    tracing::warn!(model = %model, timeout = ?self.config.timeout, "Remote call timed out");
                    return Err(self.settle(generation, RemoteError::timeout(self.config.timeout)));
                }
                Ok(Err(e)) => {
                    let err = RemoteError::from_provider(&e);
                    tracing::warn!(model = %model, kind = %err.kind, error = %e, "Model attempt failed");
                    if err.kind.is_systemic() {
                        return Err(self.settle(generation, err));
                    }
                    last_error = Some(err);
                    continue;
                }
                Ok(Ok(raw)) => raw,
            };

            match parse_result(&raw) {
                Ok(result) => {
                    if !self.is_current(generation) {
                        return Err(RemoteError::of(RemoteErrorKind::Superseded));
                    }
                    tracing::info!(model = %model, "Remote simplification succeeded");
                    *self.preferred.write() = model.clone();
                    return Ok(RemoteReply { result, model });
                }
                Err(err) => {
                    tracing::warn!(model = %model, kind = %err.kind, "Unusable model reply");
                    last_error = Some(err);
                }
            }
        }

        let err = last_error.unwrap_or_else(|| RemoteError::of(RemoteErrorKind::Unknown));
        Err(self.settle(generation, err))
    }

    /// A failure of a call that is no longer current reports as superseded.
    fn settle(&self, generation: u64, err: RemoteError) -> RemoteError {
        if self.is_current(generation) {
            err
        } else {
            tracing::debug!(generation, kind = %err.kind, "Discarding failure of superseded call");
            RemoteError::of(RemoteErrorKind::Superseded)
        }
    }

    /// Register a new call, cancelling the outstanding one.
    fn begin(&self) -> (u64, watch::Receiver<bool>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (cancel, receiver) = watch::channel(false);

        let previous = self.inflight.lock().replace(InFlight { generation, cancel });
        if let Some(previous) = previous {
            tracing::debug!(generation = previous.generation, "Cancelling outstanding call");
            let _ = previous.cancel.send(true);
        }

        (generation, receiver)
    }

    fn finish(&self, generation: u64) {
        let mut inflight = self.inflight.lock();
        if inflight.as_ref().is_some_and(|f| f.generation == generation) {
            *inflight = None;
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// List usable models and re-pick the preferred one.
    ///
    /// The current preference is kept while it is still offered.
    pub async fn refresh_models(&self) -> Result<Vec<String>, RemoteError> {
        let listing = self.backend.list_models().await.map_err(|e| {
            tracing::warn!(error = %e, "Model listing failed");
            RemoteError::from_provider(&e)
        })?;

        let usable = usable_models(&listing);
        match select_model(&usable, &self.preferred_model()) {
            Some(model) => {
                tracing::info!(model = %model, available = usable.len(), "Models refreshed");
                *self.preferred.write() = model;
            }
            None => tracing::warn!("No listed model supports generateContent"),
        }

        Ok(usable)
    }
}

/// Resolves once the call is cancelled.
async fn cancelled(receiver: &mut watch::Receiver<bool>) {
    let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
