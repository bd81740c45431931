//! Orchestrator: routes a document to the remote adapter or the local engine.
//!
//! - No backend configured: local engine only
//! - Backend configured: remote adapter, with any [`RemoteError`] falling
//!   back to the local engine and surfacing as a notice
//!
//! Only input validation aborts a request. The produced result becomes the
//! last result and is pushed into the bounded history, except for a call
//! superseded by a newer one.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use leiclara_core::{prepare, simplify, History, HistoryEntry, Mode, ResultShape, ValidationError};

use crate::config::RuntimeConfig;
use crate::providers::GenerativeBackend;
use crate::remote::{RemoteAdapter, RemoteError, RemoteErrorKind};

/// Which path produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultOrigin {
    /// Remote service, with the model that answered
    Remote { model: String },

    /// Local engine; no backend configured
    Local,

    /// Local engine after a remote failure
    Fallback,
}

/// Outcome of [`Orchestrator::process`].
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub result: Arc<ResultShape>,
    pub origin: ResultOrigin,

    /// Non-fatal message for the user (pt-BR), set on fallback
    pub notice: Option<String>,
}

/// Session object owning the adapter, last result and history.
pub struct Orchestrator {
    remote: Option<RemoteAdapter>,
    history: Mutex<History>,
    last_result: Mutex<Option<Arc<ResultShape>>>,
}

impl Orchestrator {
    /// Local-only orchestrator.
    pub fn local() -> Self {
        OrchestratorBuilder::new().build()
    }

    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Build from user settings: a configured key enables the Gemini backend.
    #[cfg(feature = "gemini")]
    pub fn from_settings(
        settings: &crate::config::Settings,
        config: RuntimeConfig,
    ) -> Result<Self, crate::providers::ProviderError> {
        Ok(OrchestratorBuilder::new().config(config).settings(settings)?.build())
    }

    /// Validate `raw` and simplify it.
    pub async fn process(&self, raw: &str, mode: Mode) -> Result<ProcessOutcome, ValidationError> {
        let text = prepare(raw)?;

        let Some(remote) = &self.remote else {
            tracing::debug!(mode = ?mode, "Simplifying locally");
            let result = simplify_shared(&text, mode);
            return Ok(self.record(text, mode, result, ResultOrigin::Local, None));
        };

        match remote.generate(&text, mode).await {
            Ok(reply) => Ok(self.record(
                text,
                mode,
                Arc::new(reply.result),
                ResultOrigin::Remote { model: reply.model },
                None,
            )),
            Err(err) => Ok(self.fall_back(text, mode, err)),
        }
    }

    fn fall_back(&self, text: String, mode: Mode, err: RemoteError) -> ProcessOutcome {
        tracing::warn!(kind = %err.kind, error = %err, "Remote simplification failed, using local engine");
        let result = simplify_shared(&text, mode);

        if err.kind == RemoteErrorKind::Superseded {
            return ProcessOutcome {
                result,
                origin: ResultOrigin::Fallback,
                notice: Some(err.message),
            };
        }

        self.record(text, mode, result, ResultOrigin::Fallback, Some(err.message))
    }

    fn record(
        &self,
        text: String,
        mode: Mode,
        result: Arc<ResultShape>,
        origin: ResultOrigin,
        notice: Option<String>,
    ) -> ProcessOutcome {
        *self.last_result.lock() = Some(result.clone());
        self.history.lock().push(HistoryEntry::new(text, mode, result.clone()));

        ProcessOutcome {
            result,
            origin,
            notice,
        }
    }

    /// Snapshot of the history, most recent first.
    pub fn history(&self) -> History {
        self.history.lock().clone()
    }

    pub fn last_result(&self) -> Option<Arc<ResultShape>> {
        self.last_result.lock().clone()
    }

    /// The remote adapter, when a backend is configured.
    pub fn remote(&self) -> Option<&RemoteAdapter> {
        self.remote.as_ref()
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }
}

fn simplify_shared(text: &str, mode: Mode) -> Arc<ResultShape> {
    Arc::new(simplify(text, mode))
}

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
    backend: Option<Arc<dyn GenerativeBackend>>,
    config: RuntimeConfig,
    preferred_model: Option<String>,
    history: History,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            backend: None,
            config: RuntimeConfig::default(),
            preferred_model: None,
            history: History::new(),
        }
    }

    /// Set the remote backend. Without one, every request runs locally.
    pub fn backend(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Model tried first, ahead of the configured default.
    pub fn preferred_model(mut self, model: impl Into<String>) -> Self {
        self.preferred_model = Some(model.into());
        self
    }

    /// Apply user settings: with a non-blank API key, requests go to Gemini
    /// at the configured API base, preferring the configured model.
    #[cfg(feature = "gemini")]
    pub fn settings(
        self,
        settings: &crate::config::Settings,
    ) -> Result<Self, crate::providers::ProviderError> {
        let Some(credential) = settings.credential() else {
            return Ok(self);
        };

        tracing::debug!(source = %credential.source(), "Remote simplification enabled");
        let backend =
            crate::providers::GeminiBackend::new(credential)?.with_base_url(&self.config.api_base);

        Ok(self
            .backend(Arc::new(backend))
            .preferred_model(settings.model_or_default()))
    }

    /// Start from a previously saved history.
    pub fn history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn build(self) -> Orchestrator {
        let config = self.config;
        let preferred = self.preferred_model;

        let remote = self.backend.map(|backend| {
            let adapter = RemoteAdapter::new(backend, config);
            match preferred {
                Some(model) => adapter.with_preferred_model(model),
                None => adapter,
            }
        });

        Orchestrator {
            remote,
            history: Mutex::new(self.history),
            last_result: Mutex::new(None),
        }
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
