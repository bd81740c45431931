//! # leiclara-runtime
//!
//! Remote simplification for Lei Clara, with the local engine as fallback.
//!
//! `leiclara-core` already produces a complete result without any network.
//! This crate adds the path through a generative-language service:
//!
//! - [`RemoteAdapter`]: prompt, candidate models, one shared deadline,
//!   supersede-on-new-call cancellation, JSON recovery and validation
//! - [`Orchestrator`]: input validation, remote-or-local routing, fallback
//!   notices, last result and bounded history
//! - [`config`]: runtime parameters and user settings (YAML, `.env`, env)
//!
//! The HTTP backend for Gemini is behind the `gemini` feature.
//!
//! ## Example
//!
//! ```rust,ignore
//! use leiclara_runtime::{Orchestrator, RuntimeConfig, Settings};
//! use leiclara_core::Mode;
//!
//! let settings = Settings::from_process_env();
//! let orchestrator = Orchestrator::from_settings(&settings, RuntimeConfig::default())?;
//!
//! let outcome = orchestrator.process(&document, Mode::Claro).await?;
//! if let Some(notice) = &outcome.notice {
//!     eprintln!("{notice}");
//! }
//! ```

pub mod config;
pub mod extract;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod remote;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, RuntimeConfig, Settings};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, ProcessOutcome, ResultOrigin};
pub use providers::{GenerativeBackend, ModelDescriptor, ProviderError};
pub use remote::{RemoteAdapter, RemoteError, RemoteErrorKind, RemoteReply};

#[cfg(feature = "gemini")]
pub use providers::GeminiBackend;
