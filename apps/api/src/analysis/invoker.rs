//! Model Invoker — primary/fallback model selection for a single prompt.
//!
//! Flow: primary attempt → (quota exceeded) fixed pause → one fallback attempt.
//! Any non-quota failure on the primary, and any failure on the fallback, is terminal.
//! No backoff, no further retries, no caching.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::{GenerativeModel, LlmError};

/// Which model tier produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Primary,
    Fallback,
}

/// Model identifiers and fallback timing. Fixed at construction.
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub primary_model: String,
    pub fallback_model: String,
    pub fallback_delay: Duration,
}

impl From<&Config> for InvokerConfig {
    fn from(config: &Config) -> Self {
        Self {
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
            fallback_delay: config.fallback_delay,
        }
    }
}

/// Opaque model output plus the tier and model identifier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub tier: ModelTier,
    pub model: String,
    pub text: String,
}

/// Terminal failure of an invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Primary call failed for a reason other than quota. No fallback was tried.
    #[error("Unexpected error: {0}")]
    Primary(#[source] LlmError),

    /// Primary was over quota and the fallback call failed as well.
    /// The primary's quota error is logged, not carried.
    #[error("Fallback model failed: {0}")]
    Fallback(#[source] LlmError),
}

impl InvocationError {
    /// The error shown to the user: the last attempt's failure.
    pub fn surfaced(&self) -> &LlmError {
        match self {
            InvocationError::Primary(e) => e,
            InvocationError::Fallback(e) => e,
        }
    }
}

#[derive(Clone)]
pub struct ModelInvoker {
    model: Arc<dyn GenerativeModel>,
    config: InvokerConfig,
}

impl ModelInvoker {
    pub fn new(model: Arc<dyn GenerativeModel>, config: InvokerConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Sends `prompt` to the primary model, falling back once on quota exhaustion.
    pub async fn invoke(&self, prompt: &str) -> Result<ModelResponse, InvocationError> {
        let primary = &self.config.primary_model;

        let primary_error = match self.model.generate(primary, prompt).await {
            Ok(text) => {
                info!("Analysis completed by primary model {primary}");
                return Ok(ModelResponse {
                    tier: ModelTier::Primary,
                    model: primary.clone(),
                    text,
                });
            }
            Err(e) if e.is_quota_exceeded() => e,
            Err(e) => {
                warn!("Primary model {primary} failed: {e}");
                return Err(InvocationError::Primary(e));
            }
        };

        let fallback = &self.config.fallback_model;
        warn!(
            "Primary model {primary} quota exceeded ({primary_error}); retrying with {fallback} in {}ms",
            self.config.fallback_delay.as_millis()
        );
        tokio::time::sleep(self.config.fallback_delay).await;

        match self.model.generate(fallback, prompt).await {
            Ok(text) => {
                info!("Analysis completed by fallback model {fallback}");
                Ok(ModelResponse {
                    tier: ModelTier::Fallback,
                    model: fallback.clone(),
                    text,
                })
            }
            Err(e) => {
                warn!("Fallback model {fallback} failed: {e}");
                Err(InvocationError::Fallback(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{api_error, quota_error, test_invoker_config, ScriptedModel};
    use tokio::time::Instant;

    fn invoker(model: &Arc<ScriptedModel>) -> ModelInvoker {
        ModelInvoker::new(model.clone(), test_invoker_config())
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_success_skips_fallback() {
        let model = Arc::new(ScriptedModel::new(vec![Ok("Match: 90%...".to_string())]));
        let started = Instant::now();

        let response = invoker(&model).invoke("prompt").await.unwrap();

        assert_eq!(response.tier, ModelTier::Primary);
        assert_eq!(response.model, "primary-model");
        assert_eq!(response.text, "Match: 90%...");
        assert_eq!(model.calls(), vec!["primary-model".to_string()]);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_error_waits_then_calls_fallback_once() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(quota_error()),
            Ok("Match: 70% (flash)".to_string()),
        ]));
        let started = Instant::now();

        let response = invoker(&model).invoke("prompt").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(response.tier, ModelTier::Fallback);
        assert_eq!(response.model, "fallback-model");
        assert_eq!(response.text, "Match: 70% (flash)");
        assert_eq!(
            model.calls(),
            vec!["primary-model".to_string(), "fallback-model".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_receives_same_prompt() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(quota_error()),
            Ok("ok".to_string()),
        ]));

        invoker(&model).invoke("the exact prompt").await.unwrap();

        assert_eq!(
            model.prompts(),
            vec!["the exact prompt".to_string(), "the exact prompt".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_marker_in_message_triggers_fallback() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(api_error(500, "proxy relayed 429 RESOURCE_EXHAUSTED")),
            Ok("ok".to_string()),
        ]));

        let response = invoker(&model).invoke("prompt").await.unwrap();
        assert_eq!(response.tier, ModelTier::Fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_quota_error_is_terminal_without_fallback() {
        let model = Arc::new(ScriptedModel::new(vec![Err(api_error(
            400,
            "API key not valid",
        ))]));
        let started = Instant::now();

        let err = invoker(&model).invoke("prompt").await.unwrap_err();

        assert!(matches!(err, InvocationError::Primary(_)));
        assert!(err.surfaced().to_string().contains("API key not valid"));
        assert_eq!(model.calls(), vec!["primary-model".to_string()]);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_failures_surface_fallback_error() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(quota_error()),
            Err(api_error(503, "flash tier unavailable")),
        ]));

        let err = invoker(&model).invoke("prompt").await.unwrap_err();

        let surfaced = err.surfaced().to_string();
        assert!(surfaced.contains("flash tier unavailable"));
        assert!(!surfaced.contains("Quota exceeded"));
        assert!(err.to_string().starts_with("Fallback model failed:"));
        assert_eq!(model.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_error_on_fallback_is_not_retried() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(quota_error()),
            Err(quota_error()),
            Ok("never reached".to_string()),
        ]));

        let err = invoker(&model).invoke("prompt").await.unwrap_err();

        assert!(matches!(err, InvocationError::Fallback(_)));
        assert_eq!(model.calls().len(), 2);
    }

    #[test]
    fn test_invoker_config_from_app_config() {
        let config = crate::testing::test_config();
        let invoker_config = InvokerConfig::from(&config);
        assert_eq!(invoker_config.primary_model, config.primary_model);
        assert_eq!(invoker_config.fallback_model, config.fallback_model);
        assert_eq!(invoker_config.fallback_delay, config.fallback_delay);
    }
}
