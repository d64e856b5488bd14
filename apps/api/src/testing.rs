//! Shared test fixtures: a scripted model backend and ready-made configs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::invoker::InvokerConfig;
use crate::config::Config;
use crate::llm_client::{GenerativeModel, LlmError};

/// Replays queued results in order and records every call it receives.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Model identifiers in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn api_error(status: u16, message: &str) -> LlmError {
    LlmError::Api {
        status,
        message: message.to_string(),
    }
}

pub fn quota_error() -> LlmError {
    api_error(429, "Quota exceeded for quota metric 'generate_content_requests'")
}

pub fn test_invoker_config() -> InvokerConfig {
    InvokerConfig {
        primary_model: "primary-model".to_string(),
        fallback_model: "fallback-model".to_string(),
        fallback_delay: Duration::from_secs(2),
    }
}

pub fn test_config() -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        primary_model: "primary-model".to_string(),
        fallback_model: "fallback-model".to_string(),
        fallback_delay: Duration::from_secs(2),
        port: 0,
        rust_log: "debug".to_string(),
    }
}
