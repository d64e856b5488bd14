//! Lottie animation documents shown by the front end. Fetched once at startup;
//! a failed fetch leaves the slot empty and is reported as a warning.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

pub const AI_ANIMATION_URL: &str = "https://assets6.lottiefiles.com/packages/lf20_jcikwtux.json";
pub const ANALYSIS_ANIMATION_URL: &str =
    "https://assets2.lottiefiles.com/private_files/lf30_editor_jpxkgzsk.json";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationAssets {
    /// Hero animation for the landing view.
    pub ai: Option<Value>,
    /// Shown while an analysis is running.
    pub analysis: Option<Value>,
}

impl AnimationAssets {
    /// Fetches both animations. Never fails.
    pub async fn fetch() -> Self {
        let client = match Client::builder().timeout(FETCH_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build animation HTTP client: {e}");
                return Self::default();
            }
        };

        let (ai, analysis) = tokio::join!(
            load_animation(&client, AI_ANIMATION_URL),
            load_animation(&client, ANALYSIS_ANIMATION_URL),
        );
        info!(
            "Animations loaded: ai={}, analysis={}",
            ai.is_some(),
            analysis.is_some()
        );
        Self { ai, analysis }
    }

    /// Messages the front end shows in place of animations that failed to load.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.ai.is_none() {
            warnings.push("AI animation failed to load.".to_string());
        }
        if self.analysis.is_none() {
            warnings.push("Analysis animation failed to load.".to_string());
        }
        warnings
    }
}

/// GETs a JSON document; any non-200 status, transport error or bad body yields `None`.
pub async fn load_animation(client: &Client, url: &str) -> Option<Value> {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to load animation {url}: {e}");
            return None;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        warn!("Animation {url} returned {}", response.status());
        return None;
    }

    match response.json::<Value>().await {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("Animation {url} is not valid JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_animations_produce_warnings() {
        let assets = AnimationAssets::default();
        assert_eq!(
            assets.warnings(),
            vec![
                "AI animation failed to load.".to_string(),
                "Analysis animation failed to load.".to_string(),
            ]
        );
    }

    #[test]
    fn test_loaded_animations_produce_no_warnings() {
        let assets = AnimationAssets {
            ai: Some(json!({"v": "5.5.7", "layers": []})),
            analysis: Some(json!({"v": "5.5.7", "layers": []})),
        };
        assert!(assets.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_url_degrades_to_none() {
        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Port 9 (discard) on loopback: connection refused
        assert!(load_animation(&client, "http://127.0.0.1:9/anim.json")
            .await
            .is_none());
    }
}
