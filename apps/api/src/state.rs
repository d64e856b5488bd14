use std::sync::Arc;

use crate::analysis::invoker::ModelInvoker;
use crate::assets::AnimationAssets;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub invoker: ModelInvoker,
    /// Animation documents fetched once at startup; missing entries degrade to warnings.
    pub animations: Arc<AnimationAssets>,
}
