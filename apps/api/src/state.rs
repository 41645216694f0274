use std::sync::Arc;

use crate::assets::AssetStore;
use crate::config::Config;
use crate::models::resume::ResumeData;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resume: Arc<ResumeData>,
    pub assets: AssetStore,
}

impl AppState {
    pub fn new(config: Config, resume: ResumeData) -> Self {
        let assets = AssetStore::new(config.assets_dir.clone());
        Self {
            config,
            resume: Arc::new(resume),
            assets,
        }
    }
}
