//! Application State
//!
//! Global state wiring the config service, the completion provider, and the
//! analysis service together behind an idempotent initialize.

use std::sync::Arc;
use tokio::sync::RwLock;

use boundary_guard_llm::GeminiProvider;

use crate::models::settings::{resolve_api_key, AppConfig, SettingsUpdate};
use crate::services::analysis::AnalysisService;
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Application state shared with presentation
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Analysis session service
    analysis: Arc<RwLock<Option<AnalysisService>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            analysis: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services.
    ///
    /// A missing credential is not an initialization error: it surfaces as
    /// a configuration failure on the first analysis, without any outbound
    /// call being attempted.
    pub async fn initialize(&self) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let config_service = ConfigService::new()?;
        let app_config = config_service.get_config_clone();

        {
            let mut config_lock = self.config.write().await;
            *config_lock = Some(config_service);
        }

        {
            let provider = GeminiProvider::new(app_config.provider_config(resolve_api_key()));
            let service = AnalysisService::new(Arc::new(provider), app_config);
            let mut analysis_lock = self.analysis.write().await;
            *analysis_lock = Some(service);
        }

        *initialized = true;
        Ok(())
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => config.update_config(update),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Get a handle to the analysis service (clones share the session)
    pub async fn analysis(&self) -> AppResult<AnalysisService> {
        let guard = self.analysis.read().await;
        match &*guard {
            Some(service) => Ok(service.clone()),
            None => Err(AppError::internal("Analysis service not initialized")),
        }
    }

    /// Check if the config service is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}
