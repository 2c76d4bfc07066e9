//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenerSettings, ShorteningService};
use crate::domain::repositories::UrlMappingRepository;
use crate::utils::code_generator::CodeGenerator;

/// Services built once at startup and shared by handle across requests.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService>,
    pub redirect_service: Arc<RedirectService>,
    /// Used directly only by the health check.
    pub repository: Arc<dyn UrlMappingRepository>,
}

impl AppState {
    /// Wires both services onto one repository.
    pub fn new(
        repository: Arc<dyn UrlMappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            shortening_service: Arc::new(ShorteningService::new(
                repository.clone(),
                generator,
                settings,
            )),
            redirect_service: Arc::new(RedirectService::new(repository.clone())),
            repository,
        }
    }
}
