#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use snaplink::application::services::ShortenerSettings;
use snaplink::infrastructure::persistence::MemoryUrlMappingRepository;
use snaplink::routes::router;
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "https://s.example.com";

pub fn test_settings() -> ShortenerSettings {
    ShortenerSettings {
        base_url: BASE_URL.to_string(),
        ..ShortenerSettings::default()
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryUrlMappingRepository>) {
    let repository = Arc::new(MemoryUrlMappingRepository::new());
    let state = AppState::new(
        repository.clone(),
        Arc::new(RandomCodeGenerator),
        test_settings(),
    );

    (state, repository)
}

/// Server with the routes mounted at the root.
pub fn create_test_server() -> (TestServer, Arc<MemoryUrlMappingRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(router(state, "", &[])).unwrap();

    (server, repository)
}

/// Strips the base URL from a `short_url` field.
pub fn code_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap()
}
