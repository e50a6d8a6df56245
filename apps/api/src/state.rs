use crate::config::Config;
use crate::gateway::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub gateway: CompletionGateway,
    pub config: Config,
}
