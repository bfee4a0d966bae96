use std::sync::Arc;

use crate::accounts::store::AccountStore;
use crate::auth::SessionGuard;
use crate::config::Config;
use crate::llm_client::FeedbackService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// User persistence. Production: `PgAccountStore`.
    pub accounts: Arc<dyn AccountStore>,
    /// Chat-completion backend. Production: `LlmClient`.
    pub feedback: Arc<dyn FeedbackService>,
    pub sessions: SessionGuard,
    pub config: Config,
}
