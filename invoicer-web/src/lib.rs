//! invoicer-web: HTTP front end for the invoice builder.
//!
//! Exposes the core's command handlers as a small JSON API plus a
//! server-rendered form page. Session state is process-wide, exactly one
//! form session per process; multi-user isolation belongs to the deployment,
//! not to this crate.
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod startup;

use invoicer_core::config::Settings;
use invoicer_core::session::SessionState;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<SessionState>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let session = SessionState::new(settings.company.party_info());
        Self {
            session: Arc::new(RwLock::new(session)),
            settings: Arc::new(settings),
        }
    }
}
