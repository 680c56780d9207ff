use std::sync::Arc;

use crate::auth::service::AccountService;
use crate::auth::token::TokenMaker;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Typed CRUD for resume sections.
    pub store: Arc<dyn Store>,
    /// Signup, login and account lifecycle.
    pub accounts: AccountService,
    /// Verifies bearer tokens on protected routes. Shares the signing secret
    /// with `AccountService`; neither copy changes after startup.
    pub tokens: TokenMaker,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, accounts: AccountService, tokens: TokenMaker) -> Self {
        AppState {
            store,
            accounts,
            tokens,
        }
    }
}
