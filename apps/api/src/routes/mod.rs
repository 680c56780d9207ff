pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as accounts;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/accounts", post(accounts::handle_signup))
        .route("/api/v1/accounts/login", post(accounts::handle_login))
        .route("/api/v1/accounts/me", get(accounts::handle_me))
        .route(
            "/api/v1/accounts/:id",
            get(accounts::handle_get_account)
                .put(accounts::handle_update_account)
                .delete(accounts::handle_delete_account),
        )
        .route(
            "/api/v1/accounts/:id/verify",
            patch(accounts::handle_verify_account),
        )
        // Personal info
        .route(
            "/api/v1/personal-info",
            post(resume::handle_create_personal_info),
        )
        .route(
            "/api/v1/personal-info/:id",
            get(resume::handle_get_personal_info)
                .put(resume::handle_update_personal_info)
                .delete(resume::handle_delete_personal_info),
        )
        // Summaries
        .route("/api/v1/summaries", post(resume::handle_create_summary))
        .route(
            "/api/v1/summaries/:id",
            get(resume::handle_get_summary)
                .put(resume::handle_update_summary)
                .delete(resume::handle_delete_summary),
        )
        // Work experience
        .route(
            "/api/v1/work-experiences",
            get(resume::handle_list_work_experiences).post(resume::handle_create_work_experience),
        )
        .route(
            "/api/v1/work-experiences/:id",
            get(resume::handle_get_work_experience)
                .put(resume::handle_update_work_experience)
                .delete(resume::handle_delete_work_experience),
        )
        .with_state(state)
}
