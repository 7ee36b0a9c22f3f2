//! Dashboard routes.
//!
//! `POST /dashboard/refresh` takes a form-encoded body (`nonce`,
//! `start_date`, `end_date`, `campaign`) and answers with an envelope
//! holding both providers' payloads. `GET /dashboard/nonce` issues the
//! nonce the refresh form must carry.

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    AppState,
    middleware::AuthUser,
    response::{ApiError, Envelope},
};
use infotrack_core::dashboard::RefreshInput;
use infotrack_shared::AppError;

/// Action name nonces for the refresh endpoint are bound to.
pub const REFRESH_NONCE_ACTION: &str = "infotrack_nonce";

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/nonce", get(issue_nonce))
}

/// Refresh form fields. All optional; missing means empty.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshForm {
    /// Anti-forgery nonce.
    pub nonce: Option<String>,
    /// Range start.
    pub start_date: Option<String>,
    /// Range end.
    pub end_date: Option<String>,
    /// Campaign filter.
    pub campaign: Option<String>,
}

/// Issued nonce.
#[derive(Debug, Serialize)]
pub struct NonceResponse {
    /// The nonce value.
    pub nonce: String,
    /// Action the nonce is bound to.
    pub action: &'static str,
    /// Seconds until the nonce expires.
    pub expires_in: i64,
}

/// POST /dashboard/refresh
async fn refresh_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    form: Result<Form<RefreshForm>, FormRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Form(form) = form.map_err(|rejection| {
        warn!(user_id = %auth_user.user_id(), error = %rejection, "Rejected refresh body");
        AppError::Validation(rejection.body_text())
    })?;

    state
        .nonce_service
        .verify(
            form.nonce.as_deref().unwrap_or_default(),
            REFRESH_NONCE_ACTION,
            auth_user.user_id(),
            auth_user.session_id(),
        )
        .inspect_err(|e| warn!(user_id = %auth_user.user_id(), error = %e, "Nonce check failed"))?;

    let actor = auth_user.actor()?;
    let input = RefreshInput {
        start_date: form.start_date,
        end_date: form.end_date,
        campaign: form.campaign,
    };

    let result = state.dashboard.refresh(&actor, &input).await?;
    info!(user_id = %actor.id, "Dashboard refreshed");

    Ok(Envelope::success(result))
}

/// GET /dashboard/nonce
async fn issue_nonce(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let actor = auth_user.actor()?;
    state.dashboard.authorize(&actor)?;

    let nonce = state
        .nonce_service
        .create(
            REFRESH_NONCE_ACTION,
            auth_user.user_id(),
            auth_user.session_id(),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Envelope::success(NonceResponse {
        nonce,
        action: REFRESH_NONCE_ACTION,
        expires_in: state.nonce_service.lifetime_secs(),
    }))
}
